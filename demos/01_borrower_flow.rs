/// borrower flow - advice, split payments, vouchers and mora over time
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_tracker_rs::{
    BorrowerProfile, InMemoryStore, InMemoryVoucherStorage, LoanTerms, LoanTracker, Money,
    NewPayment, PaymentAdvice, PaymentFilter, SafeTimeProvider, TimeSource, Uuid, VoucherUpload,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== borrower flow ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 9, 26, 10, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?;
    let terms = LoanTerms::new(Money::from_major(1_200), Money::from_major(100), start)
        .with_duration(12);
    let profile = BorrowerProfile::borrower(Uuid::new_v4(), "Ana", "ana@example.com", &terms);
    let borrower = profile.id;

    let mut store = InMemoryStore::new();
    store.add_user(profile);
    let mut tracker = LoanTracker::with_defaults(
        store,
        InMemoryVoucherStorage::new("https://files.example.com/payment-vouchers"),
        &time,
    );

    // september: one payment bigger than the installment
    let payment = NewPayment::extra(Money::from_major(250), time.now().date_naive())
        .with_notes("transferencia");
    let advice = tracker.advise_payment(borrower, payment)?;
    if let PaymentAdvice::Split { minimum, extra } = &advice {
        println!("split suggested: minimum {} + extra {}", minimum.amount, extra.amount);
    }

    let voucher = VoucherUpload::new("recibo.pdf", "application/pdf", b"%PDF-1.4".to_vec());
    let stored = tracker.confirm_advice(borrower, advice, Some(&voucher))?;
    for record in &stored {
        println!(
            "stored {:?} {} voucher={}",
            record.payment_type,
            record.amount,
            record.voucher_ref.as_deref().unwrap_or("-")
        );
    }

    let stats = tracker.borrower_stats(borrower)?;
    println!(
        "\n{}: {} / {}",
        time.now().format("%Y-%m-%d"),
        stats.payment_status,
        stats.current_month_status
    );

    // skip october entirely
    controller.advance(Duration::days(40));
    let stats = tracker.borrower_stats(borrower)?;
    println!(
        "{}: {} ({} months in mora)",
        time.now().format("%Y-%m-%d"),
        stats.payment_status,
        stats.months_in_mora
    );
    for month in tracker.mora_months(borrower)? {
        println!("  unpaid: {}", month);
    }

    // a late minimum for october clears it
    let october = NaiveDate::from_ymd_opt(2024, 10, 31).ok_or("bad date")?;
    let late = NewPayment::minimum(Money::from_major(100), october).with_notes("pago atrasado");
    tracker.record_payment(borrower, late)?;
    let stats = tracker.borrower_stats(borrower)?;
    println!("after late payment: {}", stats.payment_status);

    println!("\nmonthly history:");
    for month in tracker.monthly_history(borrower)?.months {
        println!(
            "  {} {} ({} payments, cumulative {})",
            month.month, month.amount, month.payment_count, month.cumulative
        );
    }

    let transfers = tracker.search_payments(borrower, &PaymentFilter::new().search("transfer"))?;
    println!("\ntransfers: {} payments, {}", transfers.len(), transfers.total());

    println!("\nevents: {}", tracker.events.take_events().len());
    println!("\n{}", tracker.borrower_view(borrower)?.to_json_pretty()?);

    Ok(())
}
