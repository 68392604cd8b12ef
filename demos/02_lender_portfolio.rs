/// lender portfolio - totals across every borrower
use chrono::{NaiveDate, TimeZone, Utc};
use loan_tracker_rs::{
    BorrowerProfile, InMemoryStore, InMemoryVoucherStorage, LoanTerms, LoanTracker, Money,
    NewPayment, SafeTimeProvider, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== lender portfolio ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap()
    ));

    let mut store = InMemoryStore::new();
    store.add_user(BorrowerProfile::lender(Uuid::new_v4(), "Pedro", "pedro@example.com"));

    let loans = [
        ("Ana", 1_200, 100, (2024, 8, 1)),
        ("Bruno", 3_000, 250, (2024, 10, 15)),
        ("Carla", 500, 0, (2024, 12, 1)),
    ];
    let mut ids = Vec::new();
    for (name, amount, monthly, (y, m, d)) in loans {
        let start = NaiveDate::from_ymd_opt(y, m, d).ok_or("bad date")?;
        let terms = LoanTerms::new(Money::from_major(amount), Money::from_major(monthly), start);
        let email = format!("{}@example.com", name.to_lowercase());
        let profile = BorrowerProfile::borrower(Uuid::new_v4(), name, email, &terms);
        ids.push(profile.id);
        store.add_user(profile);
    }

    let mut tracker = LoanTracker::with_defaults(
        store,
        InMemoryVoucherStorage::new("https://files.example.com/payment-vouchers"),
        &time,
    );

    for (y, m) in [(2024, 9), (2024, 10), (2024, 11), (2024, 12)] {
        let on = NaiveDate::from_ymd_opt(y, m, 26).ok_or("bad date")?;
        tracker.record_payment(ids[0], NewPayment::minimum(Money::from_major(100), on))?;
    }
    let on = NaiveDate::from_ymd_opt(2024, 11, 28).ok_or("bad date")?;
    tracker.record_payment(ids[1], NewPayment::minimum(Money::from_major(250), on))?;
    let on = NaiveDate::from_ymd_opt(2025, 1, 10).ok_or("bad date")?;
    tracker.record_payment(ids[2], NewPayment::extra(Money::from_major(75), on))?;

    for summary in tracker.borrower_summaries()? {
        println!(
            "{:<6} paid {:>8} of {:>8}  {:<10} payoff {}",
            summary.name,
            summary.stats.total_paid,
            summary.terms.loan_amount,
            summary.stats.payment_status.to_string(),
            summary.time_remaining
        );
    }

    let portfolio = tracker.portfolio()?;
    println!("\nborrowers:       {}", portfolio.borrower_count);
    println!("total loaned:    {}", portfolio.total_loaned);
    println!("total paid:      {}", portfolio.total_paid);
    println!("outstanding:     {}", portfolio.total_remaining);
    println!("progress:        {}", portfolio.overall_progress);
    println!("in mora:         {}", portfolio.borrowers_in_mora);
    println!("longest payoff:  {}", portfolio.longest_time_remaining);

    Ok(())
}
