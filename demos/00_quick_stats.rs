/// quick stats - loan statistics straight from terms and payments
use chrono::{NaiveDate, TimeZone, Utc};
use loan_tracker_rs::{compute_stats, LoanTerms, Money, NewPayment, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?;
    let terms = LoanTerms::new(Money::from_major(1_200), Money::from_major(100), start)
        .with_duration(12);

    // two minimum payments and a small extra
    let borrower = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap();
    let on = |m, d| NaiveDate::from_ymd_opt(2024, m, d).ok_or("bad date");
    let payments = vec![
        NewPayment::minimum(Money::from_major(100), on(9, 26)?).into_record(borrower, now),
        NewPayment::minimum(Money::from_major(100), on(10, 27)?).into_record(borrower, now),
        NewPayment::extra(Money::from_major(50), on(10, 30)?).into_record(borrower, now),
    ];

    let stats = compute_stats(&terms, &payments, now);

    println!("paid:       {}", stats.total_paid);
    println!("remaining:  {}", stats.remaining_amount);
    println!("progress:   {}", stats.progress_percentage);
    println!("status:     {}", stats.payment_status);
    println!("this month: {} ({})", stats.current_month_status, stats.monthly_progress);
    println!("next due:   {} (in {} days)", stats.next_payment_due, stats.days_until_due);
    println!("payoff in:  {}", stats.time_remaining(&terms));

    println!("\n{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
