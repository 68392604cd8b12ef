pub mod mora;
pub mod status;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{self, DueWindow, YearMonth};
use crate::config::TrackerConfig;
use crate::decimal::{Money, Percentage};
use crate::format::TimeRemaining;
use crate::payments::{self, PaymentRecord};
use crate::terms::LoanTerms;
use crate::types::{CurrentMonthStatus, PaymentStatus};

pub use mora::mora_months;
pub use status::{MonthFacts, StandingFacts};

/// derived loan statistics at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanStatsSnapshot {
    pub total_paid: Money,
    pub remaining_amount: Money,
    pub progress_percentage: Percentage,
    pub months_elapsed: u32,
    pub months_remaining: u32,
    pub expected_end_date: NaiveDate,
    pub is_on_track: bool,
    pub total_payments: usize,
    pub payment_status: PaymentStatus,
    pub current_month_status: CurrentMonthStatus,
    pub next_payment_due: NaiveDate,
    /// last day of this month's due window; `None` when the month is too short
    pub payment_window_closes: Option<NaiveDate>,
    pub days_until_due: u32,
    pub monthly_progress: Percentage,
    pub total_minimum_payments: u32,
    pub minimum_payments_made: u32,
    pub minimum_payments_remaining: u32,
    pub extra_payments: Money,
    pub is_ahead_of_schedule: bool,
    pub months_in_mora: u32,
    /// delinquent months, oldest first
    pub mora_months: Vec<YearMonth>,
}

impl LoanStatsSnapshot {
    /// payoff time left at the contractual installment
    pub fn time_remaining(&self, terms: &LoanTerms) -> TimeRemaining {
        TimeRemaining::for_installments(terms.monthly_payment, self.minimum_payments_remaining)
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining_amount.is_zero()
    }
}

/// computes loan statistics from terms and recorded payments
#[derive(Debug, Clone)]
pub struct StatsEngine {
    due_window: DueWindow,
    on_track_tolerance: Decimal,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

impl StatsEngine {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            due_window: config.due_window,
            on_track_tolerance: config.on_track_tolerance,
        }
    }

    /// snapshot of `terms` and `payments` as seen at `now`. never fails.
    pub fn compute(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
        now: DateTime<Utc>,
    ) -> LoanStatsSnapshot {
        let loan_amount = terms.loan_amount;
        let monthly_payment = terms.monthly_payment;

        // totals
        let total_paid: Money = payments.iter().map(|p| p.amount).sum();
        let remaining_amount = loan_amount.saturating_sub(total_paid);
        let progress_percentage = Percentage::of(total_paid, loan_amount);

        // installments
        let total_minimum_payments = loan_amount.installments_of(monthly_payment);
        let minimum_payments_made = payments.iter().filter(|p| p.is_minimum()).count() as u32;
        let extra_payments: Money = payments
            .iter()
            .filter(|p| p.is_extra())
            .map(|p| p.amount)
            .sum();
        let minimum_payments_remaining = remaining_amount.installments_of(monthly_payment);

        // schedule
        let months_elapsed = calendar::months_elapsed(terms.loan_start_date, now);
        let expected_end_date = calendar::add_months(terms.loan_start_date, total_minimum_payments);
        let expected_by_now = (monthly_payment * Decimal::from(months_elapsed)).min(loan_amount);
        let is_on_track =
            total_paid.as_decimal() >= expected_by_now.as_decimal() * self.on_track_tolerance;

        // delinquency
        let today = now.date_naive();
        let current = YearMonth::from_date(today);
        let mora_months = mora::mora_months(terms.loan_start_date, payments, current);
        let months_in_mora = mora_months.len() as u32;

        // current month
        let current_month_total: Money = payments::in_month(payments, current)
            .map(|p| p.amount)
            .sum();
        let monthly_progress = Percentage::of(current_month_total, monthly_payment);
        let day = today.day();
        let month_facts = MonthFacts {
            has_minimum: payments::has_minimum_in(payments, current),
            total_paid: current_month_total,
            monthly_payment,
            in_due_window: self.due_window.contains(day),
            due_window_passed: self.due_window.has_passed(day),
        };
        let current_month_status = status::current_month_status(&month_facts);

        let payment_status = status::standing(&StandingFacts {
            months_in_mora,
            current_month: current_month_status,
            in_due_window: month_facts.in_due_window,
            extra_payments,
        });

        // the opening day is validated to exist in every month
        let next_payment_due = self.due_window.opens(current).unwrap_or(today);
        let payment_window_closes = self.due_window.closes(current);
        let days_until_due = calendar::days_until(next_payment_due, now).max(0) as u32;

        debug!(
            total_paid = %total_paid,
            months_in_mora,
            ?current_month_status,
            ?payment_status,
            "computed loan stats"
        );

        LoanStatsSnapshot {
            total_paid,
            remaining_amount,
            progress_percentage,
            months_elapsed,
            months_remaining: minimum_payments_remaining,
            expected_end_date,
            is_on_track,
            total_payments: payments.len(),
            payment_status,
            current_month_status,
            next_payment_due,
            payment_window_closes,
            days_until_due,
            monthly_progress,
            total_minimum_payments,
            minimum_payments_made,
            minimum_payments_remaining,
            extra_payments,
            is_ahead_of_schedule: extra_payments.is_positive(),
            months_in_mora,
            mora_months,
        }
    }
}

/// compute with the default due window and tolerance
pub fn compute_stats(
    terms: &LoanTerms,
    payments: &[PaymentRecord],
    now: DateTime<Utc>,
) -> LoanStatsSnapshot {
    StatsEngine::default().compute(terms, payments, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::NewPayment;
    use chrono::TimeZone;
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn loan(amount: i64, monthly: i64, start: NaiveDate) -> LoanTerms {
        LoanTerms::new(Money::from_major(amount), Money::from_major(monthly), start)
    }

    fn terms_1200() -> LoanTerms {
        loan(1_200, 100, date(2024, 8, 1))
    }

    fn record(payment: NewPayment) -> PaymentRecord {
        payment.into_record(Uuid::new_v4(), at(2024, 8, 1))
    }

    fn minimum(y: i32, m: u32, d: u32) -> PaymentRecord {
        record(NewPayment::minimum(Money::from_major(100), date(y, m, d)))
    }

    #[test]
    fn test_no_payments_with_missed_months() {
        let time = SafeTimeProvider::new(TimeSource::Test(at(2024, 11, 15)));
        let stats = compute_stats(&terms_1200(), &[], time.now());

        assert_eq!(stats.months_in_mora, 2);
        assert_eq!(stats.mora_months, vec![YearMonth::new(2024, 9), YearMonth::new(2024, 10)]);
        assert_eq!(stats.current_month_status, CurrentMonthStatus::Pendiente);
        assert_eq!(stats.payment_status, PaymentStatus::EnMora);
        assert_eq!(stats.months_elapsed, 3);
        assert!(!stats.is_on_track);
        assert_eq!(stats.total_minimum_payments, 12);
        assert_eq!(stats.expected_end_date, date(2025, 8, 1));
        assert_eq!(stats.next_payment_due, date(2024, 11, 25));
        assert_eq!(stats.days_until_due, 9);
    }

    #[test]
    fn test_paid_current_month_still_in_mora() {
        let payments = vec![minimum(2024, 11, 5)];
        let stats = compute_stats(&terms_1200(), &payments, at(2024, 11, 15));

        assert_eq!(stats.current_month_status, CurrentMonthStatus::Pagado);
        assert_eq!(stats.payment_status, PaymentStatus::EnMora);
        assert_eq!(stats.monthly_progress, Percentage::FULL);
        assert_eq!(stats.minimum_payments_made, 1);
    }

    #[test]
    fn test_fully_paid_loan() {
        let terms = loan(1_000, 100, date(2024, 8, 1));
        let payments = vec![
            record(NewPayment::minimum(Money::from_major(100), date(2024, 9, 26))),
            record(NewPayment::extra(Money::from_major(900), date(2024, 9, 27))),
        ];
        let stats = compute_stats(&terms, &payments, at(2024, 10, 10));

        assert_eq!(stats.remaining_amount, Money::ZERO);
        assert_eq!(stats.progress_percentage, Percentage::FULL);
        assert_eq!(stats.minimum_payments_remaining, 0);
        assert_eq!(stats.months_remaining, 0);
        assert!(stats.is_paid_off());
        assert_eq!(stats.extra_payments, Money::from_major(900));
        assert!(stats.is_ahead_of_schedule);
        assert_eq!(stats.payment_status, PaymentStatus::AlDia);
    }

    #[test]
    fn test_partial_extra_this_month() {
        let terms = loan(1_200, 100, date(2024, 10, 1));
        let payments = vec![record(NewPayment::extra(
            Money::from_major(50),
            date(2024, 11, 3),
        ))];
        let stats = compute_stats(&terms, &payments, at(2024, 11, 10));

        assert_eq!(stats.current_month_status, CurrentMonthStatus::Adelantado);
        assert_eq!(stats.payment_status, PaymentStatus::Adelantado);
        assert_eq!(stats.monthly_progress.as_decimal(), Decimal::from(50));
    }

    #[test]
    fn test_due_window_pending() {
        let terms = loan(1_200, 100, date(2024, 10, 1));
        let stats = compute_stats(&terms, &[], at(2024, 10, 28));

        assert_eq!(stats.months_in_mora, 0);
        assert_eq!(stats.current_month_status, CurrentMonthStatus::Pendiente);
        assert_eq!(stats.payment_status, PaymentStatus::Pendiente);
        assert_eq!(stats.days_until_due, 0);
    }

    #[test]
    fn test_day_31_unpaid_is_overdue() {
        let terms = loan(1_200, 100, date(2024, 10, 1));
        let stats = compute_stats(&terms, &[], at(2024, 10, 31));

        assert_eq!(stats.current_month_status, CurrentMonthStatus::EnMora);
        assert_eq!(stats.payment_status, PaymentStatus::EnMora);
        assert_eq!(stats.months_in_mora, 0);
    }

    #[test]
    fn test_before_window_is_al_dia() {
        let payments = vec![minimum(2024, 9, 26), minimum(2024, 10, 25)];
        let stats = compute_stats(&terms_1200(), &payments, at(2024, 11, 10));

        assert_eq!(stats.months_in_mora, 0);
        assert_eq!(stats.current_month_status, CurrentMonthStatus::Pendiente);
        assert_eq!(stats.payment_status, PaymentStatus::AlDia);
        // three months elapsed against two installments paid
        assert!(!stats.is_on_track);
    }

    #[test]
    fn test_on_track_tolerance() {
        // three months elapsed, 300 expected, 285 is exactly 95%
        let payments = vec![
            record(NewPayment::minimum(Money::from_major(95), date(2024, 9, 26))),
            record(NewPayment::minimum(Money::from_major(95), date(2024, 10, 26))),
            record(NewPayment::minimum(Money::from_major(95), date(2024, 11, 1))),
        ];
        let stats = compute_stats(&terms_1200(), &payments, at(2024, 11, 15));
        assert!(stats.is_on_track);

        let short = &payments[..2];
        let stats = compute_stats(&terms_1200(), short, at(2024, 11, 15));
        assert!(!stats.is_on_track);
    }

    #[test]
    fn test_zero_loan_amount() {
        let terms = loan(0, 100, date(2024, 8, 1));
        let payments = vec![minimum(2024, 9, 26)];
        let stats = compute_stats(&terms, &payments, at(2024, 10, 10));

        assert_eq!(stats.progress_percentage, Percentage::ZERO);
        assert_eq!(stats.remaining_amount, Money::ZERO);
        assert_eq!(stats.total_minimum_payments, 0);
    }

    #[test]
    fn test_zero_monthly_payment() {
        let terms = loan(1_000, 0, date(2024, 8, 1));
        let payments = vec![record(NewPayment::extra(
            Money::from_major(40),
            date(2024, 10, 2),
        ))];
        let stats = compute_stats(&terms, &payments, at(2024, 10, 10));

        assert_eq!(stats.total_minimum_payments, 0);
        assert_eq!(stats.minimum_payments_remaining, 0);
        assert_eq!(stats.monthly_progress, Percentage::ZERO);
        assert_eq!(stats.expected_end_date, date(2024, 8, 1));
        assert_eq!(stats.time_remaining(&terms), TimeRemaining::NotApplicable);
        assert_eq!(stats.time_remaining(&terms).to_string(), "N/A");
    }

    #[test]
    fn test_overpayment_clamps_progress() {
        let terms = loan(500, 100, date(2024, 8, 1));
        let payments = vec![
            minimum(2024, 9, 26),
            record(NewPayment::extra(Money::from_major(700), date(2024, 10, 3))),
        ];
        let stats = compute_stats(&terms, &payments, at(2024, 10, 10));

        assert_eq!(stats.total_paid, Money::from_major(800));
        assert_eq!(stats.remaining_amount, Money::ZERO);
        assert_eq!(stats.progress_percentage, Percentage::FULL);
        assert_eq!(stats.monthly_progress, Percentage::FULL);
        assert_eq!(stats.total_payments, 2);
    }

    #[test]
    fn test_loan_not_started_yet() {
        let terms = loan(1_200, 100, date(2025, 1, 15));
        let stats = compute_stats(&terms, &[], at(2024, 11, 10));

        assert_eq!(stats.months_elapsed, 0);
        assert_eq!(stats.months_in_mora, 0);
        assert!(stats.is_on_track);
        assert_eq!(stats.payment_status, PaymentStatus::AlDia);
    }

    #[test]
    fn test_idempotent() {
        let payments = vec![
            minimum(2024, 9, 26),
            record(NewPayment::extra(Money::from_cents(3_333), date(2024, 10, 3))),
        ];
        let now = at(2024, 11, 27);
        let first = compute_stats(&terms_1200(), &payments, now);
        let second = compute_stats(&terms_1200(), &payments, now);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_adding_payments_never_lowers_progress() {
        let amounts = [120, 5, 300, 80, 1_000, 1];
        let now = at(2024, 12, 10);
        let mut payments = Vec::new();
        let mut previous = compute_stats(&terms_1200(), &payments, now);

        for (i, amount) in amounts.iter().enumerate() {
            let payment = if i % 2 == 0 {
                let on = date(2024, 9 + (i as u32 % 3), 26);
                NewPayment::minimum(Money::from_major(*amount), on)
            } else {
                NewPayment::extra(Money::from_major(*amount), date(2024, 12, 1))
            };
            payments.push(record(payment));

            let stats = compute_stats(&terms_1200(), &payments, now);
            assert!(stats.total_paid >= previous.total_paid);
            assert!(stats.progress_percentage >= previous.progress_percentage);
            assert!(stats.progress_percentage <= Percentage::FULL);
            assert!(stats.monthly_progress <= Percentage::FULL);
            assert_eq!(stats.total_payments, payments.len());
            assert_eq!(
                stats.remaining_amount,
                terms_1200().loan_amount.saturating_sub(stats.total_paid)
            );
            previous = stats;
        }
    }

    #[test]
    fn test_custom_due_window() {
        let mut config = TrackerConfig::default();
        config.due_window = DueWindow { start_day: 10, end_day: 15 };
        let engine = StatsEngine::new(&config);

        let terms = loan(1_200, 100, date(2024, 10, 1));
        let stats = engine.compute(&terms, &[], at(2024, 10, 12));
        assert_eq!(stats.payment_status, PaymentStatus::Pendiente);
        assert_eq!(stats.next_payment_due, date(2024, 10, 10));

        let stats = engine.compute(&terms, &[], at(2024, 10, 20));
        assert_eq!(stats.current_month_status, CurrentMonthStatus::EnMora);
    }

    #[test]
    fn test_window_close_absent_in_short_month() {
        let terms = loan(1_200, 100, date(2024, 12, 1));
        let stats = compute_stats(&terms, &[], at(2025, 2, 10));
        assert_eq!(stats.next_payment_due, date(2025, 2, 25));
        assert_eq!(stats.payment_window_closes, None);

        let stats = compute_stats(&terms, &[], at(2025, 4, 10));
        assert_eq!(stats.payment_window_closes, Some(date(2025, 4, 30)));
    }

    #[test]
    fn test_extreme_loan_does_not_panic() {
        let huge = Money::from_decimal(Decimal::MAX);
        let terms = LoanTerms::new(huge, Money::CENT, date(2024, 8, 1));
        let payments = vec![minimum(2024, 9, 26)];
        let stats = compute_stats(&terms, &payments, at(2024, 11, 15));

        assert_eq!(stats.total_minimum_payments, u32::MAX);
        assert_eq!(stats.minimum_payments_remaining, u32::MAX);
        assert!(stats.progress_percentage < Percentage::FULL);
        assert_eq!(stats.monthly_progress, Percentage::ZERO);
    }
}
