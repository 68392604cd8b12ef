//! serializable dashboard views
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::payments::PaymentRecord;
use crate::stats::LoanStatsSnapshot;
use crate::terms::{BorrowerProfile, LoanTerms};
use crate::types::{BorrowerId, CurrentMonthStatus, PaymentStatus};

/// everything a borrower dashboard shows
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowerView {
    pub borrower_id: BorrowerId,
    pub name: String,
    pub email: String,
    pub loan: LoanView,
    pub progress: ProgressView,
    pub status: StatusView,
    pub recent_payments: Vec<PaymentRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub loan_start_date: NaiveDate,
    pub loan_duration_months: u32,
    pub expected_end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressView {
    pub total_paid: Money,
    pub remaining_amount: Money,
    pub progress_percentage: Percentage,
    pub total_payments: usize,
    pub minimum_payments_made: u32,
    pub minimum_payments_remaining: u32,
    pub extra_payments: Money,
    pub time_remaining: String,
    pub is_on_track: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusView {
    pub payment_status: PaymentStatus,
    pub payment_status_label: String,
    pub current_month_status: CurrentMonthStatus,
    pub current_month_label: String,
    pub monthly_progress: Percentage,
    pub next_payment_due: NaiveDate,
    pub payment_window_closes: Option<NaiveDate>,
    pub days_until_due: u32,
    pub months_in_mora: u32,
    pub mora_months: Vec<String>,
}

impl BorrowerView {
    pub fn build(
        profile: &BorrowerProfile,
        terms: &LoanTerms,
        stats: &LoanStatsSnapshot,
        recent_payments: Vec<PaymentRecord>,
    ) -> Self {
        BorrowerView {
            borrower_id: profile.id,
            name: profile.name.clone(),
            email: profile.email.clone(),
            loan: LoanView {
                loan_amount: terms.loan_amount,
                monthly_payment: terms.monthly_payment,
                loan_start_date: terms.loan_start_date,
                loan_duration_months: terms.loan_duration_months,
                expected_end_date: stats.expected_end_date,
            },
            progress: ProgressView {
                total_paid: stats.total_paid,
                remaining_amount: stats.remaining_amount,
                progress_percentage: stats.progress_percentage,
                total_payments: stats.total_payments,
                minimum_payments_made: stats.minimum_payments_made,
                minimum_payments_remaining: stats.minimum_payments_remaining,
                extra_payments: stats.extra_payments,
                time_remaining: stats.time_remaining(terms).to_string(),
                is_on_track: stats.is_on_track,
            },
            status: StatusView {
                payment_status: stats.payment_status,
                payment_status_label: stats.payment_status.to_string(),
                current_month_status: stats.current_month_status,
                current_month_label: stats.current_month_status.to_string(),
                monthly_progress: stats.monthly_progress,
                next_payment_due: stats.next_payment_due,
                payment_window_closes: stats.payment_window_closes,
                days_until_due: stats.days_until_due,
                months_in_mora: stats.months_in_mora,
                mora_months: stats.mora_months.iter().map(|m| m.to_string()).collect(),
            },
            recent_payments,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
