use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::format::TimeRemaining;
use crate::stats::LoanStatsSnapshot;
use crate::terms::{BorrowerProfile, LoanTerms};
use crate::types::{BorrowerId, PaymentStatus};

/// one borrower's line in the lender overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSummary {
    pub borrower_id: BorrowerId,
    pub name: String,
    pub terms: LoanTerms,
    pub stats: LoanStatsSnapshot,
    pub time_remaining: TimeRemaining,
}

impl BorrowerSummary {
    pub fn new(profile: &BorrowerProfile, terms: LoanTerms, stats: LoanStatsSnapshot) -> Self {
        let time_remaining =
            TimeRemaining::for_balance(terms.monthly_payment, stats.remaining_amount);
        Self {
            borrower_id: profile.id,
            name: profile.name.clone(),
            terms,
            stats,
            time_remaining,
        }
    }
}

/// aggregate across all borrowers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub borrower_count: usize,
    pub total_loaned: Money,
    pub total_paid: Money,
    pub total_remaining: Money,
    pub total_payments: usize,
    pub overall_progress: Percentage,
    pub borrowers_in_mora: usize,
    /// payoff time of the borrower furthest from finishing
    pub longest_time_remaining: TimeRemaining,
}

impl PortfolioSummary {
    pub fn from_borrowers(borrowers: &[BorrowerSummary]) -> Self {
        let total_loaned: Money = borrowers.iter().map(|b| b.terms.loan_amount).sum();
        let total_paid: Money = borrowers.iter().map(|b| b.stats.total_paid).sum();
        let total_remaining: Money = borrowers.iter().map(|b| b.stats.remaining_amount).sum();
        let total_payments: usize = borrowers.iter().map(|b| b.stats.total_payments).sum();
        let borrowers_in_mora = borrowers
            .iter()
            .filter(|b| b.stats.payment_status == PaymentStatus::EnMora)
            .count();

        let longest = borrowers
            .iter()
            .map(|b| b.time_remaining.installments())
            .max()
            .unwrap_or(0);
        let longest_time_remaining = if longest == 0 {
            TimeRemaining::NotApplicable
        } else {
            TimeRemaining::Installments(longest)
        };

        Self {
            borrower_count: borrowers.len(),
            total_loaned,
            total_paid,
            total_remaining,
            total_payments,
            overall_progress: Percentage::of(total_paid, total_loaned),
            borrowers_in_mora,
            longest_time_remaining,
        }
    }
}
