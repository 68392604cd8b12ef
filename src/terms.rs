use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{BorrowerId, UserRole};

/// contractual terms of a borrower's loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub loan_start_date: NaiveDate,
    pub loan_duration_months: u32,
}

impl LoanTerms {
    pub fn new(loan_amount: Money, monthly_payment: Money, loan_start_date: NaiveDate) -> Self {
        Self {
            loan_amount,
            monthly_payment,
            loan_start_date,
            loan_duration_months: 0,
        }
    }

    pub fn with_duration(mut self, months: u32) -> Self {
        self.loan_duration_months = months;
        self
    }

    /// terms from a stored profile. missing amounts count as zero and a
    /// missing start date is taken as `today`.
    pub fn from_profile(profile: &BorrowerProfile, today: NaiveDate) -> Self {
        Self {
            loan_amount: profile.loan_amount.unwrap_or(Money::ZERO),
            monthly_payment: profile.monthly_payment.unwrap_or(Money::ZERO),
            loan_start_date: profile.loan_start_date.unwrap_or(today),
            loan_duration_months: profile.loan_duration_months.unwrap_or(0),
        }
    }
}

/// a tracker user as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub id: BorrowerId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub loan_amount: Option<Money>,
    pub monthly_payment: Option<Money>,
    pub loan_start_date: Option<NaiveDate>,
    pub loan_duration_months: Option<u32>,
}

impl BorrowerProfile {
    /// borrower with a fully specified loan
    pub fn borrower(
        id: BorrowerId,
        name: impl Into<String>,
        email: impl Into<String>,
        terms: &LoanTerms,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role: UserRole::Borrower,
            loan_amount: Some(terms.loan_amount),
            monthly_payment: Some(terms.monthly_payment),
            loan_start_date: Some(terms.loan_start_date),
            loan_duration_months: Some(terms.loan_duration_months),
        }
    }

    pub fn lender(id: BorrowerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role: UserRole::Lender,
            loan_amount: None,
            monthly_payment: None,
            loan_start_date: None,
            loan_duration_months: None,
        }
    }

    pub fn is_borrower(&self) -> bool {
        self.role == UserRole::Borrower
    }
}
