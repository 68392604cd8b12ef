pub mod advice;
pub mod filter;
pub mod history;
pub mod voucher;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::{Result, TrackerError};
use crate::types::{BorrowerId, PaymentId, PaymentType};

pub use advice::{PaymentAdvice, PaymentAdvisor};
pub use filter::{FilteredPayments, PaymentFilter};
pub use history::{MonthlyHistory, MonthlyTotal};
pub use voucher::{VoucherPolicy, VoucherUpload};

/// a recorded payment against a borrower's loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub borrower_id: BorrowerId,
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub payment_type: PaymentType,
    pub notes: Option<String>,
    pub voucher_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn is_minimum(&self) -> bool {
        self.payment_type == PaymentType::Minimum
    }

    pub fn is_extra(&self) -> bool {
        self.payment_type == PaymentType::Extra
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.payment_date)
    }

    pub fn has_voucher(&self) -> bool {
        self.voucher_ref.is_some()
    }
}

/// payment as submitted by a borrower, before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub amount: Money,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub payment_type: PaymentType,
    pub notes: Option<String>,
}

impl NewPayment {
    pub fn minimum(amount: Money, payment_date: NaiveDate) -> Self {
        Self {
            amount,
            payment_date,
            payment_type: PaymentType::Minimum,
            notes: None,
        }
    }

    pub fn extra(amount: Money, payment_date: NaiveDate) -> Self {
        Self {
            amount,
            payment_date,
            payment_type: PaymentType::Extra,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(TrackerError::InvalidPaymentAmount { amount: self.amount });
        }
        Ok(())
    }

    /// turn into a stored record
    pub fn into_record(self, borrower_id: BorrowerId, now: DateTime<Utc>) -> PaymentRecord {
        PaymentRecord {
            id: Uuid::new_v4(),
            borrower_id,
            amount: self.amount,
            payment_date: self.payment_date,
            payment_type: self.payment_type,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            voucher_ref: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// partial edit of a stored payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Option<Money>,
    pub payment_date: Option<NaiveDate>,
    pub payment_type: Option<PaymentType>,
    pub notes: Option<String>,
}

impl PaymentUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.payment_date.is_none()
            && self.payment_type.is_none()
            && self.notes.is_none()
    }

    /// apply to `record`, refusing records whose voucher is already attached
    pub fn apply(&self, record: &mut PaymentRecord, now: DateTime<Utc>) -> Result<()> {
        if record.has_voucher() {
            return Err(TrackerError::PaymentLocked { id: record.id });
        }
        if let Some(amount) = self.amount {
            if !amount.is_positive() {
                return Err(TrackerError::InvalidPaymentAmount { amount });
            }
            record.amount = amount;
        }
        if let Some(date) = self.payment_date {
            record.payment_date = date;
        }
        if let Some(payment_type) = self.payment_type {
            record.payment_type = payment_type;
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone()).filter(|n| !n.trim().is_empty());
        }
        record.updated_at = now;
        Ok(())
    }
}

/// payments falling in `month`
pub fn in_month<'a>(
    payments: &'a [PaymentRecord],
    month: YearMonth,
) -> impl Iterator<Item = &'a PaymentRecord> + 'a {
    payments.iter().filter(move |p| month.contains(p.payment_date))
}

/// whether a minimum payment was recorded in `month`
pub fn has_minimum_in(payments: &[PaymentRecord], month: YearMonth) -> bool {
    in_month(payments, month).any(PaymentRecord::is_minimum)
}

/// sort newest first, the order dashboards list payments in
pub fn sort_newest_first(payments: &mut [PaymentRecord]) {
    payments.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
