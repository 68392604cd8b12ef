use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::types::{BorrowerId, PaymentId, PaymentType};

/// events emitted by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PaymentRecorded {
        borrower_id: BorrowerId,
        payment_id: PaymentId,
        amount: Money,
        payment_type: PaymentType,
        payment_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    /// an oversized extra stored as one minimum plus one extra
    PaymentSplit {
        borrower_id: BorrowerId,
        minimum_id: PaymentId,
        extra_id: PaymentId,
        timestamp: DateTime<Utc>,
    },
    PaymentUpdated {
        borrower_id: BorrowerId,
        payment_id: PaymentId,
        timestamp: DateTime<Utc>,
    },
    PaymentDeleted {
        borrower_id: BorrowerId,
        payment_id: PaymentId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    VoucherAttached {
        borrower_id: BorrowerId,
        payment_id: PaymentId,
        voucher_ref: String,
        timestamp: DateTime<Utc>,
    },
    /// the payment was stored but its voucher could not be uploaded
    VoucherUploadFailed {
        borrower_id: BorrowerId,
        payment_id: PaymentId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    /// a borrower's set of unpaid past months changed
    MoraDetected {
        borrower_id: BorrowerId,
        months: Vec<YearMonth>,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
