use thiserror::Error;

use crate::decimal::Money;
use crate::types::{BorrowerId, PaymentId, UserRole};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("borrower not found: {id}")]
    BorrowerNotFound {
        id: BorrowerId,
    },

    #[error("payment not found: {id}")]
    PaymentNotFound {
        id: PaymentId,
    },

    #[error("only borrowers can record payments: user {id} has role {role:?}")]
    NotABorrower {
        id: BorrowerId,
        role: UserRole,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("payment {id} has a voucher attached and can no longer change")]
    PaymentLocked {
        id: PaymentId,
    },

    #[error("voucher rejected: {message}")]
    VoucherRejected {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
