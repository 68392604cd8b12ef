//! persistence and voucher storage seams.
//!
//! the tracker only talks to these traits; the in-memory implementations
//! back tests and demos.

use std::collections::HashMap;

use crate::errors::{Result, TrackerError};
use crate::payments::{sort_newest_first, PaymentRecord, VoucherUpload};
use crate::terms::BorrowerProfile;
use crate::types::{BorrowerId, PaymentId};

/// users and their payment records
pub trait LoanStore {
    fn user(&self, id: BorrowerId) -> Result<BorrowerProfile>;

    /// all users with the borrower role
    fn borrowers(&self) -> Result<Vec<BorrowerProfile>>;

    /// a borrower's payments, newest first
    fn payments_for(&self, borrower_id: BorrowerId) -> Result<Vec<PaymentRecord>>;

    fn payment(&self, id: PaymentId) -> Result<PaymentRecord>;

    fn insert_payment(&mut self, record: PaymentRecord) -> Result<()>;

    fn replace_payment(&mut self, record: PaymentRecord) -> Result<()>;

    fn delete_payment(&mut self, id: PaymentId) -> Result<PaymentRecord>;
}

/// object storage for payment vouchers
pub trait VoucherStorage {
    /// store `upload` under `path`, overwriting, and return its public reference
    fn upload(&mut self, path: &str, upload: &VoucherUpload) -> Result<String>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<BorrowerId, BorrowerProfile>,
    payments: HashMap<PaymentId, PaymentRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, profile: BorrowerProfile) {
        self.users.insert(profile.id, profile);
    }
}

impl LoanStore for InMemoryStore {
    fn user(&self, id: BorrowerId) -> Result<BorrowerProfile> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(TrackerError::BorrowerNotFound { id })
    }

    fn borrowers(&self) -> Result<Vec<BorrowerProfile>> {
        let mut borrowers: Vec<_> = self
            .users
            .values()
            .filter(|u| u.is_borrower())
            .cloned()
            .collect();
        borrowers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(borrowers)
    }

    fn payments_for(&self, borrower_id: BorrowerId) -> Result<Vec<PaymentRecord>> {
        let mut payments: Vec<_> = self
            .payments
            .values()
            .filter(|p| p.borrower_id == borrower_id)
            .cloned()
            .collect();
        sort_newest_first(&mut payments);
        Ok(payments)
    }

    fn payment(&self, id: PaymentId) -> Result<PaymentRecord> {
        self.payments
            .get(&id)
            .cloned()
            .ok_or(TrackerError::PaymentNotFound { id })
    }

    fn insert_payment(&mut self, record: PaymentRecord) -> Result<()> {
        if self.payments.contains_key(&record.id) {
            return Err(TrackerError::Storage {
                message: format!("duplicate payment id {}", record.id),
            });
        }
        self.payments.insert(record.id, record);
        Ok(())
    }

    fn replace_payment(&mut self, record: PaymentRecord) -> Result<()> {
        match self.payments.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(TrackerError::PaymentNotFound { id: record.id }),
        }
    }

    fn delete_payment(&mut self, id: PaymentId) -> Result<PaymentRecord> {
        self.payments
            .remove(&id)
            .ok_or(TrackerError::PaymentNotFound { id })
    }
}

/// voucher bucket held in memory
#[derive(Debug)]
pub struct InMemoryVoucherStorage {
    base_url: String,
    objects: HashMap<String, Vec<u8>>,
}

impl InMemoryVoucherStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: HashMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.objects.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl VoucherStorage for InMemoryVoucherStorage {
    fn upload(&mut self, path: &str, upload: &VoucherUpload) -> Result<String> {
        self.objects.insert(path.to_string(), upload.bytes.clone());
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), path))
    }
}
