use std::collections::HashMap;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info, warn};

use crate::calendar::YearMonth;
use crate::config::TrackerConfig;
use crate::errors::{Result, TrackerError};
use crate::events::{Event, EventStore};
use crate::payments::{
    FilteredPayments, MonthlyHistory, NewPayment, PaymentAdvice, PaymentAdvisor, PaymentFilter,
    PaymentRecord, PaymentUpdate, VoucherUpload,
};
use crate::portfolio::{BorrowerSummary, PortfolioSummary};
use crate::stats::{self, LoanStatsSnapshot, StatsEngine};
use crate::store::{LoanStore, VoucherStorage};
use crate::terms::{BorrowerProfile, LoanTerms};
use crate::types::{BorrowerId, PaymentId};
use crate::view::BorrowerView;

/// loan tracking service over a store, a voucher bucket and a clock
pub struct LoanTracker<'t, S: LoanStore, V: VoucherStorage> {
    store: S,
    vouchers: V,
    time: &'t SafeTimeProvider,
    config: TrackerConfig,
    engine: StatsEngine,
    /// last mora months reported per borrower
    reported_mora: HashMap<BorrowerId, Vec<YearMonth>>,
    pub events: EventStore,
}

impl<'t, S: LoanStore, V: VoucherStorage> LoanTracker<'t, S, V> {
    /// create tracker, rejecting invalid configuration
    pub fn new(
        store: S,
        vouchers: V,
        time: &'t SafeTimeProvider,
        config: TrackerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let engine = StatsEngine::new(&config);
        Ok(Self {
            store,
            vouchers,
            time,
            config,
            engine,
            reported_mora: HashMap::new(),
            events: EventStore::new(),
        })
    }

    /// create tracker with default configuration
    pub fn with_defaults(store: S, vouchers: V, time: &'t SafeTimeProvider) -> Self {
        let config = TrackerConfig::default();
        Self {
            engine: StatsEngine::new(&config),
            store,
            vouchers,
            time,
            config,
            reported_mora: HashMap::new(),
            events: EventStore::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn vouchers(&self) -> &V {
        &self.vouchers
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.time.now().date_naive()
    }

    fn terms_of(&self, profile: &BorrowerProfile) -> LoanTerms {
        LoanTerms::from_profile(profile, self.today())
    }

    fn require_borrower(&self, borrower_id: BorrowerId) -> Result<BorrowerProfile> {
        let profile = self.store.user(borrower_id)?;
        if !profile.is_borrower() {
            return Err(TrackerError::NotABorrower {
                id: profile.id,
                role: profile.role,
            });
        }
        Ok(profile)
    }

    fn evaluate(
        &self,
        profile: &BorrowerProfile,
    ) -> Result<(LoanTerms, Vec<PaymentRecord>, LoanStatsSnapshot)> {
        let terms = self.terms_of(profile);
        let payments = self.store.payments_for(profile.id)?;
        let snapshot = self.engine.compute(&terms, &payments, self.time.now());
        Ok((terms, payments, snapshot))
    }

    /// a borrower's payments, newest first
    pub fn payments(&self, borrower_id: BorrowerId) -> Result<Vec<PaymentRecord>> {
        self.store.payments_for(borrower_id)
    }

    /// the latest payments, as many as the configured listing shows
    pub fn recent_payments(&self, borrower_id: BorrowerId) -> Result<Vec<PaymentRecord>> {
        let mut payments = self.store.payments_for(borrower_id)?;
        payments.truncate(self.config.recent_payments_limit);
        Ok(payments)
    }

    /// a borrower's payments narrowed by `filter`, newest first
    pub fn search_payments(
        &self,
        borrower_id: BorrowerId,
        filter: &PaymentFilter,
    ) -> Result<FilteredPayments> {
        let payments = self.store.payments_for(borrower_id)?;
        Ok(filter.apply(&payments))
    }

    /// current statistics for a borrower
    pub fn borrower_stats(&mut self, borrower_id: BorrowerId) -> Result<LoanStatsSnapshot> {
        let profile = self.require_borrower(borrower_id)?;
        let (_, _, snapshot) = self.evaluate(&profile)?;
        self.report_mora(borrower_id, &snapshot.mora_months);
        Ok(snapshot)
    }

    fn report_mora(&mut self, borrower_id: BorrowerId, months: &[YearMonth]) {
        if months.is_empty() {
            self.reported_mora.remove(&borrower_id);
            return;
        }
        if self.reported_mora.get(&borrower_id).map(Vec::as_slice) == Some(months) {
            return;
        }

        warn!(
            borrower = %borrower_id,
            months_in_mora = months.len(),
            "borrower has unpaid months"
        );
        self.events.emit(Event::MoraDetected {
            borrower_id,
            months: months.to_vec(),
            timestamp: self.time.now(),
        });
        self.reported_mora.insert(borrower_id, months.to_vec());
    }

    /// past months without a minimum payment
    pub fn mora_months(&self, borrower_id: BorrowerId) -> Result<Vec<YearMonth>> {
        let profile = self.require_borrower(borrower_id)?;
        let terms = self.terms_of(&profile);
        let payments = self.store.payments_for(borrower_id)?;
        Ok(stats::mora_months(
            terms.loan_start_date,
            &payments,
            YearMonth::from_date(self.today()),
        ))
    }

    pub fn monthly_history(&self, borrower_id: BorrowerId) -> Result<MonthlyHistory> {
        let payments = self.store.payments_for(borrower_id)?;
        Ok(MonthlyHistory::from_payments(&payments))
    }

    /// classify a payment before storing it
    pub fn advise_payment(
        &self,
        borrower_id: BorrowerId,
        payment: NewPayment,
    ) -> Result<PaymentAdvice> {
        let profile = self.require_borrower(borrower_id)?;
        let terms = self.terms_of(&profile);
        let existing = self.store.payments_for(borrower_id)?;
        let advice = PaymentAdvisor::new(terms.monthly_payment).advise(payment, &existing)?;
        debug!(borrower = %borrower_id, ?advice, "payment advice");
        Ok(advice)
    }

    /// store a payment as submitted, without advice
    pub fn record_payment(
        &mut self,
        borrower_id: BorrowerId,
        payment: NewPayment,
    ) -> Result<PaymentRecord> {
        self.require_borrower(borrower_id)?;
        payment.validate()?;
        self.store_new(borrower_id, payment)
    }

    /// store what `advice` resolves to, attaching `voucher` to every stored payment.
    ///
    /// the voucher is checked against the policy before anything is stored. once the
    /// payments are stored a failed upload no longer fails the call: the payment comes
    /// back without a voucher and a `VoucherUploadFailed` event names it.
    pub fn confirm_advice(
        &mut self,
        borrower_id: BorrowerId,
        advice: PaymentAdvice,
        voucher: Option<&VoucherUpload>,
    ) -> Result<Vec<PaymentRecord>> {
        self.require_borrower(borrower_id)?;
        if let Some(upload) = voucher {
            self.config.voucher_policy.check(upload)?;
        }

        let is_split = matches!(advice, PaymentAdvice::Split { .. });
        let payments = advice.into_payments();
        for payment in &payments {
            payment.validate()?;
        }

        let mut stored = Vec::with_capacity(payments.len());
        for payment in payments {
            stored.push(self.store_new(borrower_id, payment)?);
        }

        if is_split {
            if let [minimum, extra] = stored.as_slice() {
                self.events.emit(Event::PaymentSplit {
                    borrower_id,
                    minimum_id: minimum.id,
                    extra_id: extra.id,
                    timestamp: self.time.now(),
                });
            }
        }

        if let Some(upload) = voucher {
            for record in stored.iter_mut() {
                match self.attach_voucher(record.id, upload) {
                    Ok(updated) => *record = updated,
                    Err(e) => {
                        warn!(
                            payment = %record.id,
                            error = %e,
                            "payment stored but voucher upload failed"
                        );
                        self.events.emit(Event::VoucherUploadFailed {
                            borrower_id,
                            payment_id: record.id,
                            reason: e.to_string(),
                            timestamp: self.time.now(),
                        });
                    }
                }
            }
        }

        Ok(stored)
    }

    fn store_new(&mut self, borrower_id: BorrowerId, payment: NewPayment) -> Result<PaymentRecord> {
        let now = self.time.now();
        let record = payment.into_record(borrower_id, now);
        self.store.insert_payment(record.clone())?;

        info!(
            borrower = %borrower_id,
            payment = %record.id,
            amount = %record.amount,
            payment_type = ?record.payment_type,
            "payment recorded"
        );
        self.events.emit(Event::PaymentRecorded {
            borrower_id,
            payment_id: record.id,
            amount: record.amount,
            payment_type: record.payment_type,
            payment_date: record.payment_date,
            timestamp: now,
        });
        Ok(record)
    }

    /// edit a payment that has no voucher yet
    pub fn update_payment(
        &mut self,
        payment_id: PaymentId,
        update: &PaymentUpdate,
    ) -> Result<PaymentRecord> {
        let mut record = self.store.payment(payment_id)?;
        if update.is_empty() {
            return Ok(record);
        }

        let now = self.time.now();
        if let Err(e) = update.apply(&mut record, now) {
            warn!(payment = %payment_id, error = %e, "payment update refused");
            return Err(e);
        }
        self.store.replace_payment(record.clone())?;

        self.events.emit(Event::PaymentUpdated {
            borrower_id: record.borrower_id,
            payment_id,
            timestamp: now,
        });
        Ok(record)
    }

    pub fn delete_payment(&mut self, payment_id: PaymentId) -> Result<PaymentRecord> {
        let record = self.store.delete_payment(payment_id)?;
        info!(payment = %payment_id, borrower = %record.borrower_id, "payment deleted");
        self.events.emit(Event::PaymentDeleted {
            borrower_id: record.borrower_id,
            payment_id,
            amount: record.amount,
            timestamp: self.time.now(),
        });
        Ok(record)
    }

    /// upload a voucher and link it to the payment. a payment takes one voucher only.
    pub fn attach_voucher(
        &mut self,
        payment_id: PaymentId,
        upload: &VoucherUpload,
    ) -> Result<PaymentRecord> {
        if let Err(e) = self.config.voucher_policy.check(upload) {
            warn!(payment = %payment_id, error = %e, "voucher rejected");
            return Err(e);
        }

        let mut record = self.store.payment(payment_id)?;
        if record.has_voucher() {
            return Err(TrackerError::PaymentLocked { id: payment_id });
        }

        let path = upload.storage_path(payment_id);
        let voucher_ref = self.vouchers.upload(&path, upload)?;
        debug!(payment = %payment_id, path = %path, "voucher uploaded");

        let now = self.time.now();
        record.voucher_ref = Some(voucher_ref.clone());
        record.updated_at = now;
        self.store.replace_payment(record.clone())?;

        self.events.emit(Event::VoucherAttached {
            borrower_id: record.borrower_id,
            payment_id,
            voucher_ref,
            timestamp: now,
        });
        Ok(record)
    }

    pub fn borrower_summary(&self, borrower_id: BorrowerId) -> Result<BorrowerSummary> {
        let profile = self.require_borrower(borrower_id)?;
        let (terms, _, snapshot) = self.evaluate(&profile)?;
        Ok(BorrowerSummary::new(&profile, terms, snapshot))
    }

    /// one summary per borrower, ordered as the store lists them
    pub fn borrower_summaries(&self) -> Result<Vec<BorrowerSummary>> {
        self.store
            .borrowers()?
            .iter()
            .map(|profile| -> Result<BorrowerSummary> {
                let (terms, _, snapshot) = self.evaluate(profile)?;
                Ok(BorrowerSummary::new(profile, terms, snapshot))
            })
            .collect()
    }

    /// lender overview across all borrowers
    pub fn portfolio(&self) -> Result<PortfolioSummary> {
        let borrowers = self.borrower_summaries()?;
        Ok(PortfolioSummary::from_borrowers(&borrowers))
    }

    pub fn borrower_view(&self, borrower_id: BorrowerId) -> Result<BorrowerView> {
        let profile = self.require_borrower(borrower_id)?;
        let (terms, mut payments, snapshot) = self.evaluate(&profile)?;
        payments.truncate(self.config.recent_payments_limit);
        Ok(BorrowerView::build(&profile, &terms, &snapshot, payments))
    }
}
