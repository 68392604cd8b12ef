use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{has_minimum_in, NewPayment, PaymentRecord};
use crate::types::PaymentType;

const MINIMUM_NOTE: &str = "(Pago mínimo)";
const EXTRA_NOTE: &str = "(Pago extra)";

/// what should happen to a submitted payment, given what the month already holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentAdvice {
    /// store as submitted
    Accept { payment: NewPayment },
    /// the month already has a minimum; confirming stores this one as extra
    /// with its amount unchanged. callers wanting a different amount submit a
    /// new extra instead of confirming.
    DuplicateMinimum { payment: NewPayment },
    /// extra smaller than the installment in a month with no minimum yet;
    /// confirming stores it as extra anyway
    ExtraBelowMinimum { payment: NewPayment, minimum: Money },
    /// extra larger than the installment in a month with no minimum yet;
    /// confirming stores one minimum plus one extra for the difference
    Split { minimum: NewPayment, extra: NewPayment },
}

impl PaymentAdvice {
    /// whether the borrower has to confirm before anything is stored
    pub fn needs_confirmation(&self) -> bool {
        !matches!(self, PaymentAdvice::Accept { .. })
    }

    /// payments to store once the advice is confirmed
    pub fn into_payments(self) -> Vec<NewPayment> {
        match self {
            PaymentAdvice::Accept { payment } => vec![payment],
            PaymentAdvice::DuplicateMinimum { mut payment } => {
                payment.payment_type = PaymentType::Extra;
                vec![payment]
            }
            PaymentAdvice::ExtraBelowMinimum { payment, .. } => vec![payment],
            PaymentAdvice::Split { minimum, extra } => vec![minimum, extra],
        }
    }
}

/// classifies submitted payments against the month's existing records
#[derive(Debug, Clone, Copy)]
pub struct PaymentAdvisor {
    monthly_payment: Money,
}

impl PaymentAdvisor {
    pub fn new(monthly_payment: Money) -> Self {
        Self { monthly_payment }
    }

    pub fn advise(&self, payment: NewPayment, existing: &[PaymentRecord]) -> Result<PaymentAdvice> {
        payment.validate()?;

        let month = YearMonth::from_date(payment.payment_date);
        let month_has_minimum = has_minimum_in(existing, month);

        let advice = match payment.payment_type {
            PaymentType::Minimum if month_has_minimum => {
                PaymentAdvice::DuplicateMinimum { payment }
            }
            PaymentType::Extra if !month_has_minimum && self.monthly_payment.is_positive() => {
                if payment.amount < self.monthly_payment {
                    PaymentAdvice::ExtraBelowMinimum {
                        payment,
                        minimum: self.monthly_payment,
                    }
                } else if payment.amount > self.monthly_payment {
                    self.split(payment)
                } else {
                    PaymentAdvice::Accept { payment }
                }
            }
            _ => PaymentAdvice::Accept { payment },
        };

        Ok(advice)
    }

    fn split(&self, payment: NewPayment) -> PaymentAdvice {
        let notes = payment.notes.as_deref().unwrap_or("");
        let minimum = NewPayment {
            amount: self.monthly_payment,
            payment_date: payment.payment_date,
            payment_type: PaymentType::Minimum,
            notes: Some(format!("{} {}", notes, MINIMUM_NOTE).trim().to_string()),
        };
        let extra = NewPayment {
            amount: payment.amount - self.monthly_payment,
            payment_date: payment.payment_date,
            payment_type: PaymentType::Extra,
            notes: Some(format!("{} {}", notes, EXTRA_NOTE).trim().to_string()),
        };
        PaymentAdvice::Split { minimum, extra }
    }
}
