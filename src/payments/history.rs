use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::payments::PaymentRecord;

/// payments of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub amount: Money,
    pub payment_count: u32,
    /// running total up to and including this month
    pub cumulative: Money,
}

/// month-by-month payment series, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyHistory {
    pub months: Vec<MonthlyTotal>,
}

impl MonthlyHistory {
    pub fn from_payments(payments: &[PaymentRecord]) -> Self {
        let mut buckets: BTreeMap<YearMonth, (Money, u32)> = BTreeMap::new();
        for payment in payments {
            let entry = buckets.entry(payment.month()).or_insert((Money::ZERO, 0));
            entry.0 += payment.amount;
            entry.1 += 1;
        }

        let mut cumulative = Money::ZERO;
        let months = buckets
            .into_iter()
            .map(|(month, (amount, payment_count))| {
                cumulative += amount;
                MonthlyTotal {
                    month,
                    amount,
                    payment_count,
                    cumulative,
                }
            })
            .collect();

        Self { months }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn total(&self) -> Money {
        self.months.last().map(|m| m.cumulative).unwrap_or(Money::ZERO)
    }

    pub fn get(&self, month: YearMonth) -> Option<&MonthlyTotal> {
        self.months.iter().find(|m| m.month == month)
    }
}
