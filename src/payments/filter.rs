use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::payments::PaymentRecord;

/// payment listing filter: free-text search and calendar month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFilter {
    /// matched case-insensitively against notes, or as a substring of the amount
    pub search: Option<String>,
    pub month: Option<YearMonth>,
}

impl PaymentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub fn matches(&self, payment: &PaymentRecord) -> bool {
        self.matches_search(payment) && self.matches_month(payment)
    }

    fn matches_search(&self, payment: &PaymentRecord) -> bool {
        let term = match self.search.as_deref() {
            Some(term) if !term.is_empty() => term,
            _ => return true,
        };

        let in_notes = payment
            .notes
            .as_deref()
            .map(|notes| notes.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(false);
        // amounts print without trailing zeros, so 150.50 reads as "150.5"
        let amount = payment.amount.as_decimal().normalize().to_string();

        in_notes || amount.contains(term)
    }

    fn matches_month(&self, payment: &PaymentRecord) -> bool {
        self.month.map_or(true, |month| month.contains(payment.payment_date))
    }

    /// matching payments, in their original order
    pub fn apply(&self, payments: &[PaymentRecord]) -> FilteredPayments {
        FilteredPayments {
            payments: payments.iter().filter(|p| self.matches(p)).cloned().collect(),
        }
    }
}

/// result of a filtered listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredPayments {
    pub payments: Vec<PaymentRecord>,
}

impl FilteredPayments {
    pub fn total(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::NewPayment;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn payment(amount: &str, y: i32, m: u32, d: u32, notes: Option<&str>) -> PaymentRecord {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let on = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let mut new = NewPayment::minimum(Money::from_str_exact(amount).unwrap(), on);
        if let Some(notes) = notes {
            new = new.with_notes(notes);
        }
        new.into_record(Uuid::new_v4(), now)
    }

    fn listing() -> Vec<PaymentRecord> {
        vec![
            payment("100", 2024, 11, 26, Some("Transferencia BANCO")),
            payment("150.50", 2024, 11, 28, None),
            payment("100", 2024, 10, 25, Some("efectivo")),
            payment("250", 2023, 11, 26, Some("transferencia")),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let all = PaymentFilter::new().apply(&listing());
        assert_eq!(all.len(), 4);
        assert_eq!(all.total(), Money::from_str_exact("600.50").unwrap());

        let blank = PaymentFilter::new().search("").apply(&listing());
        assert_eq!(blank.len(), 4);
    }

    #[test]
    fn test_search_notes_ignores_case() {
        let found = PaymentFilter::new().search("TRANSFER").apply(&listing());
        assert_eq!(found.len(), 2);
        assert_eq!(found.total(), Money::from_major(350));

        let found = PaymentFilter::new().search("banco").apply(&listing());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_search_amount_substring() {
        let found = PaymentFilter::new().search("50.5").apply(&listing());
        assert_eq!(found.len(), 1);
        assert_eq!(found.payments[0].amount, Money::from_str_exact("150.50").unwrap());

        // "150.50" is shown as 150.5
        assert!(PaymentFilter::new().search("150.50").apply(&listing()).is_empty());

        let found = PaymentFilter::new().search("25").apply(&listing());
        assert_eq!(found.len(), 1);
        assert_eq!(found.total(), Money::from_major(250));
    }

    #[test]
    fn test_month_requires_same_year() {
        let november = PaymentFilter::new().month(YearMonth::new(2024, 11));
        let found = november.apply(&listing());
        assert_eq!(found.len(), 2);
        assert_eq!(found.total(), Money::from_str_exact("250.50").unwrap());

        let found = november.search("transferencia").apply(&listing());
        assert_eq!(found.len(), 1);
        assert_eq!(found.payments[0].payment_date.to_string(), "2024-11-26");
    }
}
