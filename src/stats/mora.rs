use chrono::NaiveDate;

use crate::calendar::{first_payment_month, YearMonth};
use crate::payments::{has_minimum_in, PaymentRecord};

/// past months, oldest first, in which no minimum payment was recorded.
///
/// the scan runs from the loan's first payment month up to but excluding
/// `current`; the current month is judged separately.
pub fn mora_months(
    loan_start: NaiveDate,
    payments: &[PaymentRecord],
    current: YearMonth,
) -> Vec<YearMonth> {
    first_payment_month(loan_start)
        .until(current)
        .filter(|month| !has_minimum_in(payments, *month))
        .collect()
}
