use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;

/// payoff time left, rendered in years and months
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeRemaining {
    /// no installment configured
    NotApplicable,
    /// remaining monthly installments
    Installments(u32),
}

impl TimeRemaining {
    pub fn for_installments(monthly_payment: Money, remaining: u32) -> Self {
        if monthly_payment.is_positive() {
            TimeRemaining::Installments(remaining)
        } else {
            TimeRemaining::NotApplicable
        }
    }

    /// installments needed to pay off `remaining_amount`
    pub fn for_balance(monthly_payment: Money, remaining_amount: Money) -> Self {
        Self::for_installments(monthly_payment, remaining_amount.installments_of(monthly_payment))
    }

    pub fn installments(&self) -> u32 {
        match self {
            TimeRemaining::NotApplicable => 0,
            TimeRemaining::Installments(n) => *n,
        }
    }
}

fn years(n: u32) -> String {
    format!("{} {}", n, if n == 1 { "año" } else { "años" })
}

fn months(n: u32) -> String {
    format!("{} {}", n, if n == 1 { "mes" } else { "meses" })
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            TimeRemaining::NotApplicable => return f.write_str("N/A"),
            TimeRemaining::Installments(n) => *n,
        };
        let (y, m) = (n / 12, n % 12);
        match (y, m) {
            (0, m) => f.write_str(&months(m)),
            (y, 0) => f.write_str(&years(y)),
            (y, m) => write!(f, "{} y {}", years(y), months(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering() {
        let monthly = Money::from_major(100);
        assert_eq!(TimeRemaining::for_installments(monthly, 0).to_string(), "0 meses");
        assert_eq!(TimeRemaining::for_installments(monthly, 1).to_string(), "1 mes");
        assert_eq!(TimeRemaining::for_installments(monthly, 11).to_string(), "11 meses");
        assert_eq!(TimeRemaining::for_installments(monthly, 12).to_string(), "1 año");
        assert_eq!(TimeRemaining::for_installments(monthly, 24).to_string(), "2 años");
        assert_eq!(TimeRemaining::for_installments(monthly, 13).to_string(), "1 año y 1 mes");
        assert_eq!(TimeRemaining::for_installments(monthly, 29).to_string(), "2 años y 5 meses");
    }

    #[test]
    fn test_not_applicable_without_installment() {
        let t = TimeRemaining::for_balance(Money::ZERO, Money::from_major(900));
        assert_eq!(t, TimeRemaining::NotApplicable);
        assert_eq!(t.to_string(), "N/A");
        assert_eq!(t.installments(), 0);
    }

    #[test]
    fn test_from_balance() {
        let t = TimeRemaining::for_balance(Money::from_major(300), Money::from_major(1_000));
        assert_eq!(t, TimeRemaining::Installments(4));
    }
}
