use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a borrower (user row id)
pub type BorrowerId = Uuid;

/// unique identifier for a payment record
pub type PaymentId = Uuid;

/// role of a tracker user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Borrower,
    Lender,
}

/// how a payment counts against the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// satisfies the month's required installment
    #[default]
    Minimum,
    /// paid on top of the installment, accelerates payoff
    Extra,
}

/// overall standing of a borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// up to date
    AlDia,
    /// current installment is due now
    Pendiente,
    /// at least one installment missed
    EnMora,
    /// extra payments made beyond the schedule
    Adelantado,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::AlDia => "Al Día",
            PaymentStatus::Pendiente => "Pendiente",
            PaymentStatus::EnMora => "En Mora",
            PaymentStatus::Adelantado => "Adelantado",
        };
        f.write_str(label)
    }
}

/// standing of the current calendar month only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentMonthStatus {
    Pagado,
    Pendiente,
    EnMora,
    /// something paid this month, but less than the installment and no minimum
    Adelantado,
}

impl fmt::Display for CurrentMonthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CurrentMonthStatus::Pagado => "Pagado",
            CurrentMonthStatus::Pendiente => "Pendiente",
            CurrentMonthStatus::EnMora => "En Mora",
            CurrentMonthStatus::Adelantado => "Adelantado",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentStatus::AlDia).unwrap(), "\"al_dia\"");
        assert_eq!(serde_json::to_string(&CurrentMonthStatus::EnMora).unwrap(), "\"en_mora\"");
        assert_eq!(serde_json::to_string(&PaymentType::Extra).unwrap(), "\"extra\"");

        let role: UserRole = serde_json::from_str("\"lender\"").unwrap();
        assert_eq!(role, UserRole::Lender);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentStatus::AlDia.to_string(), "Al Día");
        assert_eq!(CurrentMonthStatus::Pagado.to_string(), "Pagado");
    }
}
