//! status resolution as ordered rule tables.
//!
//! each table is scanned top to bottom and the first matching rule wins;
//! when nothing matches the table's stated default applies.

use crate::decimal::Money;
use crate::types::{CurrentMonthStatus, PaymentStatus};

/// a guarded rule: when `applies` holds for the facts, resolve to `status`
pub struct Rule<F, S> {
    pub name: &'static str,
    pub applies: fn(&F) -> bool,
    pub status: S,
}

/// first matching rule's status, or `default`
pub fn resolve<F, S: Copy>(rules: &[Rule<F, S>], facts: &F, default: S) -> S {
    rules
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map(|rule| rule.status)
        .unwrap_or(default)
}

/// what is known about the current calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthFacts {
    pub has_minimum: bool,
    pub total_paid: Money,
    pub monthly_payment: Money,
    pub in_due_window: bool,
    pub due_window_passed: bool,
}

pub const CURRENT_MONTH_DEFAULT: CurrentMonthStatus = CurrentMonthStatus::Pendiente;

pub const CURRENT_MONTH_RULES: &[Rule<MonthFacts, CurrentMonthStatus>] = &[
    Rule {
        name: "minimum paid this month",
        applies: minimum_paid,
        status: CurrentMonthStatus::Pagado,
    },
    Rule {
        name: "partial amount paid this month",
        applies: partially_paid,
        status: CurrentMonthStatus::Adelantado,
    },
    Rule {
        name: "inside due window",
        applies: month_in_due_window,
        status: CurrentMonthStatus::Pendiente,
    },
    Rule {
        name: "due window closed",
        applies: due_window_passed,
        status: CurrentMonthStatus::EnMora,
    },
];

fn minimum_paid(f: &MonthFacts) -> bool {
    f.has_minimum
}

fn partially_paid(f: &MonthFacts) -> bool {
    f.total_paid.is_positive() && f.total_paid < f.monthly_payment
}

fn month_in_due_window(f: &MonthFacts) -> bool {
    f.in_due_window
}

fn due_window_passed(f: &MonthFacts) -> bool {
    f.due_window_passed
}

/// inputs to the overall standing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingFacts {
    pub months_in_mora: u32,
    pub current_month: CurrentMonthStatus,
    pub in_due_window: bool,
    pub extra_payments: Money,
}

pub const STANDING_DEFAULT: PaymentStatus = PaymentStatus::AlDia;

pub const STANDING_RULES: &[Rule<StandingFacts, PaymentStatus>] = &[
    Rule {
        name: "missed a past installment",
        applies: has_mora,
        status: PaymentStatus::EnMora,
    },
    Rule {
        name: "current installment not yet due",
        applies: pending_before_window,
        status: PaymentStatus::AlDia,
    },
    Rule {
        name: "current installment due now",
        applies: pending_in_window,
        status: PaymentStatus::Pendiente,
    },
    Rule {
        name: "current installment overdue",
        applies: current_month_overdue,
        status: PaymentStatus::EnMora,
    },
    Rule {
        name: "extra payments made",
        applies: has_extra_payments,
        status: PaymentStatus::Adelantado,
    },
];

fn has_mora(f: &StandingFacts) -> bool {
    f.months_in_mora > 0
}

fn pending_before_window(f: &StandingFacts) -> bool {
    f.current_month == CurrentMonthStatus::Pendiente && !f.in_due_window
}

fn pending_in_window(f: &StandingFacts) -> bool {
    f.current_month == CurrentMonthStatus::Pendiente && f.in_due_window
}

fn current_month_overdue(f: &StandingFacts) -> bool {
    f.current_month == CurrentMonthStatus::EnMora
}

fn has_extra_payments(f: &StandingFacts) -> bool {
    f.extra_payments.is_positive()
}

pub fn current_month_status(facts: &MonthFacts) -> CurrentMonthStatus {
    resolve(CURRENT_MONTH_RULES, facts, CURRENT_MONTH_DEFAULT)
}

pub fn standing(facts: &StandingFacts) -> PaymentStatus {
    resolve(STANDING_RULES, facts, STANDING_DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(day: u32) -> MonthFacts {
        MonthFacts {
            has_minimum: false,
            total_paid: Money::ZERO,
            monthly_payment: Money::from_major(100),
            in_due_window: (25..=30).contains(&day),
            due_window_passed: day > 30,
        }
    }

    fn standing_facts(current_month: CurrentMonthStatus) -> StandingFacts {
        StandingFacts {
            months_in_mora: 0,
            current_month,
            in_due_window: false,
            extra_payments: Money::ZERO,
        }
    }

    #[test]
    fn test_current_month_rule_order() {
        let mut facts = month(31);
        facts.has_minimum = true;
        facts.total_paid = Money::from_major(50);
        assert_eq!(current_month_status(&facts), CurrentMonthStatus::Pagado);

        facts.has_minimum = false;
        assert_eq!(current_month_status(&facts), CurrentMonthStatus::Adelantado);

        facts.total_paid = Money::ZERO;
        assert_eq!(current_month_status(&facts), CurrentMonthStatus::EnMora);

        assert_eq!(current_month_status(&month(27)), CurrentMonthStatus::Pendiente);
        assert_eq!(current_month_status(&month(3)), CurrentMonthStatus::Pendiente);
    }

    #[test]
    fn test_full_extra_amount_is_not_partial() {
        let mut facts = month(10);
        facts.total_paid = Money::from_major(100);
        assert_eq!(current_month_status(&facts), CurrentMonthStatus::Pendiente);
    }

    #[test]
    fn test_mora_outranks_everything() {
        let mut facts = standing_facts(CurrentMonthStatus::Pagado);
        facts.months_in_mora = 1;
        facts.extra_payments = Money::from_major(500);
        assert_eq!(standing(&facts), PaymentStatus::EnMora);
    }

    #[test]
    fn test_standing_rules() {
        assert_eq!(standing(&standing_facts(CurrentMonthStatus::Pendiente)), PaymentStatus::AlDia);

        let mut facts = standing_facts(CurrentMonthStatus::Pendiente);
        facts.in_due_window = true;
        assert_eq!(standing(&facts), PaymentStatus::Pendiente);

        assert_eq!(standing(&standing_facts(CurrentMonthStatus::EnMora)), PaymentStatus::EnMora);

        let mut facts = standing_facts(CurrentMonthStatus::Pagado);
        facts.extra_payments = Money::from_major(20);
        assert_eq!(standing(&facts), PaymentStatus::Adelantado);

        assert_eq!(standing(&standing_facts(CurrentMonthStatus::Pagado)), PaymentStatus::AlDia);
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<_> = CURRENT_MONTH_RULES.iter().map(|r| r.name).collect();
        names.extend(STANDING_RULES.iter().map(|r| r.name));
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
