use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::DueWindow;
use crate::errors::{Result, TrackerError};
use crate::payments::VoucherPolicy;

/// tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// days of the month in which the installment is due
    pub due_window: DueWindow,
    /// fraction of the expected-by-now amount a borrower must have paid to be on track
    pub on_track_tolerance: Decimal,
    pub voucher_policy: VoucherPolicy,
    /// how many payments the recent-payments listing shows
    pub recent_payments_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            due_window: DueWindow::default(),
            on_track_tolerance: dec!(0.95),
            voucher_policy: VoucherPolicy::default(),
            recent_payments_limit: 5,
        }
    }
}

impl TrackerConfig {
    /// parse from json; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let window = self.due_window;
        // every month must contain the opening day
        if window.start_day == 0 || window.start_day > 28 || window.end_day > 31 {
            return Err(TrackerError::InvalidConfiguration {
                message: format!(
                    "due window must open on day 1..=28 and close by day 31, got {}..={}",
                    window.start_day, window.end_day
                ),
            });
        }
        if window.start_day > window.end_day {
            return Err(TrackerError::InvalidConfiguration {
                message: format!(
                    "due window starts after it ends: {}..={}",
                    window.start_day, window.end_day
                ),
            });
        }
        if self.on_track_tolerance <= Decimal::ZERO || self.on_track_tolerance > Decimal::ONE {
            return Err(TrackerError::InvalidConfiguration {
                message: format!(
                    "on-track tolerance must be in (0, 1], got {}",
                    self.on_track_tolerance
                ),
            });
        }
        if self.voucher_policy.allowed_content_types.is_empty() {
            return Err(TrackerError::InvalidConfiguration {
                message: "voucher policy allows no content types".to_string(),
            });
        }
        Ok(())
    }
}
