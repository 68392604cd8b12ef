pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod format;
pub mod payments;
pub mod portfolio;
pub mod stats;
pub mod store;
pub mod terms;
pub mod tracker;
pub mod types;
pub mod view;

// re-export key types
pub use calendar::{DueWindow, YearMonth};
pub use config::TrackerConfig;
pub use decimal::{Money, Percentage};
pub use errors::{Result, TrackerError};
pub use events::{Event, EventStore};
pub use format::TimeRemaining;
pub use payments::{
    FilteredPayments, MonthlyHistory, MonthlyTotal, NewPayment, PaymentAdvice, PaymentAdvisor,
    PaymentFilter, PaymentRecord, PaymentUpdate, VoucherPolicy, VoucherUpload,
};
pub use portfolio::{BorrowerSummary, PortfolioSummary};
pub use stats::{compute_stats, LoanStatsSnapshot, StatsEngine};
pub use store::{InMemoryStore, InMemoryVoucherStorage, LoanStore, VoucherStorage};
pub use terms::{BorrowerProfile, LoanTerms};
pub use tracker::LoanTracker;
pub use types::{BorrowerId, CurrentMonthStatus, PaymentId, PaymentStatus, PaymentType, UserRole};
pub use view::BorrowerView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
