//! Annuity and linear mortgage amortization with decimal precision.
//!
//! [`calculator::calculate_mortgage`] is the request-level entry point: it
//! builds the selected scheme's month-by-month schedule, compares each month's
//! after-tax cost with the other scheme and discounts the difference.

pub mod calculator;
pub mod comparison;
pub mod error;
pub mod interest_benefit;
pub mod params;
pub mod schedule;
pub mod tax;
pub mod time_value;
pub mod types;

pub use calculator::{calculate_mortgage, MortgageOutput};
pub use error::MortgageError;
pub use params::{LoanForm, LoanParameters};
pub use schedule::{AmortizationSchedule, ScheduleTotals};
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
