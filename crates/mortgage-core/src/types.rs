use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MortgageError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless the field name says `percent`.
pub type Rate = Decimal;

/// Repayment scheme of a mortgage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Fixed total monthly payment; the principal/interest split shifts over time.
    #[default]
    Annuity,
    /// Fixed principal portion per month; interest and total payment decline.
    Linear,
}

impl Scheme {
    /// The scheme this one is compared against.
    pub fn other(self) -> Scheme {
        match self {
            Scheme::Annuity => Scheme::Linear,
            Scheme::Linear => Scheme::Annuity,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Annuity => f.write_str("annuity"),
            Scheme::Linear => f.write_str("linear"),
        }
    }
}

impl FromStr for Scheme {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annuity" | "annuitair" | "annuïtair" => Ok(Scheme::Annuity),
            "linear" | "lineair" => Ok(Scheme::Linear),
            other => Err(MortgageError::invalid(
                "scheme",
                format!("unknown scheme '{other}', expected 'annuity' or 'linear'"),
            )),
        }
    }
}

/// One elapsed month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// Month number (1-indexed).
    pub month: u32,
    pub principal_payment: Money,
    pub interest_payment: Money,
    /// Principal plus interest, extra repayment included.
    pub total_payment: Money,
    /// Principal plus the tax-relieved share of interest.
    pub after_tax_monthly_cost: Money,
    /// Balance after this month's principal payment.
    pub remaining_balance: Money,
    /// After-tax cost minus the same month's after-tax cost under the other scheme.
    pub difference_vs_alternate_scheme: Money,
    /// `difference_vs_alternate_scheme` carried through the discount factor.
    pub discounted_value: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
