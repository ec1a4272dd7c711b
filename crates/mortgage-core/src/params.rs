use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::MortgageError;
use crate::types::{Money, Scheme};
use crate::MortgageResult;

/// Inputs for one mortgage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_interest_rate_percent: Decimal,
    pub term_years: u32,
    #[serde(default)]
    pub scheme: Scheme,
    /// Additional principal paid every month on top of the scheduled amount.
    #[serde(default)]
    pub extra_monthly_repayment: Money,
    /// Annual discount factor used for the time-value column.
    #[serde(default)]
    pub discount_factor_percent: Decimal,
}

impl LoanParameters {
    /// Parameters with no extra repayment and no discounting.
    pub fn new(
        principal: Money,
        annual_interest_rate_percent: Decimal,
        term_years: u32,
        scheme: Scheme,
    ) -> Self {
        Self {
            principal,
            annual_interest_rate_percent,
            term_years,
            scheme,
            extra_monthly_repayment: Decimal::ZERO,
            discount_factor_percent: Decimal::ZERO,
        }
    }

    pub fn with_extra_repayment(mut self, extra: Money) -> Self {
        self.extra_monthly_repayment = extra;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor_percent: Decimal) -> Self {
        self.discount_factor_percent = discount_factor_percent;
        self
    }

    /// Number of scheduled monthly payments.
    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    pub fn validate(&self) -> MortgageResult<()> {
        validate_loan(
            self.principal,
            self.annual_interest_rate_percent,
            self.term_years,
            self.extra_monthly_repayment,
        )?;
        if self.discount_factor_percent < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "discount_factor_percent",
                "Discount factor cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Range checks shared by the schedule builders.
pub(crate) fn validate_loan(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    extra: Money,
) -> MortgageResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "principal",
            "Loan amount must be positive",
        ));
    }
    if principal > MAX_PRINCIPAL {
        return Err(MortgageError::invalid(
            "principal",
            format!("Loan amount cannot exceed {MAX_PRINCIPAL}"),
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_interest_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    if term_years == 0 {
        return Err(MortgageError::invalid(
            "term_years",
            "Term must be at least 1 year",
        ));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(MortgageError::invalid(
            "term_years",
            format!("Term cannot exceed {MAX_TERM_YEARS} years"),
        ));
    }
    if extra < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "extra_monthly_repayment",
            "Extra repayment cannot be negative",
        ));
    }
    if extra > MAX_PRINCIPAL {
        return Err(MortgageError::invalid(
            "extra_monthly_repayment",
            format!("Extra repayment cannot exceed {MAX_PRINCIPAL}"),
        ));
    }
    Ok(())
}

/// Longest term accepted; keeps the compounding powers inside the decimal range.
pub const MAX_TERM_YEARS: u32 = 100;

/// Largest loan amount, and largest extra repayment, accepted. Twelve hundred
/// months of payments on this amount still sum well inside the decimal range.
pub const MAX_PRINCIPAL: Decimal = dec!(1000000000000000);

/// Raw text of the calculator form, exactly as a user typed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanForm {
    pub principal: String,
    pub annual_interest_rate_percent: String,
    pub term_years: String,
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub extra_monthly_repayment: String,
    #[serde(default)]
    pub discount_factor_percent: String,
}

impl LoanForm {
    /// Parse and validate every field. Empty optional fields become zero and
    /// an empty scheme means annuity.
    pub fn parse(&self) -> MortgageResult<LoanParameters> {
        let principal = parse_required("principal", &self.principal)?;
        let rate = parse_required("annual_interest_rate_percent", &self.annual_interest_rate_percent)?;
        let term = self.term_years.trim();
        if term.is_empty() {
            return Err(MortgageError::invalid("term_years", "value is required"));
        }
        let term_years = term.parse::<u32>().map_err(|_| {
            MortgageError::invalid(
                "term_years",
                format!("'{term}' is not a whole, non-negative number of years"),
            )
        })?;
        let scheme = if self.scheme.trim().is_empty() {
            Scheme::default()
        } else {
            self.scheme.parse()?
        };

        let params = LoanParameters {
            principal,
            annual_interest_rate_percent: rate,
            term_years,
            scheme,
            extra_monthly_repayment: parse_optional(
                "extra_monthly_repayment",
                &self.extra_monthly_repayment,
            )?,
            discount_factor_percent: parse_optional(
                "discount_factor_percent",
                &self.discount_factor_percent,
            )?,
        };
        params.validate()?;
        Ok(params)
    }
}

fn parse_required(field: &str, raw: &str) -> MortgageResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MortgageError::invalid(field, "value is required"));
    }
    parse_number(field, trimmed)
}

fn parse_optional(field: &str, raw: &str) -> MortgageResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_number(field, trimmed)
}

fn parse_number(field: &str, raw: &str) -> MortgageResult<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| MortgageError::invalid(field, format!("'{raw}' is not a finite number")))
}
