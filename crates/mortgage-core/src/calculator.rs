use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::comparison::pair_with_alternate;
use crate::interest_benefit::{compute_interest_benefit, InterestBenefit};
use crate::params::LoanParameters;
use crate::schedule::{build_schedule, ScheduleTotals};
use crate::types::{with_metadata, ComputationOutput, Money, PaymentPeriod, Scheme};
use crate::MortgageResult;

/// Result of a full mortgage calculation for the selected scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub scheme: Scheme,
    /// Annuity: the level payment. Linear: the constant principal portion.
    pub fixed_monthly_payment: Money,
    pub months_to_payoff: u32,
    pub periods: Vec<PaymentPeriod>,
    pub totals: ScheduleTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_benefit: Option<InterestBenefit>,
}

/// Build the selected scheme's schedule, compare it month by month with the
/// other scheme and wrap the result with methodology and warnings.
pub fn calculate_mortgage(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;

    let selected = build_schedule(params, params.scheme)?;
    let alternate = build_schedule(params, params.scheme.other())?;
    let compared = pair_with_alternate(&selected, &alternate, params)?;

    let total_months = params.total_months();
    let months_to_payoff = compared.months_to_payoff();

    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Interest rate is 0%; annuity payment is principal / months".into());
    }
    if months_to_payoff < total_months {
        warnings.push(format!(
            "Loan retired after {months_to_payoff} of {total_months} months by the extra repayment"
        ));
    }
    if selected.periods.len() != alternate.periods.len() {
        warnings.push(format!(
            "{} schedule has {} months, {} schedule has {}; unmatched months compared against 0",
            selected.scheme,
            selected.periods.len(),
            alternate.scheme,
            alternate.periods.len(),
        ));
    }
    if params.discount_factor_percent.is_zero() {
        warnings.push("Discount factor is 0%; discounted value equals the negated difference".into());
    }
    for w in &warnings {
        tracing::warn!("{w}");
    }

    let interest_benefit = if params.extra_monthly_repayment > Decimal::ZERO {
        Some(compute_interest_benefit(params)?)
    } else {
        None
    };

    let output = MortgageOutput {
        scheme: compared.scheme,
        fixed_monthly_payment: compared.fixed_monthly_payment,
        months_to_payoff,
        totals: compared.totals,
        periods: compared.periods,
        interest_benefit,
    };

    let methodology = match params.scheme {
        Scheme::Annuity => "Annuity amortization compared with linear",
        Scheme::Linear => "Linear amortization compared with annuity",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_interest_rate_percent": params.annual_interest_rate_percent.to_string(),
            "term_years": params.term_years,
            "extra_monthly_repayment": params.extra_monthly_repayment.to_string(),
            "discount_factor_percent": params.discount_factor_percent.to_string(),
            "tax_relief_factor": crate::tax::TAX_RELIEF_FACTOR.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// JSON-string boundary around [`calculate_mortgage`].
pub fn calculate_mortgage_json(input_json: &str) -> MortgageResult<String> {
    let params: LoanParameters = serde_json::from_str(input_json)?;
    let output = calculate_mortgage(&params)?;
    Ok(serde_json::to_string(&output)?)
}

/// JSON-string boundary around [`compute_interest_benefit`].
pub fn interest_benefit_json(input_json: &str) -> MortgageResult<String> {
    let params: LoanParameters = serde_json::from_str(input_json)?;
    let benefit = compute_interest_benefit(&params)?;
    Ok(serde_json::to_string(&benefit)?)
}
