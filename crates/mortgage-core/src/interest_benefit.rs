use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::params::LoanParameters;
use crate::schedule::build_schedule;
use crate::types::{Money, Scheme};
use crate::MortgageResult;

/// Interest saved by paying an extra amount every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestBenefit {
    pub scheme: Scheme,
    pub extra_monthly_repayment: Money,
    pub interest_without_extra: Money,
    pub interest_with_extra: Money,
    pub interest_saved: Money,
    pub months_without_extra: u32,
    pub months_with_extra: u32,
    pub months_saved: u32,
}

/// Total interest of `params.scheme` without the extra repayment minus the
/// total interest with it.
pub fn compute_interest_benefit(params: &LoanParameters) -> MortgageResult<InterestBenefit> {
    params.validate()?;

    let baseline_params = LoanParameters {
        extra_monthly_repayment: Decimal::ZERO,
        ..params.clone()
    };
    let baseline = build_schedule(&baseline_params, params.scheme)?;
    let accelerated = build_schedule(params, params.scheme)?;

    let months_without_extra = baseline.months_to_payoff();
    let months_with_extra = accelerated.months_to_payoff();

    Ok(InterestBenefit {
        scheme: params.scheme,
        extra_monthly_repayment: params.extra_monthly_repayment,
        interest_without_extra: baseline.totals.interest_payment,
        interest_with_extra: accelerated.totals.interest_payment,
        interest_saved: baseline.totals.interest_payment - accelerated.totals.interest_payment,
        months_without_extra,
        months_with_extra,
        months_saved: months_without_extra.saturating_sub(months_with_extra),
    })
}
