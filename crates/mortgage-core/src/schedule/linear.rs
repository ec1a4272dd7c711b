use rust_decimal::Decimal;

use super::{overflow, principal_due, scheduled_period};
use crate::params::validate_loan;
use crate::time_value::monthly_rate;
use crate::types::{Money, PaymentPeriod};
use crate::MortgageResult;

/// Linear schedule: the same share of the original principal every month,
/// plus the extra repayment, with interest on the declining balance.
pub fn compute_linear_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    extra: Money,
) -> MortgageResult<Vec<PaymentPeriod>> {
    linear_schedule(principal, annual_rate_percent, term_years, extra).map(|(_, periods)| periods)
}

pub(crate) fn linear_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    extra: Money,
) -> MortgageResult<(Money, Vec<PaymentPeriod>)> {
    validate_loan(principal, annual_rate_percent, term_years, extra)?;

    let rate = monthly_rate(annual_rate_percent);
    let total_months = term_years * 12;
    let fixed_portion = principal / Decimal::from(total_months);

    let mut balance = principal;
    let mut periods = Vec::with_capacity(total_months as usize);

    for month in 1..=total_months {
        if balance <= Decimal::ZERO {
            tracing::debug!(month, "linear loan retired early");
            break;
        }

        let interest = balance.checked_mul(rate).ok_or_else(|| overflow("monthly interest"))?;
        let scheduled = fixed_portion
            .checked_add(extra)
            .ok_or_else(|| overflow("principal plus extra repayment"))?;
        let principal_payment = principal_due(scheduled, balance, month, total_months);
        balance -= principal_payment;

        periods.push(scheduled_period(month, principal_payment, interest, balance)?);
    }

    Ok((fixed_portion, periods))
}
