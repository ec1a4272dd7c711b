//! Month-by-month amortization schedules for the two repayment schemes.
//!
//! Both builders take the same raw inputs, fold any extra monthly repayment
//! into the principal portion of the payment, and stop early once the
//! balance is retired. The final scheduled month always clears whatever
//! balance is left so decimal residue never survives the term.

pub mod annuity;
pub mod linear;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::params::LoanParameters;
use crate::tax::compute_after_tax_cost;
use crate::types::{Money, PaymentPeriod, Scheme};
use crate::MortgageResult;

pub use annuity::compute_annuity_schedule;
pub use linear::compute_linear_schedule;

/// Column sums of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
    pub after_tax_monthly_cost: Money,
    pub difference_vs_alternate_scheme: Money,
    pub discounted_value: Money,
}

impl ScheduleTotals {
    pub fn from_periods(periods: &[PaymentPeriod]) -> MortgageResult<Self> {
        periods.iter().try_fold(Self::default(), |acc, p| -> MortgageResult<Self> {
            Ok(Self {
                principal_payment: sum(acc.principal_payment, p.principal_payment, "principal total")?,
                interest_payment: sum(acc.interest_payment, p.interest_payment, "interest total")?,
                total_payment: sum(acc.total_payment, p.total_payment, "payment total")?,
                after_tax_monthly_cost: sum(
                    acc.after_tax_monthly_cost,
                    p.after_tax_monthly_cost,
                    "after-tax total",
                )?,
                difference_vs_alternate_scheme: sum(
                    acc.difference_vs_alternate_scheme,
                    p.difference_vs_alternate_scheme,
                    "difference total",
                )?,
                discounted_value: sum(acc.discounted_value, p.discounted_value, "discounted total")?,
            })
        })
    }
}

fn sum(a: Money, b: Money, what: &str) -> MortgageResult<Money> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

/// Arithmetic left the decimal range while building a schedule.
pub(crate) fn overflow(what: &str) -> MortgageError {
    MortgageError::DegenerateSchedule(format!("{what} overflows the decimal range"))
}

/// A complete schedule for one scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub scheme: Scheme,
    /// Annuity: the level payment. Linear: the constant principal portion.
    pub fixed_monthly_payment: Money,
    pub periods: Vec<PaymentPeriod>,
    pub totals: ScheduleTotals,
}

impl AmortizationSchedule {
    pub(crate) fn new(
        scheme: Scheme,
        fixed_monthly_payment: Money,
        periods: Vec<PaymentPeriod>,
    ) -> MortgageResult<Self> {
        let totals = ScheduleTotals::from_periods(&periods)?;
        Ok(Self {
            scheme,
            fixed_monthly_payment,
            periods,
            totals,
        })
    }

    /// Number of months until the balance reaches zero.
    pub fn months_to_payoff(&self) -> u32 {
        self.periods.last().map(|p| p.month).unwrap_or(0)
    }

    pub fn final_balance(&self) -> Money {
        self.periods
            .last()
            .map(|p| p.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Build the schedule for `scheme` from `params`, ignoring `params.scheme`.
pub fn build_schedule(params: &LoanParameters, scheme: Scheme) -> MortgageResult<AmortizationSchedule> {
    let (fixed, periods) = match scheme {
        Scheme::Annuity => annuity::annuity_schedule(
            params.principal,
            params.annual_interest_rate_percent,
            params.term_years,
            params.extra_monthly_repayment,
        )?,
        Scheme::Linear => linear::linear_schedule(
            params.principal,
            params.annual_interest_rate_percent,
            params.term_years,
            params.extra_monthly_repayment,
        )?,
    };

    tracing::debug!(
        %scheme,
        months = periods.len(),
        fixed_monthly_payment = %fixed,
        "built amortization schedule"
    );

    AmortizationSchedule::new(scheme, fixed, periods)
}

/// A period as the builders emit it, before any scheme comparison.
pub(crate) fn scheduled_period(
    month: u32,
    principal_payment: Money,
    interest_payment: Money,
    remaining_balance: Money,
) -> MortgageResult<PaymentPeriod> {
    let total_payment = principal_payment
        .checked_add(interest_payment)
        .ok_or_else(|| overflow("monthly payment"))?;
    // Both parts are non-negative, so the after-tax cost is bounded by the total
    Ok(PaymentPeriod {
        month,
        principal_payment,
        interest_payment,
        total_payment,
        after_tax_monthly_cost: compute_after_tax_cost(principal_payment, interest_payment),
        remaining_balance,
        difference_vs_alternate_scheme: Decimal::ZERO,
        discounted_value: Decimal::ZERO,
    })
}

/// Principal to repay this month: the scheduled amount, capped at the
/// outstanding balance, or the whole balance in the last month of the term.
pub(crate) fn principal_due(scheduled: Money, balance: Money, month: u32, total_months: u32) -> Money {
    if month == total_months {
        balance
    } else {
        scheduled.max(Decimal::ZERO).min(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_fold_every_column() {
        let periods = vec![
            scheduled_period(1, dec!(100), dec!(10), dec!(900)).unwrap(),
            scheduled_period(2, dec!(100), dec!(9), dec!(800)).unwrap(),
        ];
        let totals = ScheduleTotals::from_periods(&periods).unwrap();
        assert_eq!(totals.principal_payment, dec!(200));
        assert_eq!(totals.interest_payment, dec!(19));
        assert_eq!(totals.total_payment, dec!(219));
        assert_eq!(totals.after_tax_monthly_cost, dec!(200) + dec!(0.6303) * dec!(19));
        assert_eq!(totals.difference_vs_alternate_scheme, Decimal::ZERO);
    }

    #[test]
    fn test_totals_overflow_is_degenerate() {
        let huge = PaymentPeriod {
            principal_payment: Decimal::MAX,
            ..scheduled_period(1, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO).unwrap()
        };
        let err = ScheduleTotals::from_periods(&[huge.clone(), huge]).unwrap_err();
        assert!(matches!(err, MortgageError::DegenerateSchedule(_)), "got {err:?}");
    }

    #[test]
    fn test_scheduled_period_overflow_is_degenerate() {
        let err = scheduled_period(1, Decimal::MAX, dec!(1), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, MortgageError::DegenerateSchedule(_)));
    }

    #[test]
    fn test_principal_due_caps_at_balance() {
        assert_eq!(principal_due(dec!(500), dec!(120), 10, 360), dec!(120));
        assert_eq!(principal_due(dec!(-5), dec!(120), 10, 360), Decimal::ZERO);
        assert_eq!(principal_due(dec!(100), dec!(100.0001), 360, 360), dec!(100.0001));
    }

    #[test]
    fn test_build_schedule_ignores_selected_scheme() {
        let params = LoanParameters::new(dec!(12000), dec!(5), 1, Scheme::Annuity);
        let linear = build_schedule(&params, Scheme::Linear).unwrap();
        assert_eq!(linear.scheme, Scheme::Linear);
        assert_eq!(linear.fixed_monthly_payment, dec!(1000));
        assert_eq!(linear.months_to_payoff(), 12);
        assert_eq!(linear.final_balance(), Decimal::ZERO);
    }
}
