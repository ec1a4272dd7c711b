use rust_decimal::Decimal;

use crate::params::LoanParameters;
use crate::schedule::{build_schedule, AmortizationSchedule};
use crate::time_value::{discount_difference, discount_exponent, monthly_discount_rate};
use crate::types::PaymentPeriod;
use crate::MortgageResult;

/// Compare `schedule` with the other scheme built from the same `params`.
///
/// Returns a new schedule whose periods carry the after-tax cost difference
/// against the alternate scheme and its discounted value.
pub fn compare_scheme_difference(
    params: &LoanParameters,
    schedule: &AmortizationSchedule,
) -> MortgageResult<AmortizationSchedule> {
    let alternate = build_schedule(params, schedule.scheme.other())?;
    pair_with_alternate(schedule, &alternate, params)
}

/// Month-by-month pairing by position. Months past the end of `alternate`
/// are compared against a zero after-tax cost.
pub fn pair_with_alternate(
    schedule: &AmortizationSchedule,
    alternate: &AmortizationSchedule,
    params: &LoanParameters,
) -> MortgageResult<AmortizationSchedule> {
    let m = monthly_discount_rate(params.discount_factor_percent)?;

    let periods = schedule
        .periods
        .iter()
        .enumerate()
        .map(|(idx, period)| -> MortgageResult<PaymentPeriod> {
            let counterpart = alternate
                .periods
                .get(idx)
                .map(|p| p.after_tax_monthly_cost)
                .unwrap_or(Decimal::ZERO);
            let difference = period.after_tax_monthly_cost - counterpart;
            let discounted = discount_difference(
                difference,
                m,
                discount_exponent(params.term_years, period.month),
            )?;

            let mut compared = period.clone();
            compared.difference_vs_alternate_scheme = difference;
            compared.discounted_value = discounted;
            Ok(compared)
        })
        .collect::<MortgageResult<Vec<_>>>()?;

    AmortizationSchedule::new(schedule.scheme, schedule.fixed_monthly_payment, periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::compute_after_tax_cost;
    use crate::types::Scheme;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn params() -> LoanParameters {
        LoanParameters::new(dec!(200000), dec!(4), 30, Scheme::Annuity)
    }

    #[test]
    fn test_difference_is_after_tax_delta() {
        let p = params();
        let annuity = build_schedule(&p, Scheme::Annuity).unwrap();
        let linear = build_schedule(&p, Scheme::Linear).unwrap();
        let compared = compare_scheme_difference(&p, &annuity).unwrap();

        let first = &compared.periods[0];
        let expected = annuity.periods[0].after_tax_monthly_cost - linear.periods[0].after_tax_monthly_cost;
        assert_eq!(first.difference_vs_alternate_scheme, expected);
        // Annuity starts cheaper than linear
        assert!(first.difference_vs_alternate_scheme < Decimal::ZERO);
        // Zero discount factor: discounted value is the negated difference
        assert_eq!(first.discounted_value, -expected);
    }

    #[test]
    fn test_differences_are_antisymmetric() {
        let p = params();
        let annuity = build_schedule(&p, Scheme::Annuity).unwrap();
        let linear = build_schedule(&p, Scheme::Linear).unwrap();
        let a = compare_scheme_difference(&p, &annuity).unwrap();
        let l = compare_scheme_difference(&p, &linear).unwrap();
        for (x, y) in a.periods.iter().zip(&l.periods) {
            assert_eq!(x.difference_vs_alternate_scheme, -y.difference_vs_alternate_scheme);
        }
    }

    #[test]
    fn test_comparison_does_not_touch_input() {
        let p = params();
        let annuity = build_schedule(&p, Scheme::Annuity).unwrap();
        let before = annuity.clone();
        let _ = compare_scheme_difference(&p, &annuity).unwrap();
        assert_eq!(annuity, before);
    }

    #[test]
    fn test_unmatched_months_use_zero_counterpart() {
        // With an extra repayment the annuity's higher payment retires the loan first
        let p = LoanParameters::new(dec!(20000), dec!(10), 5, Scheme::Linear)
            .with_extra_repayment(dec!(500));
        let annuity = build_schedule(&p, Scheme::Annuity).unwrap();
        let linear = build_schedule(&p, Scheme::Linear).unwrap();
        assert!(annuity.periods.len() < linear.periods.len());

        let compared = pair_with_alternate(&linear, &annuity, &p).unwrap();
        assert_eq!(compared.periods.len(), linear.periods.len());

        let tail = compared.periods.last().unwrap();
        assert_eq!(
            tail.difference_vs_alternate_scheme,
            compute_after_tax_cost(tail.principal_payment, tail.interest_payment)
        );
    }

    #[test]
    fn test_totals_include_difference_columns() {
        let p = params().with_discount_factor(dec!(3));
        let annuity = build_schedule(&p, Scheme::Annuity).unwrap();
        let compared = compare_scheme_difference(&p, &annuity).unwrap();
        let sum: Decimal = compared.periods.iter().map(|x| x.discounted_value).sum();
        assert_eq!(compared.totals.discounted_value, sum);
    }
}
