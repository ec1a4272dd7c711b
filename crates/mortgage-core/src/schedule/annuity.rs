use rust_decimal::Decimal;

use super::{overflow, principal_due, scheduled_period};
use crate::params::validate_loan;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::{Money, PaymentPeriod};
use crate::MortgageResult;

/// Annuity schedule: a level payment computed once from the original
/// principal, with the extra repayment added on top every month.
pub fn compute_annuity_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    extra: Money,
) -> MortgageResult<Vec<PaymentPeriod>> {
    annuity_schedule(principal, annual_rate_percent, term_years, extra).map(|(_, periods)| periods)
}

pub(crate) fn annuity_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    extra: Money,
) -> MortgageResult<(Money, Vec<PaymentPeriod>)> {
    validate_loan(principal, annual_rate_percent, term_years, extra)?;

    let rate = monthly_rate(annual_rate_percent);
    let total_months = term_years * 12;
    let fixed_payment = annuity_payment(rate, total_months, principal)?;

    let mut balance = principal;
    let mut periods = Vec::with_capacity(total_months as usize);

    for month in 1..=total_months {
        // Early payoff: the extra repayment retired the loan before the term.
        if balance <= Decimal::ZERO {
            tracing::debug!(month, "annuity loan retired early");
            break;
        }

        let interest = balance.checked_mul(rate).ok_or_else(|| overflow("monthly interest"))?;
        let scheduled = fixed_payment
            .checked_add(extra)
            .ok_or_else(|| overflow("payment plus extra repayment"))?
            - interest;
        let principal_payment = principal_due(scheduled, balance, month, total_months);
        balance -= principal_payment;

        periods.push(scheduled_period(month, principal_payment, interest, balance)?);
    }

    Ok((fixed_payment, periods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;
    use rust_decimal_macros::dec;

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_annuity_first_month_split() {
        let periods = compute_annuity_schedule(dec!(200000), dec!(4), 30, Decimal::ZERO).unwrap();
        assert_eq!(periods.len(), 360);

        let first = &periods[0];
        assert!(close(first.interest_payment, dec!(666.67), dec!(0.01)));
        assert!(close(first.principal_payment, dec!(288.16), dec!(0.01)));
        assert!(close(first.total_payment, dec!(954.83), dec!(0.01)));
    }

    #[test]
    fn test_annuity_last_month_clears_balance() {
        let periods = compute_annuity_schedule(dec!(200000), dec!(4), 30, Decimal::ZERO).unwrap();
        let last = periods.last().unwrap();
        assert_eq!(last.month, 360);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!(close(last.total_payment, dec!(954.83), dec!(0.01)));
    }

    #[test]
    fn test_annuity_zero_rate_is_straight_division() {
        let periods = compute_annuity_schedule(dec!(24000), Decimal::ZERO, 2, Decimal::ZERO).unwrap();
        assert!(periods.iter().all(|p| p.total_payment == dec!(1000)));
        assert!(periods.iter().all(|p| p.interest_payment.is_zero()));
        assert_eq!(periods.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_extra_repayment_retires_early() {
        let periods = compute_annuity_schedule(dec!(100000), dec!(5), 30, dec!(1000)).unwrap();
        assert!(periods.len() < 360);
        let last = periods.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!(periods.iter().all(|p| p.principal_payment >= Decimal::ZERO));
        // Final month only pays what was left, not the full payment + extra
        assert!(last.principal_payment <= periods[0].principal_payment + dec!(1000));
    }

    #[test]
    fn test_annuity_extra_larger_than_principal() {
        let periods = compute_annuity_schedule(dec!(5000), dec!(3), 10, dec!(10000)).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].principal_payment, dec!(5000));
        assert_eq!(periods[0].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_high_rate_long_term_pays_interest_only() {
        // 100% over 100 years: (1+r)^-n vanishes and the payment is principal * r
        let (fixed, periods) = annuity_schedule(dec!(100000), dec!(100), 100, Decimal::ZERO).unwrap();
        assert!(close(fixed, dec!(100000) * monthly_rate(dec!(100)), dec!(0.000001)));
        assert_eq!(periods.len(), 1200);
        assert!(periods[..1199].iter().all(|p| p.remaining_balance <= dec!(100000)));
        assert_eq!(periods[1199].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_rate_overflow_is_degenerate() {
        // 10^26 % a year: the first month's interest leaves the decimal range
        let rate = dec!(100000000000000000000000000);
        let err = compute_annuity_schedule(dec!(10000000), rate, 1, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, MortgageError::DegenerateSchedule(_)), "got {err:?}");
    }

    #[test]
    fn test_annuity_rejects_oversized_extra() {
        let err = compute_annuity_schedule(dec!(1000), dec!(4), 1, Decimal::MAX).unwrap_err();
        assert!(
            matches!(err, MortgageError::InvalidInput { ref field, .. } if field == "extra_monthly_repayment")
        );
    }

    #[test]
    fn test_annuity_rejects_zero_term() {
        let err = compute_annuity_schedule(dec!(1000), dec!(3), 0, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { ref field, .. } if field == "term_years"));
    }
}
