use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly rate from an annual percentage (4 => 0.00333...).
pub fn monthly_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Level payment that retires `principal` over `nper` periods at `rate`.
///
/// `principal * r / (1 - (1 + r)^-n)`, falling back to `principal / n`
/// when the rate is zero.
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    // (1 + r)^-n shrinks toward zero on long, high-rate terms where (1 + r)^n
    // would leave the decimal range; an underflow is treated as zero.
    let discount = Decimal::ONE
        .checked_add(rate)
        .and_then(|base| Decimal::ONE.checked_div(base))
        .ok_or_else(|| {
            MortgageError::DegenerateSchedule(format!("1 / (1 + {rate}) is not representable"))
        })?;
    let vanishing = match discount.checked_powi(i64::from(nper)) {
        Some(v) => v,
        None if discount < Decimal::ONE => Decimal::ZERO,
        None => {
            return Err(MortgageError::DegenerateSchedule(format!(
                "(1 + {rate})^-{nper} overflows the decimal range"
            )))
        }
    };

    let denominator = Decimal::ONE - vanishing;
    if denominator <= Decimal::ZERO {
        return Err(MortgageError::DegenerateSchedule(format!(
            "annuity denominator {denominator} is not positive for monthly rate {rate}"
        )));
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(|| {
            MortgageError::DegenerateSchedule(format!(
                "payment on {principal} at monthly rate {rate} overflows the decimal range"
            ))
        })
}

/// Monthly compounding step of an annual discount factor: `(1 + d/100)^(1/12)`.
pub fn monthly_discount_rate(discount_factor_percent: Decimal) -> MortgageResult<Rate> {
    let base = Decimal::ONE + discount_factor_percent / dec!(100);
    if base <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "discount_factor_percent".into(),
            reason: "Discount factor must be greater than -100%".into(),
        });
    }
    if discount_factor_percent.is_zero() {
        return Ok(Decimal::ONE);
    }
    base.checked_powd(Decimal::ONE / MONTHS_PER_YEAR)
        .ok_or_else(|| {
            MortgageError::DegenerateSchedule(format!(
                "monthly discount rate for {discount_factor_percent}% is not representable"
            ))
        })
}

/// Carry a monthly difference through `monthly_discount_rate^exponent` and
/// flip its sign, so a positive cost difference yields a negative value.
pub fn discount_difference(
    monthly_difference: Money,
    monthly_discount_rate: Rate,
    exponent: i64,
) -> MortgageResult<Money> {
    let factor = monthly_discount_rate.checked_powi(exponent).ok_or_else(|| {
        MortgageError::DegenerateSchedule(format!(
            "discount factor {monthly_discount_rate}^{exponent} overflows the decimal range"
        ))
    })?;
    monthly_difference
        .checked_mul(factor)
        .map(|v| -v)
        .ok_or_else(|| {
            MortgageError::DegenerateSchedule(format!(
                "discounted value of {monthly_difference} overflows the decimal range"
            ))
        })
}

/// Present value of one month's after-tax cost difference.
///
/// `-(difference * m^(term_years * 12 - month + 1))` with
/// `m = (1 + discount_factor_percent / 100)^(1/12)`.
pub fn compute_discounted_value(
    monthly_difference: Money,
    term_years: u32,
    month: u32,
    discount_factor_percent: Decimal,
) -> MortgageResult<Money> {
    let m = monthly_discount_rate(discount_factor_percent)?;
    discount_difference(monthly_difference, m, discount_exponent(term_years, month))
}

pub(crate) fn discount_exponent(term_years: u32, month: u32) -> i64 {
    i64::from(term_years) * 12 - i64::from(month) + 1
}
