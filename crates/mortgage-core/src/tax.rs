use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Money;

/// Share of mortgage interest still borne after the fixed interest deduction.
pub const TAX_RELIEF_FACTOR: Decimal = dec!(0.6303);

/// Monthly cash cost once the interest deduction is taken into account.
pub fn compute_after_tax_cost(principal_payment: Money, interest_payment: Money) -> Money {
    principal_payment + TAX_RELIEF_FACTOR * interest_payment
}
