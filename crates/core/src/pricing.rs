//! Price formatting and discount arithmetic.
//!
//! All amounts are [`Decimal`]. Every formatted amount has exactly two
//! fractional digits, rounded half away from zero (`0.125` → `"0.13"`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to cents, half away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a base price for the wire.
///
/// ```
/// use merchdesk_core::pricing::formatted_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(formatted_price(Decimal::new(19999, 3)), "20.00");
/// assert_eq!(formatted_price(Decimal::from(5)), "5.00");
/// ```
#[must_use]
pub fn formatted_price(base: Decimal) -> String {
    format!("{:.2}", round_to_cents(base))
}

/// Price after applying a percentage discount.
///
/// Returns `None` when there is no discount: either no percent was entered
/// or it is zero. `None` is sent as `null`.
#[must_use]
pub fn discounted_price(base: Decimal, percent: Option<Decimal>) -> Option<String> {
    let percent = percent.filter(|p| !p.is_zero())?;
    let reduction = base * percent / Decimal::ONE_HUNDRED;
    Some(formatted_price(base - reduction))
}

/// Recover the discount percent from a stored base and discounted price.
///
/// Used when a persisted product is loaded back into a draft, which edits
/// the percent rather than the discounted amount. Returns `None` for a zero
/// base or when the prices are equal.
#[must_use]
pub fn discount_percent(base: Decimal, discounted: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    let percent = ((base - discounted) * Decimal::ONE_HUNDRED / base)
        .round_dp(2)
        .normalize();
    (!percent.is_zero()).then_some(percent)
}
