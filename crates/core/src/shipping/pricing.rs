use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::package::Package;
use crate::errors::PricingError;

pub const QUOTE_DIVISOR: Decimal = Decimal::ONE_HUNDRED;
pub const CURRENCY_SCALE: u32 = 2;
/// Banker's rounding, the default of `Decimal::round_dp`, pinned explicitly.
pub const QUOTE_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShippingQuote {
    pub total: Decimal,
}

impl fmt::Display for ShippingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.total)
    }
}

/// `(width * height * length * weight) / 100`, rounded to cents.
///
/// The package is not re-validated here; callers price only accepted packages.
pub fn calculate_shipping_quote(package: &Package) -> Result<ShippingQuote, PricingError> {
    let product = package
        .width
        .checked_mul(package.height)
        .and_then(|value| value.checked_mul(package.length))
        .and_then(|value| value.checked_mul(package.weight))
        .ok_or(PricingError::Overflow)?;

    let total = product
        .checked_div(QUOTE_DIVISOR)
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(CURRENCY_SCALE, QUOTE_ROUNDING);

    Ok(ShippingQuote { total })
}

impl Package {
    pub fn calculate_shipping_quote(&self) -> Result<ShippingQuote, PricingError> {
        calculate_shipping_quote(self)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{calculate_shipping_quote, ShippingQuote};
    use crate::domain::package::Package;
    use crate::errors::PricingError;

    fn quote(weight: Decimal, width: Decimal, height: Decimal, length: Decimal) -> ShippingQuote {
        calculate_shipping_quote(&Package::new(weight, width, height, length))
            .expect("quote should be in range")
    }

    #[test]
    fn cube_of_tens_follows_the_formula() {
        let ten = Decimal::from(10);
        let quote = quote(ten, ten, ten, ten);
        assert_eq!(quote.total, Decimal::from(100));
        assert_eq!(quote.to_string(), "$100.00");
    }

    #[test]
    fn unit_package_costs_one_cent() {
        let quote = quote(Decimal::ONE, Decimal::ONE, Decimal::ONE, Decimal::ONE);
        assert_eq!(quote.total, Decimal::new(1, 2));
        assert_eq!(quote.to_string(), "$0.01");
    }

    #[test]
    fn half_cent_boundaries_round_to_even() {
        // 12.5 / 100 = 0.125 and 13.5 / 100 = 0.135
        let down = quote(Decimal::new(125, 1), Decimal::ONE, Decimal::ONE, Decimal::ONE);
        let up = quote(Decimal::new(135, 1), Decimal::ONE, Decimal::ONE, Decimal::ONE);

        assert_eq!(down.total, Decimal::new(12, 2));
        assert_eq!(up.total, Decimal::new(14, 2));
    }

    #[test]
    fn fractional_inputs_do_not_drift() {
        // 11.1 * 11.1 * 1 * 33.3 = 4102.893
        let priced =
            quote(Decimal::new(333, 1), Decimal::new(111, 1), Decimal::new(111, 1), Decimal::ONE);
        assert_eq!(priced.total, Decimal::new(4103, 2));

        // 0.1 * 0.2 * 0.3 * 50 = 0.3
        let tiny =
            quote(Decimal::from(50), Decimal::new(1, 1), Decimal::new(2, 1), Decimal::new(3, 1));
        assert_eq!(tiny.to_string(), "$0.00");
    }

    #[test]
    fn same_package_always_prices_the_same() {
        let package = Package::new(
            Decimal::new(4275, 2),
            Decimal::new(125, 1),
            Decimal::new(75, 1),
            Decimal::new(199, 1),
        );
        let first = package.calculate_shipping_quote().expect("first");
        let second = package.calculate_shipping_quote().expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_product_is_an_error() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        let package = Package::new(Decimal::from(50), huge, -huge, Decimal::from(50));
        assert_eq!(calculate_shipping_quote(&package), Err(PricingError::Overflow));
    }
}
