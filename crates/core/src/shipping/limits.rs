use rust_decimal::Decimal;

use crate::domain::package::Package;

/// Heaviest package accepted, in the unit the weight was entered in.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Largest accepted width + height + length. Independent of `MAX_WEIGHT`.
pub const MAX_DIMENSIONS_SUM: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShippingLimits {
    pub max_weight: Decimal,
    pub max_dimensions_sum: Decimal,
}

impl ShippingLimits {
    pub const STANDARD: Self =
        Self { max_weight: MAX_WEIGHT, max_dimensions_sum: MAX_DIMENSIONS_SUM };

    pub fn is_overweight(&self, weight: Decimal) -> bool {
        weight > self.max_weight
    }

    /// Weight is checked first; dimensions only matter for a package light enough to ship.
    pub fn check(&self, package: &Package) -> ShippingVerdict {
        if self.is_overweight(package.weight) {
            return ShippingVerdict::Rejected(ShippingRejection::TooHeavy);
        }

        if package.dimensions_sum() > self.max_dimensions_sum {
            return ShippingVerdict::Rejected(ShippingRejection::TooBig);
        }

        ShippingVerdict::Accepted
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShippingRejection {
    TooHeavy,
    TooBig,
}

impl ShippingRejection {
    pub fn code(self) -> &'static str {
        match self {
            Self::TooHeavy => "TOO_HEAVY",
            Self::TooBig => "TOO_BIG",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::TooHeavy => {
                "Package too heavy to be shipped via Package Express. Have a good day."
            }
            Self::TooBig => "Package too big to be shipped via Package Express.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShippingVerdict {
    Accepted,
    Rejected(ShippingRejection),
}

impl ShippingVerdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(self) -> Option<ShippingRejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl Package {
    pub fn validate(&self) -> ShippingVerdict {
        ShippingLimits::STANDARD.check(self)
    }

    pub fn is_valid_for_shipping(&self) -> bool {
        self.validate().is_accepted()
    }
}
