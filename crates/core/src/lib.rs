pub mod config;
pub mod domain;
pub mod errors;
pub mod shipping;

pub use domain::package::{Collection, Measurement, Package};
pub use errors::{InputError, PricingError, SessionError};
pub use shipping::{
    calculate_shipping_quote, ShippingLimits, ShippingQuote, ShippingRejection, ShippingVerdict,
};
