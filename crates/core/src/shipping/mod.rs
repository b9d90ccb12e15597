pub mod limits;
pub mod pricing;

pub use limits::{ShippingLimits, ShippingRejection, ShippingVerdict};
pub use pricing::{calculate_shipping_quote, ShippingQuote};
