use thiserror::Error;

use crate::domain::package::Measurement;

pub const MALFORMED_INPUT_MESSAGE: &str =
    "Error: Please enter valid numeric values for all measurements.";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("`{input}` is not a valid package {field}")]
    Malformed { field: Measurement, input: String },
    #[error("input closed before the package {field} was entered")]
    Closed { field: Measurement },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("shipping quote is outside the supported numeric range")]
    Overflow,
}

/// Anything that ends an interactive session before a quote is shown.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("could not write to the console: {0}")]
    Output(std::io::Error),
}

impl SessionError {
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Input(InputError::Malformed { .. }))
    }

    /// The line shown to the user. Malformed input never names the offending field.
    pub fn user_message(&self) -> String {
        if self.is_malformed_input() {
            MALFORMED_INPUT_MESSAGE.to_string()
        } else {
            format!("An unexpected error occurred: {self}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::domain::package::Measurement;
    use crate::errors::{InputError, PricingError, SessionError, MALFORMED_INPUT_MESSAGE};

    #[test]
    fn malformed_input_maps_to_generic_message() {
        let error = SessionError::from(InputError::Malformed {
            field: Measurement::Length,
            input: "abc".to_string(),
        });

        assert!(error.is_malformed_input());
        assert_eq!(error.user_message(), MALFORMED_INPUT_MESSAGE);
        assert!(!error.user_message().contains("length"));
    }

    #[test]
    fn closed_input_is_reported_as_unexpected() {
        let error = SessionError::from(InputError::Closed { field: Measurement::Width });

        assert!(!error.is_malformed_input());
        assert_eq!(
            error.user_message(),
            "An unexpected error occurred: input closed before the package width was entered"
        );
    }

    #[test]
    fn pricing_overflow_is_reported_as_unexpected() {
        let error = SessionError::from(PricingError::Overflow);
        assert_eq!(
            error.user_message(),
            "An unexpected error occurred: shipping quote is outside the supported numeric range"
        );
    }

    #[test]
    fn io_failures_keep_their_description() {
        let error = SessionError::from(InputError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "pipe closed",
        )));
        assert_eq!(error.user_message(), "An unexpected error occurred: pipe closed");
    }
}
