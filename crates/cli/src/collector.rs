use std::io::{self, BufRead, Write};

use package_express_core::errors::InputError;
use package_express_core::{Collection, Measurement, Package, ShippingLimits};
use rust_decimal::Decimal;

/// Prompts for the package measurements one line at a time.
///
/// Weight is read first. When it already exceeds the weight limit the dimensions are never
/// requested and the collection ends early.
pub struct InputCollector<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    limits: ShippingLimits,
}

impl<'a, R: BufRead, W: Write> InputCollector<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output, limits: ShippingLimits::STANDARD }
    }

    pub fn collect(&mut self) -> Result<Collection, InputError> {
        let weight = self.read_measurement(Measurement::Weight)?;
        if self.limits.is_overweight(weight) {
            tracing::info!(
                event_name = "collection.weight.over_limit",
                weight = %weight,
                max_weight = %self.limits.max_weight,
                "skipping dimension prompts for overweight package"
            );
            return Ok(Collection::RejectedOverweight { weight });
        }

        let mut package = Package { weight, ..Package::default() };
        for dimension in Measurement::DIMENSIONS {
            package.set(dimension, self.read_measurement(dimension)?);
        }

        tracing::debug!(
            event_name = "collection.completed",
            weight = %package.weight,
            width = %package.width,
            height = %package.height,
            length = %package.length,
            "package measurements collected"
        );
        Ok(Collection::Complete(package))
    }

    fn read_measurement(&mut self, field: Measurement) -> Result<Decimal, InputError> {
        writeln!(self.output, "{}", field.prompt())?;
        self.output.flush()?;

        let line = read_line(&mut *self.input)?.ok_or(InputError::Closed { field })?;
        field.parse(&line).map_err(|error| {
            tracing::warn!(
                event_name = "collection.measurement.malformed",
                field = field.label(),
                error = %error,
                "could not parse measurement"
            );
            error
        })
    }
}

/// Reads one line, returning `None` once the input is exhausted.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
