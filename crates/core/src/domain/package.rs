use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::InputError;

/// One of the four values collected for a package, in prompt order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measurement {
    Weight,
    Width,
    Height,
    Length,
}

impl Measurement {
    pub const DIMENSIONS: [Measurement; 3] = [Self::Width, Self::Height, Self::Length];

    pub fn label(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Width => "width",
            Self::Height => "height",
            Self::Length => "length",
        }
    }

    pub fn prompt(self) -> String {
        format!("Please enter the package {}:", self.label())
    }

    /// Parses one line of user input for this measurement.
    ///
    /// Surrounding whitespace is ignored. The accepted grammar is an optional sign, digits with
    /// an optional decimal point, and an optional `e`/`E` exponent. Group separators (`1,000`,
    /// `1_000`) are malformed.
    ///
    /// A well-formed number beyond the `Decimal` range saturates to `Decimal::MAX` or
    /// `Decimal::MIN`, so it still fails the shipping limits instead of reading as malformed.
    /// One too small to represent reads as zero. No limit checks happen here.
    pub fn parse(self, raw: &str) -> Result<Decimal, InputError> {
        let trimmed = raw.trim();
        let shape = NumberShape::scan(trimmed)
            .ok_or_else(|| InputError::Malformed { field: self, input: trimmed.to_string() })?;

        let canonical = shape.canonical();
        let parsed = if shape.exponent.is_some() {
            Decimal::from_scientific(&canonical)
        } else {
            Decimal::from_str(&canonical)
        };

        Ok(parsed.unwrap_or_else(|_| shape.out_of_range_value()))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lexical shape of numeric text that matched the accepted grammar.
struct NumberShape<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<i64>,
    nonzero: bool,
    // Power of ten of the leading integer digit, counting the exponent.
    magnitude: i64,
}

impl<'a> NumberShape<'a> {
    fn scan(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
            None => (unsigned, None),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        let empty = integer.is_empty() && fraction.is_empty();
        if empty || !all_digits(integer) || !all_digits(fraction) {
            return None;
        }

        let exponent = match exponent {
            None => None,
            Some(exponent) => {
                let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
                if digits.is_empty() || !all_digits(digits) {
                    return None;
                }
                Some(exponent.parse::<i64>().unwrap_or(if exponent.starts_with('-') {
                    i64::MIN
                } else {
                    i64::MAX
                }))
            }
        };

        let nonzero = integer.bytes().chain(fraction.bytes()).any(|byte| byte != b'0');
        let integer_digits = integer.trim_start_matches('0').len() as i64;

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
            nonzero,
            magnitude: integer_digits.saturating_add(exponent.unwrap_or(0)),
        })
    }

    /// Rebuilds the number as `-12.5e3`, with a leading zero and without a bare point.
    fn canonical(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        let mut text = format!("{sign}{integer}");
        if !self.fraction.is_empty() {
            text.push('.');
            text.push_str(self.fraction);
        }
        if let Some(exponent) = self.exponent {
            text.push_str(&format!("e{exponent}"));
        }
        text
    }

    fn out_of_range_value(&self) -> Decimal {
        if !self.nonzero || self.magnitude <= 0 {
            Decimal::ZERO
        } else if self.negative {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Package {
    pub weight: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub length: Decimal,
}

impl Package {
    pub fn new(weight: Decimal, width: Decimal, height: Decimal, length: Decimal) -> Self {
        Self { weight, width, height, length }
    }

    pub fn set(&mut self, measurement: Measurement, value: Decimal) {
        match measurement {
            Measurement::Weight => self.weight = value,
            Measurement::Width => self.width = value,
            Measurement::Height => self.height = value,
            Measurement::Length => self.length = value,
        }
    }

    /// Combined width + height + length, saturating at the decimal range.
    pub fn dimensions_sum(&self) -> Decimal {
        self.width.saturating_add(self.height).saturating_add(self.length)
    }
}

/// Result of collecting measurements from the user.
///
/// Dimensions are only requested when the weight alone does not disqualify the package, so an
/// overweight entry carries the weight and nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Complete(Package),
    RejectedOverweight { weight: Decimal },
}

impl Collection {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Flattens into a package; dimensions of an overweight entry are zero.
    pub fn into_package(self) -> Package {
        match self {
            Self::Complete(package) => package,
            Self::RejectedOverweight { weight } => Package { weight, ..Package::default() },
        }
    }
}
