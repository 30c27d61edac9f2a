// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical text forms for orrery values.
//!
//! * Vector-like values: `<x, y, z>`.
//! * Angles and fractions: a number followed by a suffix (`°`, `%`).
//! * Composite values: `TypeName[Field value | Field value]`.
//!
//! [`FormatConfig`] carries the culture-dependent pieces (decimal and list
//! separators, suffixes, precision). `Display`/`FromStr` on every value type
//! use [`FormatConfig::default`]; `Display` additionally honours a
//! formatter precision such as `{:.2}`.

use std::fmt;

use crate::error::ParseError;

/// Text formatting and parsing options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatConfig {
    /// Fixed number of fractional digits, or `None` for the shortest form
    /// that round-trips exactly.
    pub precision: Option<usize>,
    /// Character placed between integer and fractional digits.
    pub decimal_separator: char,
    /// Character separating vector components (always followed by a space).
    pub list_separator: char,
    /// Suffix appended to angles (in degrees).
    pub degree_suffix: String,
    /// Suffix appended to fractions (as percentages).
    pub percent_suffix: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: None,
            decimal_separator: '.',
            list_separator: ',',
            degree_suffix: "°".to_owned(),
            percent_suffix: "%".to_owned(),
        }
    }
}

impl FormatConfig {
    /// Default config with `precision` taken from a `Display` formatter.
    pub fn for_formatter(f: &fmt::Formatter<'_>) -> Self {
        Self {
            precision: f.precision(),
            ..Self::default()
        }
    }

    /// Config using a comma decimal separator and a semicolon list
    /// separator, as many European locales do.
    pub fn comma_decimal() -> Self {
        Self {
            decimal_separator: ',',
            list_separator: ';',
            ..Self::default()
        }
    }

    /// Returns a copy with the given fixed precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    fn component_separator(&self) -> String {
        format!("{} ", self.list_separator)
    }
}

/// Values that have a canonical text form.
///
/// Implementors get `Display` and `FromStr` through
/// [`impl_text_traits!`](crate::impl_text_traits).
pub trait TextFormat: Sized {
    /// Renders the value using `config`.
    fn format_with(&self, config: &FormatConfig) -> String;

    /// Parses a value previously rendered with `config`.
    fn parse_with(text: &str, config: &FormatConfig) -> Result<Self, ParseError>;
}

/// Implements `Display` and `FromStr` for a [`TextFormat`] type.
#[macro_export]
macro_rules! impl_text_traits {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let config = $crate::format::FormatConfig::for_formatter(f);
                f.write_str(&$crate::format::TextFormat::format_with(self, &config))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::ParseError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$ty as $crate::format::TextFormat>::parse_with(
                    s,
                    &$crate::format::FormatConfig::default(),
                )
            }
        }
    };
}

/// Formats a single number.
pub fn format_scalar(value: f32, config: &FormatConfig) -> String {
    let text = match config.precision {
        Some(precision) => format!("{value:.precision$}"),
        None => format!("{value}"),
    };
    if config.decimal_separator == '.' {
        text
    } else {
        text.replace('.', &config.decimal_separator.to_string())
    }
}

/// Parses a single number, ignoring surrounding whitespace.
pub fn parse_scalar(text: &str, config: &FormatConfig) -> Result<f32, ParseError> {
    let trimmed = text.trim();
    let normalized = if config.decimal_separator == '.' {
        trimmed.to_owned()
    } else {
        trimmed.replace(config.decimal_separator, ".")
    };
    normalized
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidNumber {
            input: trimmed.to_owned(),
        })
}

/// Formats a number followed by `suffix`.
pub fn format_suffixed(value: f32, suffix: &str, config: &FormatConfig) -> String {
    format!("{}{suffix}", format_scalar(value, config))
}

/// Parses a number optionally followed by whitespace and `suffix`.
pub fn parse_suffixed(text: &str, suffix: &str, config: &FormatConfig) -> Result<f32, ParseError> {
    let trimmed = text.trim();
    let body = trimmed.strip_suffix(suffix).unwrap_or(trimmed);
    parse_scalar(body, config)
}

/// Formats three components as `<x, y, z>`.
pub fn format_vector3(components: [f32; 3], config: &FormatConfig) -> String {
    let separator = config.component_separator();
    let [x, y, z] = components.map(|c| format_scalar(c, config));
    format!("<{x}{separator}{y}{separator}{z}>")
}

/// Parses `<x, y, z>`; anything after the closing bracket is rejected.
pub fn parse_vector3(text: &str, config: &FormatConfig) -> Result<[f32; 3], ParseError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('<')
        .ok_or_else(|| ParseError::MissingDelimiter {
            expected: "<".to_owned(),
        })?;
    let close = inner.find('>').ok_or_else(|| ParseError::MissingDelimiter {
        expected: ">".to_owned(),
    })?;
    let (body, rest) = inner.split_at(close);
    let remainder = &rest[1..];
    if !remainder.is_empty() {
        return Err(ParseError::TrailingInput {
            remainder: remainder.to_owned(),
        });
    }
    let parts: Vec<&str> = body.split(config.list_separator).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(ParseError::WrongComponentCount {
            expected: 3,
            actual: parts.len(),
        });
    };
    Ok([
        parse_scalar(x, config)?,
        parse_scalar(y, config)?,
        parse_scalar(z, config)?,
    ])
}

/// Formats `TypeName[Name value | Name value]`.
pub fn format_fields(type_name: &str, fields: &[(&str, String)]) -> String {
    let body = fields
        .iter()
        .map(|(name, value)| format!("{name} {value}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{type_name}[{body}]")
}

/// Splits `TypeName[Name value | ...]` into its field values, in order.
///
/// Field names must appear exactly as listed in `names`.
pub fn parse_fields<'a>(
    text: &'a str,
    type_name: &str,
    names: &[&str],
) -> Result<Vec<&'a str>, ParseError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix(type_name)
        .and_then(|rest| rest.strip_prefix('['))
        .ok_or_else(|| ParseError::MissingDelimiter {
            expected: format!("{type_name}["),
        })?;
    let body = inner
        .strip_suffix(']')
        .ok_or_else(|| ParseError::MissingDelimiter {
            expected: "]".to_owned(),
        })?;
    let parts: Vec<&str> = body.split(" | ").collect();
    if parts.len() != names.len() {
        return Err(ParseError::WrongComponentCount {
            expected: names.len(),
            actual: parts.len(),
        });
    }
    parts
        .into_iter()
        .zip(names)
        .map(|(part, name)| {
            part.trim()
                .strip_prefix(*name)
                .map(str::trim)
                .ok_or_else(|| ParseError::MissingDelimiter {
                    expected: (*name).to_owned(),
                })
        })
        .collect()
}
