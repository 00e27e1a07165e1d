//! Author: [Seclususs](https://github.com/seclususs)
//!
//! Text to scalar conversion. Parsing is explicit and fallible so that a
//! failed parse can be told apart from a genuine zero.

use crate::common::error::UtilError;

use std::any;
use std::fmt::Display;
use std::str::FromStr;

pub fn parse_scalar<T: FromStr>(text: &str) -> Result<T, UtilError> {
    text.trim().parse::<T>().map_err(|_| {
        UtilError::ParseError(format!(
            "'{text}' is not a valid {}",
            any::type_name::<T>()
        ))
    })
}

pub fn convert<T: FromStr, S: Display + ?Sized>(source: &S) -> Result<T, UtilError> {
    parse_scalar(&source.to_string())
}

/// Lossy variant of [`parse_scalar`]: yields `T::default()` when the text does
/// not parse. Only use where zero and "unparseable" mean the same thing.
pub fn parse_or_default<T: FromStr + Default>(text: &str) -> T {
    parse_scalar(text).unwrap_or_else(|e| {
        log::warn!("{e}, using default");
        T::default()
    })
}

/// Splits on `\n` only. A `\r` before the break stays part of the line and a
/// final terminator does not produce an empty trailing segment.
pub fn line_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
        .map(|line| line.strip_suffix('\n').unwrap_or(line))
}

pub fn split_lines(text: &str) -> Vec<String> {
    line_segments(text).map(str::to_owned).collect()
}
