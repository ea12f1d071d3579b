// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing and validation of the command-line settings.  The
//! validators have the shape clap expects: they take the raw value and
//! return an error message on failure.

use std::fmt;
use std::str::FromStr;

use crate::colour::{ColourMap, Grayscale, OffsetPalette};

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Accepts `s` if it parses as a pair of T around `separator`.
pub fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

/// Accepts `s` if it is a `WxH` image size with neither side zero.
pub fn validate_size(s: &str, err: &str) -> Result<(), String> {
    match parse_pair::<u32>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

/// Accepts `s` if it parses as a T within [low, high].
pub fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// Accepts `s` if it is a positive, finite number.
pub fn validate_positive(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

/// The palettes selectable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Brightness shifted per channel and wrapped modulo 255.
    Offset,
    /// Brightness as gray.
    Grayscale,
}

impl Palette {
    /// Every accepted palette name.
    pub const NAMES: &'static [&'static str] = &["offset", "grayscale"];

    /// The colour map this palette names.
    pub fn colour_map(self) -> Box<dyn ColourMap> {
        match self {
            Palette::Offset => Box::new(OffsetPalette::default()),
            Palette::Grayscale => Box::new(Grayscale),
        }
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(Palette::Offset),
            "grayscale" | "greyscale" => Ok(Palette::Grayscale),
            _ => Err(format!(
                "Unknown palette '{}', expected one of: {}",
                s,
                Palette::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Palette::Offset => write!(f, "offset"),
            Palette::Grayscale => write!(f, "grayscale"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Rgb;

    #[test]
    fn pairs_parse() {
        assert_eq!(parse_pair::<usize>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<f64>("-1.5,0.25", ','), Some((-1.5, 0.25)));
        assert_eq!(parse_pair::<usize>("800", 'x'), None);
        assert_eq!(parse_pair::<usize>("800x", 'x'), None);
        assert_eq!(parse_pair::<usize>("axb", 'x'), None);
    }

    #[test]
    fn sizes_need_both_sides() {
        assert!(validate_size("640x480", "bad").is_ok());
        assert!(validate_size("1x1", "bad").is_ok());
        assert_eq!(validate_size("0x10", "bad"), Err("bad".to_string()));
        assert!(validate_size("10x0", "bad").is_err());
        assert!(validate_size("0x0", "bad").is_err());
        assert!(validate_size("-1x10", "bad").is_err());
        assert!(validate_size("10", "bad").is_err());
    }

    #[test]
    fn ranges_validate() {
        assert!(validate_range("4", 1, 8, "nan", "range").is_ok());
        assert_eq!(validate_range("9", 1, 8, "nan", "range"), Err("range".to_string()));
        assert_eq!(validate_range("x", 1, 8, "nan", "range"), Err("nan".to_string()));
    }

    #[test]
    fn positives_validate() {
        assert!(validate_positive("0.5", "bad").is_ok());
        assert!(validate_positive("0", "bad").is_err());
        assert!(validate_positive("-3", "bad").is_err());
        assert!(validate_positive("inf", "bad").is_err());
    }

    #[test]
    fn palettes_by_name() {
        assert_eq!("offset".parse::<Palette>(), Ok(Palette::Offset));
        assert_eq!("greyscale".parse::<Palette>(), Ok(Palette::Grayscale));
        assert!("rainbow".parse::<Palette>().is_err());
        assert_eq!(Palette::Grayscale.to_string(), "grayscale");
    }

    #[test]
    fn named_palettes_colour() {
        assert_eq!(Palette::Offset.colour_map().colour(10.0), Rgb(30, 225, 60));
        assert_eq!(Palette::Grayscale.colour_map().colour(10.0), Rgb(10, 10, 10));
    }
}
