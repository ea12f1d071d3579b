// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colouring algorithms.  A colour map turns the brightness produced
//! by the evaluator into the red, green and blue channels of a pixel.
//! The renderer accepts anything implementing ColourMap, including
//! plain closures.

use num::clamp;

/// An opaque pixel colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Black, for points inside the set.
pub const BLACK: Rgb = Rgb(0, 0, 0);

/// Maps a brightness in [0, 255] to a colour.
pub trait ColourMap: Sync {
    /// The colour for `brightness`.
    fn colour(&self, brightness: f64) -> Rgb;
}

impl<F> ColourMap for F
where
    F: Fn(f64) -> Rgb + Sync,
{
    fn colour(&self, brightness: f64) -> Rgb {
        self(brightness)
    }
}

/// Round to the nearest integer, with halves going to the even
/// neighbour, the way a clamped canvas byte array stores them.
fn round_half_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - value.signum()
    } else {
        rounded
    }
}

/// Round a channel value to the nearest integer, halves to even, and
/// clamp it into a byte.
pub fn channel(value: f64) -> u8 {
    clamp(round_half_even(value), 0.0, 255.0) as u8
}

/// Non-negative modulo 255, so that negative sums wrap around to the
/// top of the range instead of going below zero.
fn wrap(value: f64) -> u8 {
    channel(value.rem_euclid(255.0))
}

/// Shifts each channel by a fixed amount and wraps it modulo 255.
/// Brightness zero, the interior of the set, is always black.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OffsetPalette {
    /// Added to the brightness for the red channel.
    pub red: f64,
    /// Added to the brightness for the green channel.
    pub green: f64,
    /// Added to the brightness for the blue channel.
    pub blue: f64,
}

impl OffsetPalette {
    /// A palette with the given per-channel offsets.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        OffsetPalette { red, green, blue }
    }
}

impl Default for OffsetPalette {
    fn default() -> Self {
        OffsetPalette::new(20.0, -40.0, 50.0)
    }
}

impl ColourMap for OffsetPalette {
    fn colour(&self, brightness: f64) -> Rgb {
        if brightness == 0.0 {
            return BLACK;
        }
        Rgb(
            wrap(brightness + self.red),
            wrap(brightness + self.green),
            wrap(brightness + self.blue),
        )
    }
}

/// Brightness straight to gray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Grayscale;

impl ColourMap for Grayscale {
    fn colour(&self, brightness: f64) -> Rgb {
        let v = channel(brightness);
        Rgb(v, v, v)
    }
}
