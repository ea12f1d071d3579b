// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ViewTransform struct, which describes how the integral
//! pixel plane of a frame, with its origin at the top left, maps onto
//! a window of the complex plane.  The window is a 4x4 square centred
//! on the origin, shrunk by the zoom level and shifted by the offsets.
use num::Complex;

use crate::error::Error;

/// Describes the minimum and maximum corners of the visible window of
/// the complex plane, treating the real part of each value as the
/// x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexWindow(pub Complex<f64>, pub Complex<f64>);

/// The zoom and pan state of the explorer.  A value, not a cell: a
/// click produces a new ViewTransform rather than mutating this one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Constructor.  The zoom level must be positive and finite, and
    /// both offsets finite.
    pub fn new(zoom: f64, offset_x: f64, offset_y: f64) -> Result<ViewTransform, Error> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(Error::InvalidZoom(zoom));
        }
        if !(offset_x.is_finite() && offset_y.is_finite()) {
            return Err(Error::InvalidOffset(offset_x, offset_y));
        }
        Ok(ViewTransform {
            zoom,
            offset_x,
            offset_y,
        })
    }

    /// The magnification; 1.0 shows the whole 4x4 window.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Horizontal pan, in zoom-scaled pixels.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical pan, in zoom-scaled pixels.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// The visible window of the complex plane for a frame `width`
    /// pixels wide.  Both offsets are scaled by the width, never the
    /// height, so non-square frames pan vertically at the horizontal
    /// rate.
    pub fn window(&self, width: usize) -> ComplexWindow {
        let width = width as f64;
        let shift_x = self.offset_x / width * 2.0;
        let shift_y = self.offset_y / width * 2.0;
        ComplexWindow(
            Complex::new(-2.0 / self.zoom + shift_x, -2.0 / self.zoom + shift_y),
            Complex::new(2.0 / self.zoom + shift_x, 2.0 / self.zoom + shift_y),
        )
    }

    /// Given a pixel of a width x height frame, return the complex
    /// number it samples.
    pub fn pixel_to_point(&self, width: usize, height: usize, x: usize, y: usize) -> Complex<f64> {
        let ComplexWindow(min, max) = self.window(width);
        Complex::new(
            min.re + ((x as f64) / (width as f64)) * (max.re - min.re),
            min.im + ((y as f64) / (height as f64)) * (max.im - min.im),
        )
    }

    /// The view after a click at surface-local (click_x, click_y):
    /// pan so the clicked spot drifts toward the centre, then double
    /// the magnification.
    pub fn zoom_at(&self, click_x: f64, click_y: f64, width: usize, height: usize) -> ViewTransform {
        ViewTransform {
            zoom: self.zoom * 2.0,
            offset_x: self.offset_x + (click_x - (width as f64) / 2.0) / self.zoom,
            offset_y: self.offset_y + (click_y - (height as f64) / 2.0) / self.zoom,
        }
    }
}
