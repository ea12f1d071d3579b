#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot click-to-zoom renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z -> z^2 + c stays bounded.  Points outside the
//! set escape toward infinity, some quickly and some only after many
//! iterations; that "escape time" is what gets turned into colour.
//!
//! A frame is a caller-owned RGBA buffer.  For each pixel the view
//! transform picks a point on the complex plane, the evaluator turns
//! that point's escape time into a brightness, a colour map turns the
//! brightness into a colour, and the renderer writes it.  Clicking on
//! the frame re-centres toward the clicked spot and doubles the zoom.
//! Where the finished buffer goes is up to a Surface.

pub mod colour;
pub mod config;
pub mod error;
pub mod escape;
pub mod explorer;
pub mod render;
pub mod surface;
pub mod view;

pub use colour::{ColourMap, Grayscale, OffsetPalette, Rgb};
pub use error::Error;
pub use escape::{evaluate, MAX_ITERATIONS};
pub use explorer::Explorer;
pub use render::{render, render_threaded, render_with, Cancel, Frame};
pub use surface::{ImageFile, Surface};
pub use view::ViewTransform;
