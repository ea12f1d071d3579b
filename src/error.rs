// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the renderer, the view and the
//! surfaces.  Everything here is a caller contract violation or an I/O
//! failure at the presentation boundary; the arithmetic itself cannot
//! fail.

use failure::Fail;
use std::io;

/// Reasons a render, a view change or a presentation can fail.
#[derive(Debug, Fail)]
pub enum Error {
    /// The pixel buffer is not exactly width * height * 4 bytes.
    #[fail(
        display = "pixel buffer holds {} bytes but a {}x{} frame needs {}",
        actual, width, height, expected
    )]
    BufferSize {
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
        /// The byte count the frame requires.
        expected: usize,
        /// The byte count the caller supplied.
        actual: usize,
    },

    /// A single pixel write fell outside the buffer.
    #[fail(display = "pixel ({}, {}) lies outside a buffer {} pixels wide", x, y, width)]
    PixelOutOfRange {
        /// Column of the refused pixel.
        x: usize,
        /// Row of the refused pixel.
        y: usize,
        /// Buffer width in pixels.
        width: usize,
    },

    /// The frame has no pixels to show.
    #[fail(display = "cannot present an empty {}x{} frame", _0, _1)]
    EmptyFrame(usize, usize),

    /// The frame's byte count does not fit in memory addressing.
    #[fail(display = "a {}x{} frame is too large to address", _0, _1)]
    FrameTooLarge(usize, usize),

    /// Zoom levels must be positive and finite.
    #[fail(display = "zoom level must be positive and finite, got {}", _0)]
    InvalidZoom(f64),

    /// Offsets must be finite.
    #[fail(display = "offset must be finite, got ({}, {})", _0, _1)]
    InvalidOffset(f64, f64),

    /// The render was cancelled before it finished.
    #[fail(display = "render cancelled")]
    Cancelled,

    /// A render worker thread panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The surface could not write the frame.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
