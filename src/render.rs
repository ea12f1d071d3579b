// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frame renderer.  Every pixel of a caller-owned RGBA buffer is
//! evaluated, coloured and written in place.  Each pixel depends only
//! on its own coordinates and the view, so the multi-threaded variant
//! hands whole rows out to workers from a shared queue; rows are
//! disjoint slices of the buffer, and no two workers ever touch the
//! same byte.

use itertools::iproduct;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::colour::{ColourMap, Rgb};
use crate::error::Error;
use crate::escape::evaluate;
use crate::view::ViewTransform;

/// Bytes per pixel: red, green, blue, alpha.
pub const CHANNELS: usize = 4;

/// A cooperative cancellation flag for an in-flight render.  Clones
/// share the flag, so one can be handed to another thread and used to
/// abandon a render that has been superseded.
#[derive(Clone, Debug, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    /// A fresh, unset flag.
    pub fn new() -> Self {
        Cancel(Arc::new(AtomicBool::new(false)))
    }

    /// Ask any render watching this flag to stop at the next row.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag so the next render runs to completion.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The byte length of a width x height RGBA frame.
pub fn frame_len(width: usize, height: usize) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(Error::FrameTooLarge(width, height))
}

fn check_buffer(buffer: &[u8], width: usize, height: usize) -> Result<(), Error> {
    let expected = frame_len(width, height)?;
    if buffer.len() != expected {
        return Err(Error::BufferSize {
            width,
            height,
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// An owned RGBA buffer together with its dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// A transparent black frame.
    pub fn new(width: usize, height: usize) -> Result<Frame, Error> {
        let len = frame_len(width, height)?;
        Ok(Frame {
            width,
            height,
            pixels: vec![0 as u8; len],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the raw RGBA bytes.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

/// Write one opaque pixel at (x, y) of a buffer `width` pixels wide.
/// Pixels outside the buffer are refused and nothing is written.
pub fn put_pixel(
    buffer: &mut [u8],
    width: usize,
    x: usize,
    y: usize,
    colour: Rgb,
) -> Result<(), Error> {
    let index = y
        .checked_mul(width)
        .and_then(|row| row.checked_add(x))
        .and_then(|n| n.checked_mul(CHANNELS))
        .filter(|&index| x < width && index < buffer.len() && buffer.len() - index >= CHANNELS)
        .ok_or(Error::PixelOutOfRange { x, y, width })?;
    let Rgb(r, g, b) = colour;
    buffer[index..index + CHANNELS].copy_from_slice(&[r, g, b, 255]);
    Ok(())
}

/// Write one opaque gray pixel.
pub fn put_grayscale(
    buffer: &mut [u8],
    width: usize,
    x: usize,
    y: usize,
    value: u8,
) -> Result<(), Error> {
    put_pixel(buffer, width, x, y, Rgb(value, value, value))
}

/// Render the Mandelbrot set under `view` into `buffer`, one pixel at
/// a time, using the escape-time evaluator and `colour`.
pub fn render<C>(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    colour: &C,
    view: &ViewTransform,
) -> Result<(), Error>
where
    C: ColourMap + ?Sized,
{
    render_with(buffer, width, height, &evaluate, colour, view)
}

/// Render with a caller-supplied evaluator.  The buffer must be exactly
/// width * height * 4 bytes; it is checked before anything is written.
pub fn render_with<E, C>(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    evaluate: &E,
    colour: &C,
    view: &ViewTransform,
) -> Result<(), Error>
where
    E: Fn(usize, usize, usize, usize, &ViewTransform) -> f64 + Sync + ?Sized,
    C: ColourMap + ?Sized,
{
    check_buffer(buffer, width, height)?;
    debug!("rendering {}x{} frame, {:?}", width, height, view);

    for (y, x) in iproduct!(0..height, 0..width) {
        let brightness = evaluate(width, height, x, y, view);
        put_pixel(buffer, width, x, y, colour.colour(brightness))?;
    }

    trace!("end render");
    Ok(())
}

fn fill_row<E, C>(
    row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
    evaluate: &E,
    colour: &C,
    view: &ViewTransform,
) where
    E: Fn(usize, usize, usize, usize, &ViewTransform) -> f64 + Sync + ?Sized,
    C: ColourMap + ?Sized,
{
    for (x, pixel) in row.chunks_mut(CHANNELS).enumerate() {
        let Rgb(r, g, b) = colour.colour(evaluate(width, height, x, y, view));
        pixel.copy_from_slice(&[r, g, b, 255]);
    }
}

/// A multi-threaded version of the render function that takes a thread
/// count and a cancellation flag.  Produces exactly the bytes
/// render_with would.  The flag is polled between rows; a cancelled
/// render returns Error::Cancelled and leaves the buffer part-written.
/// The flag is cleared on every return, so a cancel only ever reaches
/// the render it was aimed at.
#[allow(clippy::too_many_arguments)]
pub fn render_threaded<E, C>(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    evaluate: &E,
    colour: &C,
    view: &ViewTransform,
    threads: usize,
    cancel: &Cancel,
) -> Result<(), Error>
where
    E: Fn(usize, usize, usize, usize, &ViewTransform) -> f64 + Sync + ?Sized,
    C: ColourMap + ?Sized,
{
    let result = fill_frame(
        buffer, width, height, evaluate, colour, view, threads, cancel,
    );
    cancel.reset();
    result
}

#[allow(clippy::too_many_arguments)]
fn fill_frame<E, C>(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    evaluate: &E,
    colour: &C,
    view: &ViewTransform,
    threads: usize,
    cancel: &Cancel,
) -> Result<(), Error>
where
    E: Fn(usize, usize, usize, usize, &ViewTransform) -> f64 + Sync + ?Sized,
    C: ColourMap + ?Sized,
{
    check_buffer(buffer, width, height)?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    if buffer.is_empty() {
        return Ok(());
    }
    debug!(
        "rendering {}x{} frame on {} thread(s), {:?}",
        width, height, threads, view
    );

    let row_len = width * CHANNELS;
    if threads <= 1 {
        for (y, row) in buffer.chunks_mut(row_len).enumerate() {
            if cancel.is_cancelled() {
                debug!("render cancelled at row {}", y);
                return Err(Error::Cancelled);
            }
            fill_row(row, y, width, height, evaluate, colour, view);
        }
        trace!("end render");
        return Ok(());
    }

    let queue = Mutex::new(buffer.chunks_mut(row_len).enumerate());
    {
        let rows = &queue;
        crossbeam::scope(|spawner| {
            for _ in 0..threads {
                spawner.spawn(move |_| loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let row = rows.lock().ok().and_then(|mut rows| rows.next());
                    match row {
                        Some((y, row)) => fill_row(row, y, width, height, evaluate, colour, view),
                        None => {
                            break;
                        }
                    }
                });
            }
        })
        .map_err(|_| Error::WorkerPanicked)?;
    }

    // Workers only stop early on cancellation, so leftover rows mean the
    // frame is incomplete.
    let unfinished = queue
        .into_inner()
        .map(|mut rows| rows.next().is_some())
        .unwrap_or(true);
    if unfinished {
        debug!("render cancelled");
        return Err(Error::Cancelled);
    }
    trace!("end render");
    Ok(())
}
