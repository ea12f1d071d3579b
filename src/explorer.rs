// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The interactive part: an Explorer owns one frame and the current
//! view, draws the view onto a surface, and turns clicks into new
//! views.

use log::debug;

use crate::colour::{ColourMap, OffsetPalette};
use crate::error::Error;
use crate::escape::evaluate;
use crate::render::{render_threaded, Cancel, Frame};
use crate::surface::Surface;
use crate::view::ViewTransform;

/// Click-to-zoom state for a single surface.
pub struct Explorer {
    view: ViewTransform,
    palette: Box<dyn ColourMap>,
    threads: usize,
    cancel: Cancel,
    frame: Frame,
}

impl Explorer {
    /// An explorer for a width x height surface, starting at the
    /// default view with the default palette on one thread.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        Ok(Explorer {
            view: ViewTransform::default(),
            palette: Box::new(OffsetPalette::default()),
            threads: 1,
            cancel: Cancel::new(),
            frame: Frame::new(width, height)?,
        })
    }

    /// Start from `view` instead of the default.
    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self
    }

    /// Colour frames with `palette`.
    pub fn with_palette(mut self, palette: Box<dyn ColourMap>) -> Self {
        self.palette = palette;
        self
    }

    /// Render on `threads` worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// The view that the next draw will show.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// A handle that cancels the draw in progress.  A cancel made while
    /// no draw is running is dropped when the next draw starts.
    pub fn canceller(&self) -> Cancel {
        self.cancel.clone()
    }

    /// Render the current view and present it.  A cancelled draw
    /// presents nothing.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), Error> {
        let (width, height) = (self.frame.width(), self.frame.height());
        self.cancel.reset();
        render_threaded(
            self.frame.pixels_mut(),
            width,
            height,
            &evaluate,
            &*self.palette,
            &self.view,
            self.threads,
            &self.cancel,
        )?;
        surface.present(self.frame.pixels(), width, height)
    }

    /// Zoom in on surface-local (x, y) and redraw.  Returns the new
    /// view.
    pub fn click<S: Surface + ?Sized>(
        &mut self,
        x: f64,
        y: f64,
        surface: &mut S,
    ) -> Result<ViewTransform, Error> {
        self.view = self
            .view
            .zoom_at(x, y, self.frame.width(), self.frame.height());
        debug!("click at ({}, {}), now {:?}", x, y, self.view);
        self.draw(surface)?;
        Ok(self.view)
    }
}
