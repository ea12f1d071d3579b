// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Display surfaces.  The renderer knows nothing about where a frame
//! ends up; once a buffer is complete it is handed to a Surface.  The
//! one concrete surface here writes image files.

use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use log::debug;
use std::convert::TryFrom;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::render::CHANNELS;

/// Something that can show a finished RGBA frame.
pub trait Surface {
    /// Present a complete width x height RGBA buffer.
    fn present(&mut self, pixels: &[u8], width: usize, height: usize) -> Result<(), Error>;
}

/// Writes each presented frame to an image file.  Paths ending in
/// `.ppm` or `.pnm` get a binary pixmap, with the alpha channel
/// dropped; anything else gets a PNG.
#[derive(Debug)]
pub struct ImageFile {
    path: PathBuf,
    numbered: bool,
    presented: usize,
}

impl ImageFile {
    /// Overwrite `path` with every frame presented.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ImageFile {
            path: path.as_ref().to_path_buf(),
            numbered: false,
            presented: 0,
        }
    }

    /// Write frame n to `<stem>-<n>.<ext>` beside `path`, so a whole
    /// zoom sequence is kept.
    pub fn numbered<P: AsRef<Path>>(path: P) -> Self {
        ImageFile {
            numbered: true,
            ..ImageFile::new(path)
        }
    }

    /// How many frames have been written.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// The file the next presented frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        if !self.numbered {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.path.extension() {
            Some(ext) => format!("{}-{}.{}", stem, self.presented, ext.to_string_lossy()),
            None => format!("{}-{}", stem, self.presented),
        };
        self.path.with_file_name(name)
    }
}

fn is_pixmap(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("ppm") || ext.eq_ignore_ascii_case("pnm"),
        None => false,
    }
}

fn write_image(path: &Path, pixels: &[u8], width: u32, height: u32) -> Result<(), Error> {
    let output = File::create(path)?;
    if is_pixmap(path) {
        let rgb: Vec<u8> = pixels
            .chunks(CHANNELS)
            .flat_map(|p| p[..3].iter().cloned())
            .collect();
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(&rgb[..], width, height, ColorType::RGB(8))?;
    } else {
        PNGEncoder::new(output).encode(pixels, width, height, ColorType::RGBA(8))?;
    }
    Ok(())
}

impl Surface for ImageFile {
    fn present(&mut self, pixels: &[u8], width: usize, height: usize) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyFrame(width, height));
        }
        let too_large = || Error::FrameTooLarge(width, height);
        let w = u32::try_from(width).map_err(|_| too_large())?;
        let h = u32::try_from(height).map_err(|_| too_large())?;
        let path = self.next_path();
        debug!("writing {}x{} frame to {}", width, height, path.display());
        write_image(&path, pixels, w, h)?;
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_surface_reuses_its_path() {
        let surface = ImageFile::new("/tmp/out/mandel.png");
        assert_eq!(surface.next_path(), PathBuf::from("/tmp/out/mandel.png"));
    }

    #[test]
    fn numbered_surface_counts_frames() {
        let mut surface = ImageFile::numbered("/tmp/out/mandel.png");
        assert_eq!(surface.next_path(), PathBuf::from("/tmp/out/mandel-0.png"));
        surface.presented = 3;
        assert_eq!(surface.next_path(), PathBuf::from("/tmp/out/mandel-3.png"));
    }

    #[test]
    fn numbered_surface_without_extension() {
        let surface = ImageFile::numbered("frames");
        assert_eq!(surface.next_path(), PathBuf::from("frames-0"));
    }

    #[test]
    fn empty_frames_leave_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let mut surface = ImageFile::new(&path);
        match surface.present(&[], 0, 10) {
            Err(Error::EmptyFrame(0, 10)) => {}
            other => panic!("expected an empty frame error, got {:?}", other),
        }
        assert!(!path.exists());
        assert_eq!(surface.presented(), 0);
    }

    #[test]
    fn pixmap_is_chosen_by_extension() {
        assert!(is_pixmap(Path::new("a.ppm")));
        assert!(is_pixmap(Path::new("a.PNM")));
        assert!(!is_pixmap(Path::new("a.png")));
        assert!(!is_pixmap(Path::new("a")));
    }
}
