// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  A pixel is mapped to a point c on the
//! complex plane, and z -> z^2 + c is iterated starting from z = c
//! until the orbit is judged to have run off toward infinity or the
//! iteration budget runs out.  How long the orbit survived becomes the
//! pixel's brightness.

use num::Complex;

use crate::view::ViewTransform;

/// The iteration budget for a single pixel.
pub const MAX_ITERATIONS: usize = 1000;

/// The orbit has escaped once |re + im| exceeds this.  Note that this
/// is a test on the sum of the components, not on the modulus.
pub const ESCAPE_BOUND: f64 = 16.0;

/// This is our classic iterator function, which either returns the
/// number of iterations the orbit of `c` survived before escaping, or
/// it returns nothing at all if it never escaped within `limit`
/// steps.  An orbit that escapes on the very first step survived zero
/// iterations.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Option<usize> {
    let mut z = c;
    for i in 0..limit {
        z = z * z + c;
        if (z.re + z.im).abs() > ESCAPE_BOUND {
            return Some(i);
        }
    }
    None
}

/// Turn an escape time into a brightness in [0, 255].  Points that
/// never escaped are black, and so, by the square root, are points that
/// escaped immediately.
pub fn brightness(escape: Option<usize>, limit: usize) -> f64 {
    match escape {
        None => 0.0,
        Some(n) => ((n as f64) / (limit as f64)).sqrt() * 255.0,
    }
}

/// Brightness of pixel (x, y) of a width x height frame under `view`.
pub fn evaluate(width: usize, height: usize, x: usize, y: usize, view: &ViewTransform) -> f64 {
    let c = view.pixel_to_point(width, height, x, y);
    brightness(escape_time(c, MAX_ITERATIONS), MAX_ITERATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), MAX_ITERATIONS), None);
    }

    #[test]
    fn far_point_escapes_at_once() {
        assert_eq!(escape_time(Complex::new(10.0, 10.0), MAX_ITERATIONS), Some(0));
    }

    #[test]
    fn escape_uses_component_sum() {
        // z1 = (12, 0) is far outside radius 2, but its sum is not
        // over 16; the test only fires at z2 = (147, 0).
        assert_eq!(escape_time(Complex::new(3.0, 0.0), MAX_ITERATIONS), Some(1));
        // z1 = (-3, -15) sums to -18.
        assert_eq!(escape_time(Complex::new(-3.0, 3.0), MAX_ITERATIONS), Some(0));
    }

    #[test]
    fn brightness_of_interior_is_black() {
        assert_eq!(brightness(None, MAX_ITERATIONS), 0.0);
    }

    #[test]
    fn brightness_follows_square_root() {
        assert_eq!(brightness(Some(250), 1000), 127.5);
        assert_eq!(brightness(Some(0), 1000), 0.0);
        assert!(brightness(Some(999), 1000) < 255.0);
    }

    #[test]
    fn centre_pixel_is_in_the_set() {
        let view = ViewTransform::default();
        assert_eq!(evaluate(4, 4, 2, 2, &view), 0.0);
        assert_eq!(evaluate(1000, 1000, 500, 500, &view), 0.0);
    }

    #[test]
    fn corner_pixel_escapes_after_surviving() {
        // The top-left corner samples (-2, -2); its first iterate is
        // (-2, 6), sum 4, and it escapes on the second step.
        let view = ViewTransform::default();
        let b = evaluate(4, 4, 0, 0, &view);
        assert_eq!(b, (1.0_f64 / 1000.0).sqrt() * 255.0);
    }
}
