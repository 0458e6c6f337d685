// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::Complex64;

use crate::plane::InvalidArgument;

/// Squared escape radius for the bailout test.
///
/// Once $|z| > 2$ the quadratic iterate is guaranteed to diverge, so testing
/// $|z|^2 > 4$ gives the same verdict without the square root.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

// {{{ structs

/// Parameters of the quadratic Julia map $f(z) = z^2 + c$.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Julibrot {
    /// Constant added at every step of the iteration.
    c: Complex64,
    /// Maximum number of iterations before a point is declared captive.
    maxit: u32,
}

impl Julibrot {
    pub fn new(c: Complex64, maxit: u32) -> Result<Self, InvalidArgument> {
        if !(c.re.is_finite() && c.im.is_finite()) {
            return Err(InvalidArgument::NonFiniteConstant);
        }

        if maxit == 0 {
            return Err(InvalidArgument::ZeroIterationCap);
        }

        Ok(Julibrot { c, maxit })
    }

    pub fn c(&self) -> Complex64 {
        self.c
    }

    pub fn maxit(&self) -> u32 {
        self.maxit
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EscapeResult {
    /// Iteration at which the point escaped or *None* otherwise.
    pub iteration: Option<u32>,
    /// Last point of the orbit (will be outside the escape radius if the
    /// point escaped).
    pub z: Complex64,
}

// }}}

// {{{ escape

/// Compute the escape time of the point *z0* under the map of *brot*.
///
/// The bailout is checked before every step, so a seed that starts outside
/// the escape radius escapes at iteration zero with its orbit untouched.
pub fn julibrot_orbit_escape(brot: &Julibrot, z0: Complex64) -> EscapeResult {
    let c = brot.c;
    let mut z = z0;

    for i in 0..brot.maxit {
        if z.norm_sqr() > ESCAPE_RADIUS_SQUARED {
            return EscapeResult {
                iteration: Some(i),
                z,
            };
        }

        z = z * z + c;
    }

    EscapeResult { iteration: None, z }
}

/// Escape time of *z0* with the cap folded in: the iteration at which the
/// point escaped, or the cap of *brot* if it stayed bounded throughout.
pub fn escape_count(brot: &Julibrot, z0: Complex64) -> u32 {
    match julibrot_orbit_escape(brot, z0) {
        EscapeResult {
            iteration: Some(i),
            z: _,
        } => i,
        EscapeResult {
            iteration: None,
            z: _,
        } => brot.maxit,
    }
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;
    use num::complex::c64;

    #[test]
    fn test_escape_known_orbit() {
        let brot = Julibrot::new(c64(0.2, 0.2), 100).unwrap();
        assert_eq!(escape_count(&brot, c64(0.7, 0.7)), 4);

        let brot = Julibrot::new(c64(0.1, 0.1), 10).unwrap();
        assert_eq!(escape_count(&brot, c64(0.1, 0.1)), 10);
    }

    #[test]
    fn test_escape_at_zero() {
        // already outside the escape radius, so the orbit never advances
        let brot = Julibrot::new(c64(0.2, 0.2), 100).unwrap();
        let result = julibrot_orbit_escape(&brot, c64(7.0, 7.0));

        assert_eq!(result.iteration, Some(0));
        assert_eq!(result.z, c64(7.0, 7.0));
    }

    #[test]
    fn test_escape_never() {
        // the origin is a fixed point of z^2
        let brot = Julibrot::new(c64(0.0, 0.0), 25).unwrap();
        let result = julibrot_orbit_escape(&brot, c64(0.0, 0.0));

        assert_eq!(result.iteration, None);
        assert_eq!(result.z, c64(0.0, 0.0));
        assert_eq!(escape_count(&brot, c64(0.0, 0.0)), 25);
    }

    #[test]
    fn test_escape_radius_is_strict() {
        // |z0|^2 == 4 does not bail out; the first iterate lands on 4 + 0i
        // and only the check after it fires
        let brot = Julibrot::new(c64(0.0, 0.0), 50).unwrap();
        let result = julibrot_orbit_escape(&brot, c64(2.0, 0.0));

        assert_eq!(result.iteration, Some(1));
        assert_eq!(result.z, c64(4.0, 0.0));
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            Julibrot::new(c64(f64::NAN, 0.17), 100).unwrap_err(),
            InvalidArgument::NonFiniteConstant
        );
        assert_eq!(
            Julibrot::new(c64(-1.037, f64::INFINITY), 100).unwrap_err(),
            InvalidArgument::NonFiniteConstant
        );
        assert_eq!(
            Julibrot::new(c64(-1.037, 0.17), 0).unwrap_err(),
            InvalidArgument::ZeroIterationCap
        );
    }
}

// }}}
