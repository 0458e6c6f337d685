// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;

// {{{ InvalidArgument

/// Error raised for malformed evaluation parameters.
///
/// Every variant is a precondition violation caught by the validating
/// constructors before any grid work starts, so no partial result can exist.
#[derive(Clone, Copy, Eq, Debug, PartialEq)]
pub enum InvalidArgument {
    /// An axis bound is NaN or infinite.
    NonFiniteBounds,
    /// An axis has `min >= max`.
    ReversedBounds,
    /// An axis has no sample points.
    EmptyAxis,
    /// The iteration cap is zero.
    ZeroIterationCap,
    /// The Julia constant is NaN or infinite.
    NonFiniteConstant,
}

impl InvalidArgument {
    fn as_str(&self) -> &'static str {
        match *self {
            InvalidArgument::NonFiniteBounds => "Axis bounds must be finite",
            InvalidArgument::ReversedBounds => "Axis bounds must satisfy min < max",
            InvalidArgument::EmptyAxis => "Axis sample counts must be positive",
            InvalidArgument::ZeroIterationCap => "Iteration cap must be positive",
            InvalidArgument::NonFiniteConstant => "Julia constant must be finite",
        }
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl std::error::Error for InvalidArgument {}

// }}}

// {{{ PlaneWindow

/// Rectangular sampling window over the complex plane.
///
/// Both axes are sampled with evenly spaced points, endpoints included, so a
/// window fully determines the `z0` seed of every grid cell. Windows are
/// validated on construction and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneWindow {
    re_min: f64,
    re_max: f64,
    re_count: usize,
    im_min: f64,
    im_max: f64,
    im_count: usize,
}

impl PlaneWindow {
    pub fn new(
        re_min: f64,
        re_max: f64,
        re_count: usize,
        im_min: f64,
        im_max: f64,
        im_count: usize,
    ) -> Result<Self, InvalidArgument> {
        check_axis(re_min, re_max, re_count)?;
        check_axis(im_min, im_max, im_count)?;

        Ok(PlaneWindow {
            re_min,
            re_max,
            re_count,
            im_min,
            im_max,
            im_count,
        })
    }

    /// Window over new bounds with the same sample counts.
    pub fn zoom(
        &self,
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<Self, InvalidArgument> {
        PlaneWindow::new(re_min, re_max, self.re_count, im_min, im_max, self.im_count)
    }

    pub fn re_min(&self) -> f64 {
        self.re_min
    }

    pub fn re_max(&self) -> f64 {
        self.re_max
    }

    pub fn re_count(&self) -> usize {
        self.re_count
    }

    pub fn im_min(&self) -> f64 {
        self.im_min
    }

    pub fn im_max(&self) -> f64 {
        self.im_max
    }

    pub fn im_count(&self) -> usize {
        self.im_count
    }

    /// Grid shape as *(rows, columns)*, i.e. *(im_count, re_count)*.
    pub fn shape(&self) -> (usize, usize) {
        (self.im_count, self.re_count)
    }

    /// Real-axis samples in ascending order.
    pub fn re_points(&self) -> Vec<f64> {
        linspace(self.re_min, self.re_max, self.re_count)
    }

    /// Imaginary-axis samples in ascending order.
    pub fn im_points(&self) -> Vec<f64> {
        linspace(self.im_min, self.im_max, self.im_count)
    }
}

fn check_axis(min: f64, max: f64, count: usize) -> Result<(), InvalidArgument> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(InvalidArgument::NonFiniteBounds);
    }

    if min >= max {
        return Err(InvalidArgument::ReversedBounds);
    }

    if count == 0 {
        return Err(InvalidArgument::EmptyAxis);
    }

    Ok(())
}

/// *count* evenly spaced values over `[start, stop]`, endpoints included.
///
/// A single-sample axis yields the lower bound, like `numpy.linspace`.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }

    let step = (stop - start) / ((count - 1) as f64);
    let mut points: Vec<f64> = (0..count).map(|i| start + (i as f64) * step).collect();
    // NOTE: pin the endpoint instead of trusting the rounded step
    points[count - 1] = stop;

    points
}

// }}}

// {{{ tests


// }}}
