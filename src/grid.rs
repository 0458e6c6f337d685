// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::{c64, Complex64};
use rayon::prelude::*;

use crate::julibrot::{escape_count, Julibrot};
use crate::plane::{InvalidArgument, PlaneWindow};

// {{{ EscapeGrid

/// Escape times for every sample of a window.
///
/// The grid is stored row-major with shape *(rows, columns)*: rows follow the
/// imaginary samples in ascending order and columns the real samples in
/// ascending order, so the first row is the bottom edge of the window. Each
/// cell is the iteration at which its sample escaped, or the iteration cap if
/// it stayed bounded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscapeGrid {
    shape: (usize, usize),
    counts: Vec<u32>,
}

impl EscapeGrid {
    pub(crate) fn from_raw(shape: (usize, usize), counts: Vec<u32>) -> Self {
        assert!(counts.len() == shape.0 * shape.1);
        EscapeGrid { shape, counts }
    }

    /// Shape as *(rows, columns)*, i.e. *(im_count, re_count)*.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nrows(&self) -> usize {
        self.shape.0
    }

    pub fn ncols(&self) -> usize {
        self.shape.1
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.shape.0 && col < self.shape.1);
        self.counts[row * self.shape.1 + col]
    }

    pub fn row(&self, row: usize) -> &[u32] {
        assert!(row < self.shape.0);
        &self.counts[row * self.shape.1..(row + 1) * self.shape.1]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

// }}}

// {{{ evaluate

fn fill_row(row: &mut [u32], brot: &Julibrot, re: &[f64], im: f64) {
    for (j, cell) in row.iter_mut().enumerate() {
        *cell = escape_count(brot, c64(re[j], im));
    }
}

/// Evaluate the escape grid of *window* one sample at a time.
pub fn evaluate_grid(window: &PlaneWindow, brot: &Julibrot) -> EscapeGrid {
    let (nrows, ncols) = window.shape();
    let re = window.re_points();
    let im = window.im_points();

    let mut counts = vec![0_u32; nrows * ncols];
    for (i, row) in counts.chunks_mut(ncols).enumerate() {
        fill_row(row, brot, &re, im[i]);
    }

    EscapeGrid::from_raw((nrows, ncols), counts)
}

/// Evaluate the escape grid of *window* with one task per row.
///
/// Every sample is independent, so the rows can be filled in any order and
/// the result is identical to [`evaluate_grid`] down to the last bit.
pub fn evaluate_grid_par(window: &PlaneWindow, brot: &Julibrot) -> EscapeGrid {
    let (nrows, ncols) = window.shape();
    let re = window.re_points();
    let im = window.im_points();

    let mut counts = vec![0_u32; nrows * ncols];
    counts
        .par_chunks_mut(ncols)
        .enumerate()
        .for_each(|(i, row)| fill_row(row, brot, &re, im[i]));

    EscapeGrid::from_raw((nrows, ncols), counts)
}

// }}}

// {{{ EscapePlane

/// A sampling window together with its evaluated escape grid.
///
/// The grid is evaluated eagerly on construction and after every parameter
/// change, so the counts always match the window and the map.
#[derive(Clone, Debug)]
pub struct EscapePlane {
    window: PlaneWindow,
    brot: Julibrot,
    cells: EscapeGrid,
}

impl EscapePlane {
    pub fn new(window: PlaneWindow, brot: Julibrot) -> Self {
        let cells = evaluate_grid_par(&window, &brot);
        EscapePlane {
            window,
            brot,
            cells,
        }
    }

    pub fn window(&self) -> &PlaneWindow {
        &self.window
    }

    pub fn julibrot(&self) -> &Julibrot {
        &self.brot
    }

    pub fn grid(&self) -> &EscapeGrid {
        &self.cells
    }

    /// Re-evaluate the grid for the current window and map.
    pub fn refresh(&mut self) {
        self.cells = evaluate_grid_par(&self.window, &self.brot);
    }

    /// Move the window to new bounds, keeping the sample counts, and
    /// re-evaluate. The plane is untouched if the bounds are invalid.
    pub fn zoom(
        &mut self,
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<(), InvalidArgument> {
        self.window = self.window.zoom(re_min, re_max, im_min, im_max)?;
        self.refresh();

        Ok(())
    }

    /// Swap in a new Julia constant, keeping the iteration cap, and
    /// re-evaluate. The plane is untouched if the constant is invalid.
    pub fn retarget(&mut self, c: Complex64) -> Result<(), InvalidArgument> {
        self.brot = Julibrot::new(c, self.brot.maxit())?;
        self.refresh();

        Ok(())
    }
}

// }}}

// {{{ tests


// }}}
