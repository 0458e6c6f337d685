// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use image::RgbImage;

use crate::colorschemes::get_count_color;
use crate::grid::EscapeGrid;

// {{{ render grids

/// Paint an escape grid into an RGB8 pixel buffer.
///
/// *pixels* holds three bytes per grid cell. Captive cells come out black and
/// escaped cells cycle through the hue wheel.
pub fn render_grid(pixels: &mut [u8], grid: &EscapeGrid, maxit: u32) {
    let (nrows, ncols) = grid.shape();
    assert!(pixels.len() == 3 * nrows * ncols);

    for row in 0..nrows {
        // Why the flip? pixel rows increase as we go down,
        // but the imaginary component increases as we go up.
        let source = nrows - 1 - row;

        for column in 0..ncols {
            let color = get_count_color(grid.get(source, column), maxit);

            let index = 3 * (row * ncols + column);
            pixels[index] = color[0];
            pixels[index + 1] = color[1];
            pixels[index + 2] = color[2];
        }
    }
}

/// Render an escape grid into a freshly allocated image.
pub fn grid_to_image(grid: &EscapeGrid, maxit: u32) -> RgbImage {
    let mut image = RgbImage::new(grid.ncols() as u32, grid.nrows() as u32);
    render_grid(&mut image, grid, maxit);

    image
}

// }}}

// {{{ tests


// }}}
