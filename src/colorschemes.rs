// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use colors_transform::{Color, Hsl};
use image::Rgb;

/// Determine the color for a normalized iteration count *c*.
///
/// This function takes a value *c* in [0, 1].
pub fn get_orbit_color(c: f64) -> Rgb<u8> {
    let n = c.clamp(0.0, 1.0);

    // NOTE: in HSL, we have that H in [0, 360], S in [0, 100] and L in [0, 100]
    let hue = (n * 360.0).round() as f32;
    let saturation = 100.0;
    let lightness = if n < 1.0 { 50.0 } else { 0.0 };

    let (r, g, b) = Hsl::from(hue, saturation, lightness).to_rgb().as_tuple();
    Rgb([b as u8, g as u8, r as u8])
}

/// Determine the color for a raw iteration count *c* capped at *limit*.
///
/// Counts that reached the cap fall on zero lightness and come out black,
/// while escaped counts cycle through the hue wheel.
pub fn get_count_color(c: u32, limit: u32) -> Rgb<u8> {
    get_orbit_color((c as f64) / (limit as f64))
}
