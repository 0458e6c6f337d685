#![warn(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

mod colorschemes;
mod grid;
mod julibrot;
mod persist;
mod plane;
mod render;

use std::time::Instant;

use num::complex::c64;

use crate::grid::{evaluate_grid, EscapePlane};
use crate::julibrot::Julibrot;
use crate::plane::PlaneWindow;
use crate::render::grid_to_image;

const RE_BOUNDS: (f64, f64) = (-2.0, 2.0);
const IM_BOUNDS: (f64, f64) = (-2.0, 2.0);
const RESOLUTION: (usize, usize) = (1001, 1001);
const MAX_ITERATIONS: u32 = 100;

fn main() {
    let window = PlaneWindow::new(
        RE_BOUNDS.0,
        RE_BOUNDS.1,
        RESOLUTION.0,
        IM_BOUNDS.0,
        IM_BOUNDS.1,
        RESOLUTION.1,
    )
    .unwrap();
    let brot = Julibrot::new(c64(-1.037, 0.17), MAX_ITERATIONS).unwrap();

    println!("Executing scalar...");
    let now = Instant::now();
    let grid = evaluate_grid(&window, &brot);
    let elapsed = now.elapsed().as_millis() as f32 / 1000.0;
    println!("Elapsed {}s!", elapsed);

    println!("Executing parallel...");
    let now = Instant::now();
    let mut plane = EscapePlane::new(window, brot);
    let elapsed = now.elapsed().as_millis() as f32 / 1000.0;
    println!("Elapsed {}s!", elapsed);

    assert!(grid == *plane.grid());

    grid_to_image(plane.grid(), plane.julibrot().maxit())
        .save("julia.png")
        .unwrap();

    plane.zoom(-1.0, 1.0, -1.0, 1.0).unwrap();
    grid_to_image(plane.grid(), plane.julibrot().maxit())
        .save("julia-zoom.png")
        .unwrap();

    plane.retarget(c64(0.285, 0.01)).unwrap();
    grid_to_image(plane.grid(), plane.julibrot().maxit())
        .save("julia-retarget.png")
        .unwrap();

    persist::save_csv(&plane, "julia.csv").unwrap();
    persist::save_json(&plane, "julia.json").unwrap();

    let reloaded = persist::load_csv("julia.csv").unwrap();
    assert!(*reloaded.grid() == *plane.grid());

    let reloaded = persist::load_json("julia.json").unwrap();
    assert!(*reloaded.grid() == *plane.grid());
}
