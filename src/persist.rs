// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;
use std::str::FromStr;

use num::complex::c64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::EscapePlane;
use crate::julibrot::Julibrot;
use crate::plane::{InvalidArgument, PlaneWindow};

// {{{ PersistError

/// Failure while writing or reading a plane snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read or write the snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode the JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(String),
    #[error("snapshot holds invalid parameters: {0}")]
    Invalid(#[from] InvalidArgument),
}

// }}}

// {{{ Snapshot

const CSV_HEADER: &str = "re_min,re_max,re_count,im_min,im_max,im_count,c_re,c_im,max_iter";

/// The nine defining parameters of a plane plus its evaluated counts.
///
/// Only the parameters are trusted on load: the counts are written out for
/// inspection and interop, and loading evaluates the grid from scratch.
#[derive(Debug, Deserialize, Serialize)]
struct Snapshot {
    re_min: f64,
    re_max: f64,
    re_count: usize,
    im_min: f64,
    im_max: f64,
    im_count: usize,
    c_re: f64,
    c_im: f64,
    max_iter: u32,
    #[serde(default)]
    counts: Vec<u32>,
}

impl Snapshot {
    fn from_plane(plane: &EscapePlane) -> Self {
        let window = plane.window();
        let brot = plane.julibrot();

        Snapshot {
            re_min: window.re_min(),
            re_max: window.re_max(),
            re_count: window.re_count(),
            im_min: window.im_min(),
            im_max: window.im_max(),
            im_count: window.im_count(),
            c_re: brot.c().re,
            c_im: brot.c().im,
            max_iter: brot.maxit(),
            counts: plane.grid().as_slice().to_vec(),
        }
    }

    fn into_plane(self) -> Result<EscapePlane, InvalidArgument> {
        let window = PlaneWindow::new(
            self.re_min,
            self.re_max,
            self.re_count,
            self.im_min,
            self.im_max,
            self.im_count,
        )?;
        let brot = Julibrot::new(c64(self.c_re, self.c_im), self.max_iter)?;

        Ok(EscapePlane::new(window, brot))
    }
}

// }}}

// {{{ csv

/// Write the plane to *path* as CSV: a parameter header, one value row, a
/// `counts` marker and one row per grid row.
pub fn save_csv<P: AsRef<Path>>(plane: &EscapePlane, path: P) -> Result<(), PersistError> {
    let snapshot = Snapshot::from_plane(plane);
    let mut file = File::create(path)?;

    writeln!(file, "{}", CSV_HEADER)?;
    writeln!(
        file,
        "{},{},{},{},{},{},{},{},{}",
        snapshot.re_min,
        snapshot.re_max,
        snapshot.re_count,
        snapshot.im_min,
        snapshot.im_max,
        snapshot.im_count,
        snapshot.c_re,
        snapshot.c_im,
        snapshot.max_iter
    )?;

    writeln!(file, "counts")?;
    for i in 0..plane.grid().nrows() {
        let cells: Vec<String> = plane.grid().row(i).iter().map(|n| n.to_string()).collect();
        writeln!(file, "{}", cells.join(","))?;
    }

    Ok(())
}

/// Rebuild a plane from a CSV snapshot written by [`save_csv`].
///
/// Only the parameter row is parsed; any stored counts are skipped and the
/// grid is evaluated afresh.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<EscapePlane, PersistError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let header = next_line(&mut lines, "parameter header")?;
    if header.trim() != CSV_HEADER {
        return Err(PersistError::Malformed(
            "unexpected parameter header".to_string(),
        ));
    }

    let values = next_line(&mut lines, "parameter row")?;
    let fields: Vec<&str> = values.trim().split(',').collect();
    if fields.len() != 9 {
        return Err(PersistError::Malformed(format!(
            "expected 9 parameters, found {}",
            fields.len()
        )));
    }

    let snapshot = Snapshot {
        re_min: parse_field(fields[0], "re_min")?,
        re_max: parse_field(fields[1], "re_max")?,
        re_count: parse_field(fields[2], "re_count")?,
        im_min: parse_field(fields[3], "im_min")?,
        im_max: parse_field(fields[4], "im_max")?,
        im_count: parse_field(fields[5], "im_count")?,
        c_re: parse_field(fields[6], "c_re")?,
        c_im: parse_field(fields[7], "c_im")?,
        max_iter: parse_field(fields[8], "max_iter")?,
        counts: Vec::new(),
    };

    Ok(snapshot.into_plane()?)
}

fn next_line(lines: &mut Lines<BufReader<File>>, what: &str) -> Result<String, PersistError> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(PersistError::Malformed(format!("missing {}", what))),
    }
}

fn parse_field<T: FromStr>(field: &str, name: &str) -> Result<T, PersistError> {
    field
        .trim()
        .parse()
        .map_err(|_| PersistError::Malformed(format!("could not parse {}", name)))
}

// }}}

// {{{ json

/// Write the plane to *path* as a JSON snapshot.
pub fn save_json<P: AsRef<Path>>(plane: &EscapePlane, path: P) -> Result<(), PersistError> {
    let snapshot = Snapshot::from_plane(plane);
    let text = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, text)?;

    Ok(())
}

/// Rebuild a plane from a JSON snapshot.
///
/// The `counts` field may be omitted; like [`load_csv`], only the parameters
/// are read and the grid is evaluated afresh.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<EscapePlane, PersistError> {
    let text = std::fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&text)?;

    Ok(snapshot.into_plane()?)
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_plane() -> EscapePlane {
        let window = PlaneWindow::new(-2.0, 2.0, 5, -2.0, 2.0, 5).unwrap();
        let brot = Julibrot::new(c64(-0.835, -0.2321), 100).unwrap();
        EscapePlane::new(window, brot)
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.csv");

        let plane = sample_plane();
        save_csv(&plane, &path).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(*loaded.window(), *plane.window());
        assert_eq!(*loaded.julibrot(), *plane.julibrot());
        assert_eq!(*loaded.grid(), *plane.grid());
    }

    #[test]
    fn test_csv_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.csv");

        let plane = sample_plane();
        save_csv(&plane, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "-2,2,5,-2,2,5,-0.835,-0.2321,100");
        assert_eq!(lines[2], "counts");
        assert_eq!(lines.len(), 3 + plane.grid().nrows());
        assert_eq!(lines[3 + 2], "1,62,39,62,1");
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.json");

        let plane = sample_plane();
        save_json(&plane, &path).unwrap();
        let loaded = load_json(&path).unwrap();

        assert_eq!(*loaded.window(), *plane.window());
        assert_eq!(*loaded.julibrot(), *plane.julibrot());
        assert_eq!(*loaded.grid(), *plane.grid());
    }

    #[test]
    fn test_json_counts_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.json");

        let text = r#"{
            "re_min": -2.0, "re_max": 2.0, "re_count": 5,
            "im_min": -2.0, "im_max": 2.0, "im_count": 5,
            "c_re": -0.835, "c_im": -0.2321, "max_iter": 100
        }"#;
        std::fs::write(&path, text).unwrap();

        let loaded = load_json(&path).unwrap();
        assert_eq!(*loaded.grid(), *sample_plane().grid());
    }

    #[test]
    fn test_csv_rejects_bad_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.csv");
        std::fs::write(&path, "re_min,re_max\n-1,1\n").unwrap();

        let result = load_csv(&path);
        assert!(matches!(result, Err(PersistError::Malformed(_))));
    }

    #[test]
    fn test_csv_rejects_short_parameter_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.csv");
        std::fs::write(&path, format!("{}\n-1,1,5\n", CSV_HEADER)).unwrap();

        let result = load_csv(&path);
        assert!(matches!(result, Err(PersistError::Malformed(_))));
    }

    #[test]
    fn test_csv_rejects_unparsable_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.csv");
        std::fs::write(
            &path,
            format!("{}\nabc,1,5,-1,1,5,-0.835,-0.2321,100\n", CSV_HEADER),
        )
        .unwrap();

        let result = load_csv(&path);
        assert!(matches!(result, Err(PersistError::Malformed(_))));
    }

    #[test]
    fn test_load_rejects_invalid_parameters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plane.json");

        let text = r#"{
            "re_min": 1.0, "re_max": -1.0, "re_count": 5,
            "im_min": -1.0, "im_max": 1.0, "im_count": 5,
            "c_re": -0.835, "c_im": -0.2321, "max_iter": 100
        }"#;
        std::fs::write(&path, text).unwrap();

        let result = load_json(&path);
        assert!(matches!(
            result,
            Err(PersistError::Invalid(InvalidArgument::ReversedBounds))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.csv");

        assert!(matches!(load_csv(&path), Err(PersistError::Io(_))));
    }
}

// }}}
