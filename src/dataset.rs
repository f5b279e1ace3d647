//! Corpus loading and splitting.
//!
//! A corpus directory holds CSV files of time-ordered samples, one row per
//! sample with a fixed number of numeric columns. Rows are chunked into
//! consecutive fixed-length windows and each window is flattened row-major
//! into one feature vector. A trailing window that cannot be filled is
//! dropped, not padded.

use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

use crate::error::{Result, VerdictError};

/// Load every `*.csv` file in `dir` and window its rows into feature vectors
/// of length `window_rows * columns_per_row`.
///
/// The first line of each file is a header and is skipped. Files are visited
/// in name order so a given corpus always produces the same vector sequence.
/// Windows never span file boundaries. A row with the wrong column count or a
/// non-numeric field fails the whole load.
pub fn load_dir(dir: &Path, window_rows: usize, columns_per_row: usize) -> Result<Vec<Array1<f32>>> {
    if window_rows == 0 || columns_per_row == 0 {
        return Err(VerdictError::invalid_parameter(
            "window_rows/columns_per_row",
            "must be nonzero",
        ));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "csv") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut vectors = Vec::new();
    for path in &paths {
        let rows = parse_rows(path, columns_per_row)?;
        for window in rows.chunks_exact(window_rows) {
            let mut flat = Vec::with_capacity(window_rows * columns_per_row);
            for row in window {
                flat.extend_from_slice(row);
            }
            vectors.push(Array1::from_vec(flat));
        }
    }

    Ok(vectors)
}

fn parse_rows(path: &Path, columns_per_row: usize) -> Result<Vec<Vec<f32>>> {
    let contents = fs::read_to_string(path)?;
    let mut rows = Vec::new();

    // First line is the column header
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(columns_per_row);
        for field in line.split(',') {
            let value = field.trim().parse::<f32>().map_err(|_| {
                VerdictError::DataError(format!(
                    "{}:{}: non-numeric field {:?}",
                    path.display(),
                    line_no + 1,
                    field
                ))
            })?;
            row.push(value);
        }
        if row.len() != columns_per_row {
            return Err(VerdictError::DataError(format!(
                "{}:{}: expected {} columns, got {}",
                path.display(),
                line_no + 1,
                columns_per_row,
                row.len()
            )));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Shuffle `data` and split off a test set of roughly `test_fraction` of the
/// vectors. The fraction is clamped to [0, 1].
pub fn train_test_split<R: Rng + ?Sized>(
    mut data: Vec<Array1<f32>>,
    test_fraction: f32,
    rng: &mut R,
) -> (Vec<Array1<f32>>, Vec<Array1<f32>>) {
    data.shuffle(rng);
    let n_test = (data.len() as f32 * test_fraction.clamp(0.0, 1.0)).round() as usize;
    let test = data.split_off(data.len() - n_test);
    (data, test)
}
