//! Dataset loading for comma-delimited numeric matrices
//!
//! Input files carry one header row (discarded) followed by numeric rows.
//! Every data row must have the same number of columns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a dataset or class-label file
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot find file at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: cannot parse field '{token}' as a number")]
    BadField {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{0} contains no data rows after the header")]
    Empty(PathBuf),

    #[error("Class file has {labels} labels but dataset has {rows} rows")]
    LabelMismatch { labels: usize, rows: usize },
}

/// An ordered numeric matrix: one observation per row, fixed column count.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f32>,
    cols: usize,
}

impl Dataset {
    /// Build a dataset from row-major values and a column count.
    /// `values.len()` must be a multiple of `cols`.
    pub fn from_flat(values: Vec<f32>, cols: usize) -> Self {
        debug_assert!(cols > 0);
        debug_assert_eq!(values.len() % cols, 0);
        Self { values, cols }
    }

    /// Load a matrix from a comma-delimited file, discarding the header row.
    pub fn from_csv(path: &Path) -> Result<Self, DatasetError> {
        let raw = read_rows(path)?;

        let cols = raw[0].1.len();
        let mut values = Vec::with_capacity(raw.len() * cols);
        for (line, row) in &raw {
            if row.len() != cols {
                return Err(DatasetError::RaggedRow {
                    path: path.to_path_buf(),
                    line: *line,
                    expected: cols,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Ok(Self { values, cols })
    }

    /// Number of observations.
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.values.len() / self.cols
        }
    }

    /// Number of features per observation.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of the matrix, one slice per observation.
    pub fn row_slices(&self) -> Vec<&[f32]> {
        self.values.chunks(self.cols).collect()
    }

    /// Keep only the first `n_obs` observations. `-1` (or any negative
    /// value) and anything at or beyond the current row count keep the
    /// dataset untouched.
    pub fn truncate(&mut self, n_obs: i64) {
        let keep = effective_rows(n_obs, self.rows());
        self.values.truncate(keep * self.cols);
    }
}

/// Load a class-label vector: the first column of a comma-delimited file
/// with a header row.
pub fn load_classes(path: &Path) -> Result<Vec<f32>, DatasetError> {
    let raw = read_rows(path)?;
    Ok(raw.iter().map(|(_, row)| row[0]).collect())
}

/// Reject a label vector whose length differs from the dataset's row count.
pub fn check_labels(labels: &[f32], rows: usize) -> Result<(), DatasetError> {
    if labels.len() != rows {
        return Err(DatasetError::LabelMismatch {
            labels: labels.len(),
            rows,
        });
    }
    Ok(())
}

/// Resolve an `n_obs` request against the available row count.
pub fn effective_rows(n_obs: i64, rows: usize) -> usize {
    if n_obs < 0 {
        return rows;
    }
    (n_obs as usize).min(rows)
}

/// Shared reader: skip the header, split on commas, parse every field.
/// Yields `(line_number, row)` pairs so callers can report positions.
fn read_rows(path: &Path) -> Result<Vec<(usize, Vec<f32>)>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Line 1 is the header.
        if i == 0 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in line.split(',') {
            let token = token.trim();
            let value = token.parse::<f32>().map_err(|_| DatasetError::BadField {
                path: path.to_path_buf(),
                line: i + 1,
                token: token.to_string(),
            })?;
            row.push(value);
        }
        rows.push((i + 1, row));
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }
    Ok(rows)
}
