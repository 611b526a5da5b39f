//! CSV dataset loader
//!
//! Reads dense numeric tables where:
//! - Every row has the same number of comma-separated fields
//! - The last column is optionally a label
//! - First row can be a header (automatically detected)
//! - Blank lines and lines starting with `#` are skipped

use crate::core::{KernelError, Result};
use log::debug;
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dense dataset loaded from a CSV file
#[derive(Debug, Clone)]
pub struct CsvDataset {
    features: Array2<f64>,
    labels: Option<Array1<f64>>,
}

impl CsvDataset {
    /// Load a dataset from a CSV file
    ///
    /// When `with_labels` is set the last column is split off as labels.
    pub fn from_file<P: AsRef<Path>>(path: P, with_labels: bool) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading CSV dataset from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), with_labels)
    }

    /// Load a dataset from a reader, detecting a header row
    pub fn from_reader<R: BufRead>(reader: R, with_labels: bool) -> Result<Self> {
        Self::from_reader_with_options(reader, with_labels, true)
    }

    /// Load a dataset from a reader with explicit header detection
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        with_labels: bool,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut width: Option<usize> = None;
        let mut header_checked = !auto_detect_header;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !header_checked {
                header_checked = true;
                if Self::is_header_line(line) {
                    debug!("skipping CSV header: {line}");
                    continue;
                }
            }

            let row = Self::parse_data_line(line, line_no + 1)?;
            match width {
                Some(w) if w != row.len() => {
                    return Err(KernelError::ParseError(format!(
                        "line {}: expected {w} fields, found {}",
                        line_no + 1,
                        row.len()
                    )));
                }
                Some(_) => {}
                None => width = Some(row.len()),
            }
            rows.push(row);
        }

        let width = match width {
            Some(w) => w,
            None => return Err(KernelError::EmptyDataset),
        };
        if with_labels && width < 2 {
            return Err(KernelError::ParseError(
                "a labelled dataset needs at least one feature column and a label column"
                    .to_string(),
            ));
        }

        let num_features = if with_labels { width - 1 } else { width };
        let num_samples = rows.len();
        let mut features = Array2::zeros((num_samples, num_features));
        let mut labels = with_labels.then(|| Array1::zeros(num_samples));

        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().take(num_features).enumerate() {
                features[[i, j]] = *value;
            }
            if let Some(labels) = labels.as_mut() {
                labels[i] = row[num_features];
            }
        }

        debug!("loaded {num_samples} samples with {num_features} features");
        Ok(Self { features, labels })
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').collect();
        let non_numeric = fields
            .iter()
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric * 2 > fields.len()
    }

    fn parse_data_line(line: &str, line_no: usize) -> Result<Vec<f64>> {
        line.split(',')
            .enumerate()
            .map(|(col, field)| {
                let field = field.trim();
                field.parse::<f64>().map_err(|_| {
                    KernelError::ParseError(format!(
                        "line {line_no}, column {}: invalid number '{field}'",
                        col + 1
                    ))
                })
            })
            .collect()
    }

    /// Feature matrix of shape (num_samples, num_features)
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> Option<&Array1<f64>> {
        self.labels.as_ref()
    }

    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.features.ncols()
    }

    /// Split into the feature matrix and optional labels
    pub fn into_parts(self) -> (Array2<f64>, Option<Array1<f64>>) {
        (self.features, self.labels)
    }
}
