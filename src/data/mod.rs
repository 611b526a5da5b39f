//! Data loading
//!
//! Kernel matrices work on dense `(n_samples, n_features)` arrays; this
//! module turns files on disk into those arrays.

pub mod csv;

pub use self::csv::CsvDataset;
