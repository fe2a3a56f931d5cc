//! Construct - Python environment checks for the Matrix exercises.
//!
//! Construct bundles three small tools behind one CLI: a virtual
//! environment status report, a dependency check that renders and saves a
//! signal plot, and a `.env` configuration reader.
//!
//! # Modules
//!
//! - [`analysis`] - Signal generation and PNG plot rendering
//! - [`artifact`] - Saving files with fallback filenames
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.env` parsing and layered configuration
//! - [`environment`] - Python interpreter and virtual environment detection
//! - [`error`] - Error types and result aliases
//! - [`packages`] - Installed package lookup and dependency checks
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use construct::artifact::candidate_path;
//! use std::path::Path;
//!
//! let base = Path::new("matrix_analysis.png");
//! assert_eq!(candidate_path(base, 0), Path::new("matrix_analysis.png"));
//! assert_eq!(candidate_path(base, 2), Path::new("matrix_analysis(2).png"));
//! ```

pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod packages;
pub mod ui;

pub use error::{ConstructError, Result};
