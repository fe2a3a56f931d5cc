//! Configuration for construct.
//!
//! - `.env` parsing in [`env_file`]
//! - Prioritized variable layers and the [`ConfigSource`] trait in [`source`]
//! - The typed [`MatrixConfig`] consumed by `construct oracle` in [`matrix`]
//!
//! Nothing here mutates the process environment. Values are read into a
//! [`LayeredConfig`] once and handed to whoever needs them.
//!
//! # Example
//!
//! ```
//! use construct::config::{ConfigSource, LayeredConfig, MatrixConfig};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let env_path = temp.path().join(".env");
//! fs::write(
//!     &env_path,
//!     "MATRIX_MODE=development\nDATABASE_URL=postgres://localhost/matrix\n\
//!      API_KEY=red-pill\nLOG_LEVEL=DEBUG\nZION_ENDPOINT=https://zion.example\n",
//! )
//! .unwrap();
//!
//! let mut source = LayeredConfig::new();
//! source.load(&env_path).unwrap();
//! let config = MatrixConfig::from_source(&source).unwrap();
//! assert_eq!(config.mode, "development");
//! ```

pub mod env_file;
pub mod matrix;
pub mod source;

pub use env_file::EnvFileParser;
pub use matrix::{env_file_present, MatrixConfig, ENV_FILE_NAME, REQUIRED_VARIABLES};
pub use source::{ConfigSource, EnvLayer, LayeredConfig, PROCESS_ENV_SOURCE};
