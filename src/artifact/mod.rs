//! Artifact persistence with filename fallback.
//!
//! The [`ArtifactWriter`] saves a rendered payload to a target path. When
//! the target is blocked (permission denied, or the path is a directory) it
//! retries under derived names such as `out(1).png`, `out(2).png`, up to a
//! fixed number of attempts.
//!
//! # Example
//!
//! ```
//! use construct::artifact::ArtifactWriter;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let base = temp.path().join("out.png");
//!
//! let outcome = ArtifactWriter::new()
//!     .write(&base, |path: &std::path::Path| std::fs::write(path, b"payload"))
//!     .unwrap();
//!
//! assert!(outcome.succeeded());
//! assert_eq!(outcome.final_path(), Some(base.as_path()));
//! ```

pub mod candidate;
pub mod writer;

pub use candidate::candidate_path;
pub use writer::{ArtifactWriter, Render, SaveAttempt, WriteOutcome, MAX_ATTEMPTS};
