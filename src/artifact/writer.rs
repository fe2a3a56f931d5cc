//! Bounded save loop with filename fallback.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConstructError, Result};

use super::candidate::candidate_path;

/// Total number of candidate paths tried per save: the base plus four alternates.
pub const MAX_ATTEMPTS: usize = 5;

/// Something that can write its payload to a filesystem path.
///
/// Implementations must tolerate being called several times with different
/// paths; only the first successful call is kept.
pub trait Render {
    /// Write the payload to `path`.
    fn render_to(&mut self, path: &Path) -> io::Result<()>;
}

impl<F> Render for F
where
    F: FnMut(&Path) -> io::Result<()>,
{
    fn render_to(&mut self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// One try at saving under a specific candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAttempt {
    /// Path written on this attempt.
    pub candidate_path: PathBuf,
    /// 1-based attempt number.
    pub attempt_index: usize,
}

impl SaveAttempt {
    fn new(base: &Path, index: usize) -> Self {
        Self {
            candidate_path: candidate_path(base, index),
            attempt_index: index + 1,
        }
    }
}

/// Final result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The payload was written to `path`.
    Saved {
        path: PathBuf,
        failed_attempts: Vec<SaveAttempt>,
    },
    /// Every candidate was blocked; nothing was written.
    Exhausted {
        base: PathBuf,
        failed_attempts: Vec<SaveAttempt>,
    },
}

impl WriteOutcome {
    /// Whether a file was written.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Path that was written, if any.
    pub fn final_path(&self) -> Option<&Path> {
        match self {
            Self::Saved { path, .. } => Some(path),
            Self::Exhausted { .. } => None,
        }
    }

    /// Attempts that failed with a recoverable error, in order.
    pub fn failed_attempts(&self) -> &[SaveAttempt] {
        match self {
            Self::Saved {
                failed_attempts, ..
            }
            | Self::Exhausted {
                failed_attempts, ..
            } => failed_attempts,
        }
    }

    /// Convert into the written path, or [`ConstructError::WriteExhausted`].
    pub fn into_result(self) -> Result<PathBuf> {
        match self {
            Self::Saved { path, .. } => Ok(path),
            Self::Exhausted {
                base,
                failed_attempts,
            } => Err(ConstructError::WriteExhausted {
                base,
                attempts: failed_attempts.len(),
            }),
        }
    }
}

/// How a single attempt failed.
#[derive(Debug)]
enum AttemptFailure {
    /// The candidate is blocked; the next candidate may work.
    Recoverable(io::Error),
    /// Retrying under another name will not help.
    Fatal(io::Error),
}

impl From<io::Error> for AttemptFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied | io::ErrorKind::IsADirectory => {
                Self::Recoverable(err)
            }
            _ => Self::Fatal(err),
        }
    }
}

/// Saves payloads, falling back to derived filenames when the target is blocked.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    max_attempts: usize,
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter {
    /// Create a writer that tries [`MAX_ATTEMPTS`] candidates.
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Lower the number of candidates tried, within `1..=MAX_ATTEMPTS`.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.clamp(1, MAX_ATTEMPTS);
        self
    }

    /// Number of candidates this writer tries.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Save through `render`, starting at `base`.
    ///
    /// Permission-denied and is-a-directory failures move on to the next
    /// candidate. Any other I/O error aborts immediately with
    /// [`ConstructError::UnrecoverableWrite`].
    pub fn write<R: Render>(&self, base: &Path, mut render: R) -> Result<WriteOutcome> {
        let mut failed_attempts = Vec::new();

        for index in 0..self.max_attempts {
            let attempt = SaveAttempt::new(base, index);
            debug!(
                "Save attempt {}/{}: {}",
                attempt.attempt_index,
                self.max_attempts,
                attempt.candidate_path.display()
            );

            match render
                .render_to(&attempt.candidate_path)
                .map_err(AttemptFailure::from)
            {
                Ok(()) => {
                    debug!("Saved {}", attempt.candidate_path.display());
                    return Ok(WriteOutcome::Saved {
                        path: attempt.candidate_path,
                        failed_attempts,
                    });
                }
                Err(AttemptFailure::Recoverable(err)) => {
                    debug!(
                        "Cannot save to {}: {}",
                        attempt.candidate_path.display(),
                        err
                    );
                    failed_attempts.push(attempt);
                }
                Err(AttemptFailure::Fatal(source)) => {
                    return Err(ConstructError::UnrecoverableWrite {
                        path: attempt.candidate_path,
                        source,
                    });
                }
            }
        }

        debug!(
            "Giving up on {} after {} attempts",
            base.display(),
            failed_attempts.len()
        );
        Ok(WriteOutcome::Exhausted {
            base: base.to_path_buf(),
            failed_attempts,
        })
    }
}
