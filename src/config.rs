//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then the
//! `CONTACT_IMPORT_WORKERS` environment variable, then CLI overrides.

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_WORKERS, MAX_WORKERS, WORKERS_ENV_VAR};
use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Number of concurrent coercion tasks (1 = strictly sequential)
    pub workers: usize,

    /// Lines buffered before a parallel batch is dispatched
    pub batch_size: usize,

    /// Drop the first line when it looks like the column header
    pub detect_header: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, DEFAULT_MAX_WORKERS),
            batch_size: DEFAULT_BATCH_SIZE,
            detect_header: true,
        }
    }
}

impl ImportConfig {
    /// Sequential configuration with header detection enabled
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            ..Self::default()
        }
    }

    /// Defaults with the environment layer applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(WORKERS_ENV_VAR) {
            let workers = value.trim().parse::<usize>().map_err(|_| {
                ImportError::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    WORKERS_ENV_VAR, value
                ))
            })?;
            debug!("Worker count overridden by {}: {}", WORKERS_ENV_VAR, workers);
            config.workers = workers;
        }

        Ok(config)
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with custom batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Treat every line as data, including a header-like first line
    pub fn without_header_detection(mut self) -> Self {
        self.detect_header = false;
        self
    }

    /// Whether coercion is fanned out over multiple tasks
    pub fn is_parallel(&self) -> bool {
        self.workers > 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ImportError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(ImportError::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if self.batch_size == 0 {
            return Err(ImportError::configuration(
                "Batch size must be greater than 0",
            ));
        }

        Ok(())
    }
}
