//! Custom error types for the Karavan cache.
//!
//! The store itself never fails: absent keys are normal outcomes. Errors only
//! arise while loading configuration and seed data at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the cache process.
#[derive(Debug, Error)]
pub enum CacheError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Invalid configuration or seed data; the cache refuses to start.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Duplicate project ID: {id}")]
    DuplicateProjectId { id: String },

    #[error("Duplicate file name '{name}' in project {project_id}")]
    DuplicateFileName { project_id: String, name: String },
}

/// Result type alias using CacheError.
pub type CacheResult<T> = Result<T, CacheError>;
