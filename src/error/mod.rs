//! # Error Module
//!
//! Error types for the similarity search engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fatal vs. recoverable** - only the reference image and the gallery
//!   roots can abort a search; a broken gallery file is skipped

use crate::core::hasher::{GridShape, HashVariant};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("{path} is not a valid image: {reason}")]
    InvalidReference { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors that occur while discovering candidate images
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Gallery path not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while decoding or hashing an image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("{variant} expects a {expected} grid, got {actual}")]
    InvalidInput {
        variant: HashVariant,
        expected: GridShape,
        actual: GridShape,
    },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SearchError>;
