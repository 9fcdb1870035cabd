/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Errors reading a configuration file.
///
/// Problems with the *content* of a configuration are never errors; they are
/// reported as diagnostics and the affected entries skipped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {format} configuration: {message}")]
    Parse { format: String, message: String },
}

/// Errors from the crosswalk's outer surface.
#[derive(Debug, Error)]
pub enum CrosswalkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CrosswalkError>;
