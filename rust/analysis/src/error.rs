// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for profile loading. Aggregation itself cannot fail.

use thiserror::Error;

/// Result alias for the analysis crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Analysis error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing profile file path")]
    MissingPath,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}
