// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the core parser.
//!
//! Only programming-contract violations surface as errors; malformed STEP
//! input is always tolerated and degrades to absent values.

use thiserror::Error;

/// Result alias for the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing source file path")]
    MissingPath,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
