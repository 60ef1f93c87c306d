// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
///
/// Scanning and editing argument lists never fails; only the checked
/// constructors return these.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Incorrect API usage errors (programmer error)
    //------------------------------
    /// A flag was registered without a name.
    #[error("missing flag name")]
    MissingFlagName,

    /// A flag name that could never be matched on the command line
    /// (it starts with a dash or contains `=`).
    #[error("bad flag name: {0:?}")]
    BadFlagName(String),

    //------------------------------
    // Runtime errors
    //------------------------------
    /// An argument that was expected to be a flag is a terminator,
    /// a positional argument or malformed (`-=x`).
    #[error("not a flag: {0:?}")]
    NotAFlag(String),
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
