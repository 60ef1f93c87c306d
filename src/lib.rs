// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Crate for classifying and editing command-line arguments _before_ they
//! are handed to an argument parser.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Details](#details)
//! * [Terminology](#terminology)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! A parser that binds command-line arguments to typed values usually wants
//! to see only the flags it knows about. This crate reads a raw argument
//! vector, works out which arguments are flags, flag values, positional
//! arguments and the `--` terminator, and lets you look up, delete, insert,
//! rewrite or strip flags, producing a new argument vector.
//!
//! The hard part is that an unknown flag gives no clue whether it takes a
//! value: in `-x foo`, `foo` may be the value of `-x` or a positional
//! argument. Such flags are "ambiguous" and are resolved either with a fixed
//! policy ([Settings]) or by the caller, one token at a time ([Scanner]).
//!
//! # Quickstart
//!
//! 1. Describe the flags you know about in a [KnownFlags] registry.
//!
//!    ```rust
//!    use cmdargs::{KnownFlags, Need};
//!
//!    let known = KnownFlags::new()
//!        .with("name", Need::Argument)
//!        .with("verbose", Need::Nothing);
//!    ```
//!
//! 1. Wrap the arguments (without the program name) in an [ArgList].
//!
//!    ```rust
//!    # use cmdargs::{ArgList, KnownFlags, Need};
//!    # let known = KnownFlags::new();
//!    let args = ArgList::new(vec!["-name", "foo", "-colour", "red", "file"])
//!        .registry(known)
//!        .ambiguous_as_bool(true);
//!    ```
//!
//! 1. Edit the list. The original list is left untouched.
//!
//!    ```rust
//!    use cmdargs::{ArgList, KnownFlags, Need};
//!
//!    let known = KnownFlags::new()
//!        .with("name", Need::Argument)
//!        .with("verbose", Need::Nothing);
//!
//!    let args = ArgList::new(vec!["-name", "foo", "-colour", "red", "file"])
//!        .registry(known)
//!        .ambiguous_as_bool(true);
//!
//!    let res = args.strip_unknown(&KnownFlags::new());
//!
//!    // `-colour` is unknown, so it is taken to be a boolean flag and
//!    // `red` starts the positional arguments.
//!    assert_eq!(res.kept.args(), &["-name", "foo", "red", "file"]);
//!    assert_eq!(res.stripped.args(), &["-colour"]);
//!    ```
//!
//! # Examples
//!
//! Looking up and changing a flag:
//!
//! ```rust
//! use cmdargs::{ArgList, FlagEntry, Need};
//!
//! let args = ArgList::new(vec!["--level=3", "-q", "input"])
//!     .with_known_flags(vec![("level", Need::Argument), ("q", Need::Nothing)]);
//!
//! let level = args.lookup_flag("level").unwrap();
//! assert_eq!(level.value(), Some("3"));
//!
//! let args = args.upsert_flag(FlagEntry::new("level", "1"), |old| old.with_value("4"));
//! assert_eq!(args.args(), &["--level=4", "-q", "input"]);
//!
//! // Flags that are not found are inserted at the front.
//! let args = args.upsert_flag(FlagEntry::new_bool("debug"), |old| old);
//! assert_eq!(args.args(), &["-debug", "--level=4", "-q", "input"]);
//!
//! let (args, deleted) = args.delete_flag("q");
//! assert!(deleted);
//! assert_eq!(args.args(), &["-debug", "--level=4", "input"]);
//! ```
//!
//! Resolving ambiguous flags yourself:
//!
//! ```rust
//! use cmdargs::{ArgList, Flow};
//!
//! let args = ArgList::new(vec!["-output", "out.txt", "-force", "in.txt"]);
//! let mut seen = Vec::new();
//!
//! args.visit_tokens(|token| {
//!     seen.push(token.to_string());
//!
//!     match token.name {
//!         // We happen to know `-output` wants a value.
//!         Some("output") => Flow::ExpectValue,
//!         _ => Flow::Continue,
//!     }
//! });
//!
//! assert_eq!(
//!     seen,
//!     vec![
//!         "-output (ambiguous flag)",
//!         "out.txt (flag value)",
//!         "-force (ambiguous flag)",
//!         "in.txt (unnamed)",
//!     ]
//! );
//! ```
//!
//! # Details
//!
//! Arguments are scanned once, left to right, and never revisited:
//!
//! - A registered flag is complete ([Need::Nothing]) or takes the next
//!   argument as its value ([Need::Argument]), whatever that argument looks
//!   like.
//! - An unknown flag with an inline value (`-x=1`) is complete.
//! - An unknown flag that is the last argument, or is directly followed by
//!   `--`, is a boolean flag.
//! - Any other unknown flag is ambiguous.
//! - `--` ends the flags: everything after it is positional.
//! - So does the first positional argument: flags and positional arguments
//!   are not interleaved, so everything after it is positional too.
//! - A value flag at the very end has no value. This is not an error here;
//!   the parser consuming the arguments reports it.
//! - `-=x` is not a valid flag and is treated as a positional argument.
//!
//! Tokens are folded into [Entry] values: a flag with its value, the
//! terminator, or a run of positional arguments. Rendering the entries of an
//! unedited list gives back exactly the arguments it was created from.
//!
//! # Terminology
//!
//! - A "flag" is an argument introduced by one or two dashes, for example
//!   `-v` or `--verbose`.
//! - A "boolean flag" needs no separate value; it may still carry an inline
//!   value (`-v=false`).
//! - An "inline value" is attached to the flag name with `=` (`--level=3`).
//! - A "known flag" is one in the [KnownFlags] registry.
//! - An "ambiguous flag" is an unknown flag, without an inline value, that is
//!   not at the end of the flags.
//! - The "terminator" is the special argument `--`.
//! - A "positional argument" (or "unnamed argument") is anything else.
//!
//! # Limitations
//!
//! - No shell quoting or escaping is performed.
//! - Flag values are not validated.
//! - Bundled single-letter flags (`-abc`) are read as one flag named `abc`.

mod args;
mod entry;
mod error;
mod registry;
mod scan;
mod token;

pub use error::{Error, Result};

pub use args::{ArgList, Settings, Stripped};
pub use entry::{Entries, Entry, EntryKind, FlagEntry};
pub use registry::{KnownFlags, Need};
pub use scan::{Flow, Scanner, Tokens};
pub use token::{classify, Lexeme, Role, Token, END_OF_OPTIONS};
