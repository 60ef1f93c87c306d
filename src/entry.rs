// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::registry::Need;
use crate::scan::Tokens;
use crate::token::{classify, Lexeme, Role, END_OF_OPTIONS, LONG_OPT_PREFIX, OPT_PREFIX};

const BOOL_TRUE: &str = "true";

/// Boolean literals a boolean flag accepts as its inline value.
const BOOL_LITERALS: &[&str] = &[
    "1", "t", "T", "TRUE", "true", "True", "0", "f", "F", "FALSE", "false", "False",
];

fn is_bool_literal(value: &str) -> bool {
    BOOL_LITERALS.contains(&value)
}

/// A flag together with its value (if any), as it appears on the command
/// line.
///
/// Rendering rules (see [FlagEntry::tokens]):
///
/// - boolean flag: `-name`
/// - inline value: `-name=value`
/// - separate value: `-name value`
///
/// with `--` instead of `-` for double-dashed flags.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FlagEntry {
    name: String,
    value: Option<String>,
    inline: bool,
    double_dashed: bool,
    is_bool: bool,
}

impl FlagEntry {
    /// Create a flag taking a separate value (`-name value`).
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        FlagEntry {
            name: name.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create a boolean flag without a value (`-name`).
    pub fn new_bool(name: impl Into<String>) -> Self {
        FlagEntry {
            name: name.into(),
            is_bool: true,
            ..Default::default()
        }
    }

    /// Create a boolean flag with an explicit inline value (`-name=value`).
    ///
    /// An empty value gives the same result as [FlagEntry::new_bool].
    pub fn new_bool_with(name: impl Into<String>, value: impl Into<String>) -> Self {
        FlagEntry::new_bool(name).with_value(value)
    }

    /// Parse a single raw argument into a flag.
    ///
    /// Since the argument is looked at in isolation, a flag without an
    /// inline value is taken to be boolean, and one with an inline value is
    /// taken to be a value flag.
    pub fn from_arg(arg: &str) -> Result<Self> {
        match classify(arg) {
            Lexeme::Flag {
                name,
                value,
                double_dashed,
            } => Ok(FlagEntry {
                name: name.into(),
                value: value.map(String::from),
                inline: value.is_some(),
                double_dashed,
                is_bool: value.is_none(),
            }),
            _ => Err(Error::NotAFlag(arg.into())),
        }
    }

    /// Bare flag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flag value, if there is one.
    ///
    /// A value flag found at the very end of the arguments has no value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value is attached with `=`.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Introduced by `--`.
    pub fn is_double_dashed(&self) -> bool {
        self.double_dashed
    }

    /// Does not consume a separate value.
    pub fn is_bool(&self) -> bool {
        self.is_bool
    }

    /// The requirement to record for this flag in a registry.
    pub fn needs(&self) -> Need {
        Need::from_bool(self.is_bool)
    }

    /// Rename the flag.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        FlagEntry {
            name: name.into(),
            ..self
        }
    }

    /// Change the value.
    ///
    /// For a boolean flag, a non-empty value is rendered inline and a value
    /// that is not a boolean literal turns it into a value flag. An empty
    /// value leaves a bare boolean flag.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();

        if self.value.as_deref() == Some(value.as_str()) {
            return self;
        }

        if self.is_bool {
            self.inline = !value.is_empty();

            if !self.inline {
                self.value = None;
                return self;
            }

            if !is_bool_literal(&value) {
                self.is_bool = false;
            }
        }

        self.value = Some(value);
        self
    }

    /// Make the flag a bare boolean flag (implicitly `true`).
    pub fn with_no_value(self) -> Self {
        FlagEntry {
            value: None,
            inline: false,
            is_bool: true,
            ..self
        }
    }

    /// Attach the value with `=` or pass it as a separate argument.
    ///
    /// A bare boolean flag made inline gets an explicit `true`. A boolean
    /// flag made non-inline becomes a value flag (with an empty value if it
    /// had none).
    pub fn with_inline(mut self, inline: bool) -> Self {
        if self.inline == inline {
            return self;
        }

        if inline {
            if self.is_bool && self.value.is_none() {
                self.value = Some(BOOL_TRUE.into());
            }
        } else {
            self.is_bool = false;

            if self.value.is_none() {
                self.value = Some(String::new());
            }
        }

        self.inline = inline;
        self
    }

    /// Use `--` (or `-`) as the flag prefix.
    pub fn with_double_dashes(self, double_dashed: bool) -> Self {
        FlagEntry {
            double_dashed,
            ..self
        }
    }

    /// The raw arguments representing this flag.
    pub fn tokens(&self) -> Vec<String> {
        let prefix = if self.double_dashed {
            LONG_OPT_PREFIX
        } else {
            OPT_PREFIX
        };

        let name = format!("{}{}", prefix, self.name);

        match (&self.value, self.inline) {
            (value, true) => vec![format!("{}={}", name, value.as_deref().unwrap_or(""))],
            (Some(value), false) if !self.is_bool => vec![name, value.clone()],
            _ => vec![name],
        }
    }

    /// Number of raw arguments [FlagEntry::tokens] returns.
    pub fn token_count(&self) -> usize {
        if self.inline || self.is_bool || self.value.is_none() {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for FlagEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// The kind of an [Entry].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntryKind {
    /// See [Entry::Flag].
    Flag,
    /// See [Entry::Terminator].
    Terminator,
    /// See [Entry::Unnamed].
    Unnamed,
}

/// A unit of the argument list made of one or more raw arguments.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Entry {
    /// A flag and its value.
    Flag(FlagEntry),
    /// The end-of-flags marker (`--`).
    Terminator,
    /// A run of positional arguments, rendered as-is.
    Unnamed(Vec<String>),
}

impl Entry {
    /// The kind of entry.
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Flag(_) => EntryKind::Flag,
            Entry::Terminator => EntryKind::Terminator,
            Entry::Unnamed(_) => EntryKind::Unnamed,
        }
    }

    /// The flag, for flag entries.
    pub fn as_flag(&self) -> Option<&FlagEntry> {
        match self {
            Entry::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    /// The raw arguments representing this entry.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Entry::Flag(flag) => flag.tokens(),
            Entry::Terminator => vec![END_OF_OPTIONS.into()],
            Entry::Unnamed(args) => args.clone(),
        }
    }

    /// Number of raw arguments [Entry::tokens] returns.
    pub fn token_count(&self) -> usize {
        match self {
            Entry::Flag(flag) => flag.token_count(),
            Entry::Terminator => 1,
            Entry::Unnamed(args) => args.len(),
        }
    }
}

impl From<FlagEntry> for Entry {
    fn from(flag: FlagEntry) -> Self {
        Entry::Flag(flag)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// Iterator folding tokens into entries.
///
/// A flag expecting a value is joined with the value that follows it, and
/// consecutive positional arguments are joined into a single
/// [Entry::Unnamed].
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    tokens: Peekable<Tokens<'a>>,
}

impl<'a> Entries<'a> {
    /// Assemble the entries produced by `tokens`.
    pub fn new(tokens: Tokens<'a>) -> Self {
        Entries {
            tokens: tokens.peekable(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;

        let entry = match token.role {
            Role::Flag {
                bool_flag,
                inline,
                double_dashed,
                ..
            } => {
                let value = if bool_flag || inline {
                    token.value
                } else {
                    self.tokens
                        .next_if(|t| matches!(t.role, Role::FlagValue { .. }))
                        .and_then(|t| t.value)
                };

                Entry::Flag(FlagEntry {
                    name: token.name.unwrap_or_default().into(),
                    value: value.map(String::from),
                    inline,
                    double_dashed,
                    is_bool: bool_flag,
                })
            }
            Role::Terminator => Entry::Terminator,
            // A value is always claimed by the flag before it, so only
            // positional arguments are left.
            Role::FlagValue { .. } | Role::Unnamed => {
                let mut args = vec![token.arg.to_string()];

                while let Some(next) = self
                    .tokens
                    .next_if(|t| matches!(t.role, Role::Unnamed))
                {
                    args.push(next.arg.into());
                }

                Entry::Unnamed(args)
            }
        };

        Some(entry)
    }
}
