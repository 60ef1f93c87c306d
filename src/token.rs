// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

pub(crate) const OPT_PREFIX: &str = "-";

/// Special argument used to denote the end of all flags; all arguments that
/// follow are considered to be positional arguments (even if they start
/// with `-`!)
pub const END_OF_OPTIONS: &str = "--";
pub(crate) const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

const INLINE_VALUE_SEP: char = '=';

/// Lexical shape of a single raw argument, independent of any registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lexeme<'a> {
    /// The literal [END_OF_OPTIONS].
    Terminator,
    /// Something introduced by one or two dashes.
    Flag {
        /// Bare flag name.
        name: &'a str,
        /// Text after the first `=`, if there was one (possibly empty).
        value: Option<&'a str>,
        /// Introduced by `--` rather than `-`.
        double_dashed: bool,
    },
    /// Anything else, including malformed flags such as `-=x`.
    Other,
}

/// Classify a raw argument.
///
/// Arguments shorter than two characters or not starting with a dash are
/// never flags. A flag whose name would be empty because it starts with `=`
/// is reported as [Lexeme::Other] so that a downstream parser can reject it
/// on its own terms.
pub fn classify(arg: &str) -> Lexeme<'_> {
    if arg.len() < 2 {
        return Lexeme::Other;
    }

    let rest = match arg.strip_prefix(OPT_PREFIX) {
        Some(rest) => rest,
        None => return Lexeme::Other,
    };

    let (rest, double_dashed) = match rest.strip_prefix(OPT_PREFIX) {
        Some("") => return Lexeme::Terminator,
        Some(rest) => (rest, true),
        None => (rest, false),
    };

    match rest.find(INLINE_VALUE_SEP) {
        Some(0) => Lexeme::Other,
        Some(i) => Lexeme::Flag {
            name: &rest[..i],
            value: Some(&rest[i + 1..]),
            double_dashed,
        },
        None => Lexeme::Flag {
            name: rest,
            value: None,
            double_dashed,
        },
    }
}

/// The part a raw argument plays in the argument list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// A flag name, possibly carrying an inline value.
    Flag {
        /// Present in the registry.
        known: bool,
        /// Complete on its own: registered as boolean, resolved as boolean,
        /// or an unknown flag at the end of the flags.
        bool_flag: bool,
        /// Carries its value after `=`.
        inline: bool,
        /// Introduced by `--`.
        double_dashed: bool,
    },
    /// The value argument following a value-taking flag.
    FlagValue {
        /// The flag owning this value is present in the registry.
        known: bool,
    },
    /// A positional argument.
    Unnamed,
    /// The [END_OF_OPTIONS] marker.
    Terminator,
}

/// A raw argument together with its classification.
///
/// Tokens borrow from the argument list being scanned and only live as long
/// as the traversal producing them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    /// The raw argument.
    pub arg: &'a str,
    /// Bare flag name (flags only).
    pub name: Option<&'a str>,
    /// Inline value for flags, the whole argument for flag values.
    pub value: Option<&'a str>,
    /// What the argument is.
    pub role: Role,
}

impl<'a> Token<'a> {
    /// An unknown flag without an inline value whose arity the scanner
    /// could not decide on its own.
    ///
    /// Once a policy has been applied, a token that is still ambiguous is one
    /// that was resolved as expecting a value.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self.role,
            Role::Flag {
                known: false,
                bool_flag: false,
                inline: false,
                ..
            }
        )
    }

    /// Returns `true` for flag tokens.
    pub fn is_flag(&self) -> bool {
        matches!(self.role, Role::Flag { .. })
    }

    /// Returns `true` for flag and flag value tokens belonging to a
    /// registered flag.
    pub fn is_known(&self) -> bool {
        matches!(
            self.role,
            Role::Flag { known: true, .. } | Role::FlagValue { known: true }
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let role = match self.role {
            Role::Flag { bool_flag: true, .. } => "bool flag",
            Role::Flag { inline: true, .. } => "flag",
            Role::Flag { .. } if self.is_ambiguous() => "ambiguous flag",
            Role::Flag { .. } => "flag",
            Role::FlagValue { .. } => "flag value",
            Role::Unnamed => "unnamed",
            Role::Terminator => "terminator",
        };

        write!(f, "{} ({})", self.arg, role)
    }
}
