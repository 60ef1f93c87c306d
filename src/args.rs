// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::rc::Rc;

use crate::entry::{Entries, Entry, FlagEntry};
use crate::registry::{KnownFlags, Need};
use crate::scan::{Flow, Scanner, Tokens};
use crate::token::Token;

/// Settings used to control the scanners behaviour.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialOrd, Default, PartialEq)]
pub struct Settings {
    /// If set, an unknown flag without an inline value is taken to be a
    /// boolean flag; by default it consumes the argument that follows it.
    ambiguous_as_bool: bool,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Treat ambiguous flags as boolean flags.
    ///
    /// # Example
    ///
    /// If `-x` is not registered, the command line
    ///
    /// ```bash
    /// $ prog -x foo
    /// ```
    ///
    /// ... is read as the boolean flag `-x` followed by the positional
    /// argument `foo` when this setting is enabled, and as the flag `-x`
    /// with the value `foo` otherwise.
    ///
    /// A flag that is last (or directly followed by `--`) is always boolean
    /// since there is nothing left for it to consume.
    pub fn ambiguous_as_bool(self) -> Self {
        Settings {
            ambiguous_as_bool: true,
        }
    }

    /// Treat ambiguous flags as expecting a value (the default).
    pub fn ambiguous_expects_value(self) -> Self {
        Settings {
            ambiguous_as_bool: false,
        }
    }

    /// Returns `true` if ambiguous flags are treated as boolean flags.
    pub fn is_ambiguous_as_bool(&self) -> bool {
        self.ambiguous_as_bool
    }
}

/// The result of stripping flags from an [ArgList].
#[derive(Clone, Debug, PartialEq)]
pub struct Stripped {
    /// Every entry that was not stripped, in order.
    pub kept: ArgList,
    /// The stripped flags (with their values), in order.
    pub stripped: ArgList,
}

/// A list of raw command-line arguments, the registry of flags known to
/// appear in it and the [Settings] used to scan it.
///
/// An `ArgList` is never modified in place: every edit returns a new list.
/// Lists derived from one another share their registry until an edit needs
/// to change it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgList {
    args: Vec<String>,
    known: Rc<KnownFlags>,
    settings: Settings,
}

impl ArgList {
    /// Create a new argument list (without the program name) with an empty
    /// registry.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ArgList {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Specify the registry of known flags, replacing the current one.
    pub fn registry(self, known: KnownFlags) -> Self {
        ArgList {
            known: Rc::new(known),
            ..self
        }
    }

    /// Specify any settings for the scanner.
    pub fn settings(self, settings: Settings) -> Self {
        ArgList { settings, ..self }
    }

    /// Specify how ambiguous flags are treated.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn ambiguous_as_bool(self, ambiguous_as_bool: bool) -> Self {
        ArgList {
            settings: Settings { ambiguous_as_bool },
            ..self
        }
    }

    /// Add flags to (a copy of) the registry.
    pub fn with_known_flags<I, S>(self, flags: I) -> Self
    where
        I: IntoIterator<Item = (S, Need)>,
        S: Into<String>,
    {
        let mut known = (*self.known).clone();
        known.extend(flags);

        self.registry(known)
    }

    /// Remove flags from (a copy of) the registry.
    pub fn without_known_flags<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = (*self.known).clone();

        for name in names {
            known.remove(name.as_ref());
        }

        self.registry(known)
    }

    /// The raw arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consume the list, returning the raw arguments.
    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// The registry of known flags.
    pub fn known_flags(&self) -> &KnownFlags {
        &self.known
    }

    /// The settings used when scanning.
    pub fn get_settings(&self) -> Settings {
        self.settings
    }

    /// Scanner leaving every ambiguous flag to the caller.
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.args, &self.known)
    }

    /// Iterate over the tokens, resolving ambiguous flags according to
    /// the settings.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self.scanner(), self.settings.ambiguous_as_bool)
    }

    /// Call `f` for every token; its return value decides how the token
    /// is treated.
    ///
    /// # Note
    ///
    /// This ignores the ambiguous flag setting: [Flow::Continue] on an
    /// ambiguous flag makes it a boolean flag and [Flow::ExpectValue] makes
    /// it consume the next argument.
    pub fn visit_tokens<F>(&self, f: F)
    where
        F: FnMut(&Token<'_>) -> Flow,
    {
        self.scanner().run(f)
    }

    /// Iterate over the entries.
    pub fn entries(&self) -> Entries<'_> {
        self.entries_with(&self.known)
    }

    /// Call `f` for every entry until it returns `false`.
    pub fn visit_entries<F>(&self, mut f: F)
    where
        F: FnMut(Entry) -> bool,
    {
        for entry in self.entries() {
            if !f(entry) {
                break;
            }
        }
    }

    fn entries_with<'a>(&'a self, known: &'a KnownFlags) -> Entries<'a> {
        let scanner = Scanner::new(&self.args, known);

        Entries::new(Tokens::new(scanner, self.settings.ambiguous_as_bool))
    }

    /// Build a new list by passing every entry through `f`.
    ///
    /// Returning `None` drops the entry. When a flag is renamed or its
    /// arity changes, the new list gets a copy of the registry recording
    /// the new name and arity; otherwise it shares the registry with this
    /// list.
    pub fn map_entries<F>(&self, mut f: F) -> ArgList
    where
        F: FnMut(Entry) -> Option<Entry>,
    {
        let mut args = Vec::with_capacity(self.args.len());
        let mut known: Option<KnownFlags> = None;

        for entry in self.entries() {
            let before = entry
                .as_flag()
                .map(|flag| (flag.name().to_string(), flag.is_bool()));

            let mapped = match f(entry) {
                Some(mapped) => mapped,
                None => continue,
            };

            if let (Some((name, is_bool)), Entry::Flag(flag)) = (&before, &mapped) {
                if flag.name() != name.as_str() || flag.is_bool() != *is_bool {
                    tracing::debug!(
                        from = %name,
                        to = flag.name(),
                        needs = ?flag.needs(),
                        "flag changed, updating known flags"
                    );

                    known
                        .get_or_insert_with(|| (*self.known).clone())
                        .insert(flag.name(), flag.needs());
                }
            }

            args.extend(mapped.tokens());
        }

        ArgList {
            args,
            known: match known {
                Some(known) => Rc::new(known),
                None => Rc::clone(&self.known),
            },
            settings: self.settings,
        }
    }

    /// Like [ArgList::map_entries], but only flags are passed to `f`; every
    /// other entry is kept as-is.
    pub fn map_flags<F>(&self, mut f: F) -> ArgList
    where
        F: FnMut(FlagEntry) -> Option<Entry>,
    {
        self.map_entries(|entry| match entry {
            Entry::Flag(flag) => f(flag),
            other => Some(other),
        })
    }

    /// Returns the first flag with the specified name.
    pub fn lookup_flag(&self, name: &str) -> Option<FlagEntry> {
        self.entries().find_map(|entry| match entry {
            Entry::Flag(flag) if flag.name() == name => Some(flag),
            _ => None,
        })
    }

    /// Remove every flag with the specified name (and its value).
    ///
    /// Also returns whether anything was removed.
    pub fn delete_flag(&self, name: &str) -> (ArgList, bool) {
        let mut deleted = false;

        let args = self.map_flags(|flag| {
            if flag.name() == name {
                deleted = true;
                return None;
            }

            Some(flag.into())
        });

        (args, deleted)
    }

    /// Replace every flag named like `insert` with the result of `update`,
    /// or, if there is no such flag, put `insert` in front of all the other
    /// arguments.
    pub fn upsert_flag<F>(&self, insert: FlagEntry, mut update: F) -> ArgList
    where
        F: FnMut(FlagEntry) -> FlagEntry,
    {
        let mut updated = false;

        let args = self.map_flags(|flag| {
            if flag.name() != insert.name() {
                return Some(flag.into());
            }

            updated = true;

            Some(update(flag).into())
        });

        if updated {
            return args;
        }

        tracing::debug!(flag = %insert, "flag not found, inserting");

        let mut known = (*self.known).clone();
        known.insert(insert.name(), insert.needs());

        let mut args = insert.tokens();
        args.extend(self.args.iter().cloned());

        ArgList {
            args,
            known: Rc::new(known),
            settings: self.settings,
        }
    }

    /// Split the list into the flags that are neither in the registry nor in
    /// `also_known`, and everything else.
    ///
    /// The flags in `also_known` are scanned with the arity it gives them.
    /// Both resulting lists share this list's registry.
    pub fn strip_unknown(&self, also_known: &KnownFlags) -> Stripped {
        self.strip(also_known, |name| {
            self.known.contains(name) || also_known.contains(name)
        })
    }

    /// Split the list into the flags that are not in the registry, and
    /// everything else.
    ///
    /// Unlike [ArgList::strip_unknown], the flags in `ignored` are
    /// stripped: the registry only tells the scanner whether they take a
    /// value.
    pub fn strip_ignored(&self, ignored: &KnownFlags) -> Stripped {
        self.strip(ignored, |name| self.known.contains(name))
    }

    fn strip<F>(&self, extra: &KnownFlags, keep: F) -> Stripped
    where
        F: Fn(&str) -> bool,
    {
        let merged;

        let known = if extra.is_empty() {
            &*self.known
        } else {
            let mut all = (*self.known).clone();
            all.merge(extra);
            merged = all;
            &merged
        };

        let mut kept = Vec::with_capacity(self.args.len());
        let mut stripped = Vec::new();

        for entry in self.entries_with(known) {
            match entry {
                Entry::Flag(ref flag) if !keep(flag.name()) => stripped.extend(entry.tokens()),
                _ => kept.extend(entry.tokens()),
            }
        }

        tracing::debug!(kept = kept.len(), stripped = stripped.len(), "stripped flags");

        Stripped {
            kept: self.derive(kept),
            stripped: self.derive(stripped),
        }
    }

    fn derive(&self, args: Vec<String>) -> ArgList {
        ArgList {
            args,
            known: Rc::clone(&self.known),
            settings: self.settings,
        }
    }
}
