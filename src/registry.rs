// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::{hash_map, HashMap};
use std::iter::FromIterator;

use crate::error::{Error, Result};

/// Used to specify whether a flag is a "stand-alone" boolean flag
/// (needs no value), or whether it requires a value argument.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Clone, Copy)]
pub enum Need {
    /// Flag is stand-alone (no value required).
    Nothing,
    /// Flag needs a value.
    Argument,
}

impl Default for Need {
    fn default() -> Self {
        Need::Nothing
    }
}

impl Need {
    /// Create a new default requirement for a flag.
    pub fn new() -> Self {
        Need::default()
    }

    /// Map an "is boolean" fact onto a requirement.
    pub fn from_bool(is_bool: bool) -> Self {
        if is_bool {
            Need::Nothing
        } else {
            Need::Argument
        }
    }

    /// Returns `true` for boolean (stand-alone) flags.
    pub fn is_bool(self) -> bool {
        self == Need::Nothing
    }
}

/// Registry of the flags whose arity is known in advance.
///
/// Maps the bare flag name (no dashes) onto its [Need]. The scanner consults
/// it to decide whether a flag consumes the following argument.
///
/// # Note
///
/// An [ArgList](crate::ArgList) shares its registry with every list derived
/// from it until an edit has to change it; the edit then works on a copy.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KnownFlags {
    entries: HashMap<String, Need>,
}

impl KnownFlags {
    /// Create an empty registry.
    pub fn new() -> Self {
        KnownFlags::default()
    }

    /// Add (or replace) a flag without checking its name.
    pub fn insert(&mut self, name: impl Into<String>, needs: Need) -> Option<Need> {
        self.entries.insert(name.into(), needs)
    }

    /// Builder form of [KnownFlags::insert].
    pub fn with(mut self, name: impl Into<String>, needs: Need) -> Self {
        self.insert(name, needs);
        self
    }

    /// Register a flag, rejecting names the scanner could never produce.
    pub fn register(&mut self, name: &str, needs: Need) -> Result<()> {
        check_flag_name(name)?;

        self.insert(name, needs);

        Ok(())
    }

    /// Remove a flag, returning its previous requirement.
    pub fn remove(&mut self, name: &str) -> Option<Need> {
        self.entries.remove(name)
    }

    /// Returns the requirement for the flag, if it is known.
    pub fn get(&self, name: &str) -> Option<Need> {
        self.entries.get(name).copied()
    }

    /// Determine if a flag with the specified name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered flags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no flags are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered flags (in no particular order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, Need)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy every flag from `other` into this registry; `other` wins on
    /// conflicts.
    pub fn merge(&mut self, other: &KnownFlags) {
        for (name, needs) in other.iter() {
            self.insert(name, needs);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Need)> for KnownFlags {
    fn from_iter<I: IntoIterator<Item = (S, Need)>>(iter: I) -> Self {
        let mut flags = KnownFlags::new();
        flags.extend(iter);
        flags
    }
}

impl<S: Into<String>> Extend<(S, Need)> for KnownFlags {
    fn extend<I: IntoIterator<Item = (S, Need)>>(&mut self, iter: I) {
        for (name, needs) in iter {
            self.insert(name, needs);
        }
    }
}

impl IntoIterator for KnownFlags {
    type Item = (String, Need);
    type IntoIter = hash_map::IntoIter<String, Need>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Check that `name` is usable as a bare flag name.
pub(crate) fn check_flag_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingFlagName);
    }

    if name.starts_with('-') || name.contains('=') {
        return Err(Error::BadFlagName(name.into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need() {
        let n1 = Need::new();
        let n2 = Need::default();

        assert_eq!(n1, Need::Nothing);
        assert_eq!(n1, n2);

        assert!(Need::Nothing.is_bool());
        assert!(!Need::Argument.is_bool());
        assert_eq!(Need::from_bool(true), Need::Nothing);
        assert_eq!(Need::from_bool(false), Need::Argument);
    }

    #[test]
    fn test_known_flags() {
        let mut flags = KnownFlags::new();

        assert!(flags.is_empty());
        assert_eq!(flags.get("s"), None);

        assert_eq!(flags.insert("s", Need::Argument), None);
        assert_eq!(flags.insert("s", Need::Nothing), Some(Need::Argument));
        assert_eq!(flags.len(), 1);
        assert!(flags.contains("s"));

        let other = KnownFlags::new()
            .with("s", Need::Argument)
            .with("b", Need::Nothing);

        flags.merge(&other);
        assert_eq!(flags, other);

        assert_eq!(flags.remove("b"), Some(Need::Nothing));
        assert_eq!(flags.remove("b"), None);

        let collected: KnownFlags = vec![("x", Need::Nothing), ("y", Need::Argument)]
            .into_iter()
            .collect();
        assert_eq!(collected.get("x"), Some(Need::Nothing));
        assert_eq!(collected.get("y"), Some(Need::Argument));
    }

    #[test]
    fn test_register() {
        #[derive(Debug)]
        struct TestData<'a> {
            name: &'a str,
            result: Result<()>,
        }

        let tests = &[
            TestData {
                name: "",
                result: Err(Error::MissingFlagName),
            },
            TestData {
                name: "-a",
                result: Err(Error::BadFlagName("-a".into())),
            },
            TestData {
                name: "a=b",
                result: Err(Error::BadFlagName("a=b".into())),
            },
            TestData {
                name: "a",
                result: Ok(()),
            },
            TestData {
                name: "some-flag",
                result: Ok(()),
            },
            TestData {
                name: "人",
                result: Ok(()),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let mut flags = KnownFlags::new();
            let result = flags.register(d.name, Need::Argument);

            assert_eq!(result, d.result, "{}", msg);
            assert_eq!(flags.contains(d.name), d.result.is_ok(), "{}", msg);
        }
    }
}
