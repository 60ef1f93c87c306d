// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! The ambiguity-resolving scanner.
//!
//! Arguments are classified strictly left to right in a single pass. The only
//! thing the scanner cannot decide by itself is whether an unknown flag
//! without an inline value consumes the next argument; that decision is
//! handed to the consumer (see [Flow]) or taken from a fixed policy
//! (see [Tokens]).

use crate::registry::KnownFlags;
use crate::token::{classify, Lexeme, Role, Token, END_OF_OPTIONS};

/// Consumer decision returned after each token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    /// Accept the token as classified. An ambiguous flag is treated as a
    /// boolean flag.
    Continue,
    /// Treat the ambiguous flag just returned as expecting a value: the next
    /// argument becomes its value whatever it looks like.
    ///
    /// Behaves like [Flow::Continue] for any other token.
    ExpectValue,
    /// End the traversal; no more tokens are produced.
    Stop,
}

/// What the next argument is going to be, regardless of its shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Expect {
    Anything,
    /// Sticky: once set, every remaining argument is positional.
    Unnamed,
    /// Consumed by the next argument.
    FlagValue { known: bool },
}

/// How the flag just emitted may arm a value expectation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Arm {
    Never,
    Always { known: bool },
    OnRequest,
}

/// Explicit two-step scanner: call [Scanner::next_token], inspect the token,
/// then [Scanner::resolve] it.
///
/// If a token is not resolved before the next call to
/// [Scanner::next_token], it is resolved as [Flow::Continue].
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    args: &'a [String],
    known: &'a KnownFlags,
    pos: usize,
    expect: Expect,
    pending: Option<Arm>,
    stopped: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `args` using the `known` registry.
    pub fn new(args: &'a [String], known: &'a KnownFlags) -> Self {
        Scanner {
            args,
            known,
            pos: 0,
            expect: Expect::Anything,
            pending: None,
            stopped: false,
        }
    }

    /// Classify the next argument.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.pending.is_some() {
            self.resolve(Flow::Continue);
        }

        if self.stopped {
            return None;
        }

        // An armed value expectation with nothing left to consume is dropped
        // here; reporting the missing value is up to the consumer.
        let arg = self.args.get(self.pos)?.as_str();
        let index = self.pos;
        self.pos += 1;

        let token = match self.expect {
            Expect::Unnamed => unnamed(arg),
            Expect::FlagValue { known } => {
                self.expect = Expect::Anything;

                Token {
                    arg,
                    name: None,
                    value: Some(arg),
                    role: Role::FlagValue { known },
                }
            }
            Expect::Anything => self.classify_at(index, arg),
        };

        tracing::trace!(index, token = %token, "scanned");

        Some(token)
    }

    /// Apply the consumer's decision to the token most recently returned.
    ///
    /// Returns `false` once the traversal has been stopped.
    pub fn resolve(&mut self, flow: Flow) -> bool {
        if flow == Flow::Stop {
            self.stopped = true;
            self.pending = None;
            return false;
        }

        match (self.pending.take(), flow) {
            (Some(Arm::Always { known }), _) => {
                self.expect = Expect::FlagValue { known };
            }
            (Some(Arm::OnRequest), Flow::ExpectValue) => {
                tracing::trace!(index = self.pos - 1, "ambiguous flag expects a value");
                self.expect = Expect::FlagValue { known: false };
            }
            _ => (),
        }

        !self.stopped
    }

    /// Drive the scanner to completion, asking `f` to resolve each token.
    pub fn run<F>(mut self, mut f: F)
    where
        F: FnMut(&Token<'a>) -> Flow,
    {
        while let Some(token) = self.next_token() {
            if !self.resolve(f(&token)) {
                break;
            }
        }
    }

    fn classify_at(&mut self, index: usize, arg: &'a str) -> Token<'a> {
        let (name, value, double_dashed) = match classify(arg) {
            Lexeme::Terminator => {
                self.expect = Expect::Unnamed;

                return Token {
                    arg,
                    name: None,
                    value: None,
                    role: Role::Terminator,
                };
            }
            Lexeme::Other => {
                // The first positional argument ends flag scanning for good.
                self.expect = Expect::Unnamed;

                return unnamed(arg);
            }
            Lexeme::Flag {
                name,
                value,
                double_dashed,
            } => (name, value, double_dashed),
        };

        let needs = self.known.get(name);
        let known = needs.is_some();
        let inline = value.is_some();

        let is_last = match self.args.get(index + 1) {
            None => true,
            Some(next) => next == END_OF_OPTIONS,
        };

        // An unknown flag at the end of the flags has nothing to consume.
        let bool_flag = match needs {
            Some(needs) => needs.is_bool(),
            None => is_last && !inline,
        };

        self.pending = Some(if inline || bool_flag {
            Arm::Never
        } else if known {
            Arm::Always { known }
        } else {
            Arm::OnRequest
        });

        Token {
            arg,
            name: Some(name),
            value,
            role: Role::Flag {
                known,
                bool_flag,
                inline,
                double_dashed,
            },
        }
    }
}

fn unnamed(arg: &str) -> Token<'_> {
    Token {
        arg,
        name: None,
        value: None,
        role: Role::Unnamed,
    }
}

/// Token iterator resolving every ambiguous flag with a fixed policy.
///
/// With the boolean policy, ambiguous flag tokens are returned with
/// `bool_flag` set. With the value policy they are returned unchanged and
/// the following argument comes back as their [Role::FlagValue].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    scanner: Scanner<'a>,
    ambiguous_as_bool: bool,
}

impl<'a> Tokens<'a> {
    /// Wrap a scanner with the given policy.
    pub fn new(scanner: Scanner<'a>, ambiguous_as_bool: bool) -> Self {
        Tokens {
            scanner,
            ambiguous_as_bool,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = self.scanner.next_token()?;

        let flow = if !token.is_ambiguous() {
            Flow::Continue
        } else if self.ambiguous_as_bool {
            if let Role::Flag {
                ref mut bool_flag, ..
            } = token.role
            {
                *bool_flag = true;
            }
            Flow::Continue
        } else {
            Flow::ExpectValue
        };

        self.scanner.resolve(flow);

        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Need;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    // s - known value flag
    // b - known bool flag
    fn test_flags() -> KnownFlags {
        KnownFlags::new()
            .with("s", Need::Argument)
            .with("b", Need::Nothing)
    }

    fn flag(arg: &str, known: bool, bool_flag: bool) -> Token<'_> {
        let (name, value, double_dashed) = match classify(arg) {
            Lexeme::Flag {
                name,
                value,
                double_dashed,
            } => (name, value, double_dashed),
            _ => panic!("not a flag: {}", arg),
        };

        Token {
            arg,
            name: Some(name),
            value,
            role: Role::Flag {
                known,
                bool_flag,
                inline: value.is_some(),
                double_dashed,
            },
        }
    }

    fn value(arg: &str, known: bool) -> Token<'_> {
        Token {
            arg,
            name: None,
            value: Some(arg),
            role: Role::FlagValue { known },
        }
    }

    fn terminator() -> Token<'static> {
        Token {
            arg: END_OF_OPTIONS,
            name: None,
            value: None,
            role: Role::Terminator,
        }
    }

    #[test]
    fn test_scanner() {
        #[derive(Debug)]
        struct TestData<'a> {
            args: Vec<&'a str>,
            flows: Vec<Flow>,
            tokens: Vec<Token<'a>>,
        }

        let next = Flow::Continue;
        let expect = Flow::ExpectValue;

        let tests = &[
            TestData {
                args: vec![],
                flows: vec![],
                tokens: vec![],
            },
            TestData {
                args: vec!["-s", "some", "--b=true", "--", "abc"],
                flows: vec![next, next, next, next, next],
                tokens: vec![
                    flag("-s", true, false),
                    value("some", true),
                    flag("--b=true", true, true),
                    terminator(),
                    unnamed("abc"),
                ],
            },
            TestData {
                args: vec!["-s", "some", "--b=true", "--", "abc"],
                flows: vec![Flow::Stop],
                tokens: vec![flag("-s", true, false)],
            },
            TestData {
                args: vec!["-s", "some", "--b=true", "--", "abc"],
                flows: vec![next, next, Flow::Stop],
                tokens: vec![
                    flag("-s", true, false),
                    value("some", true),
                    flag("--b=true", true, true),
                ],
            },
            TestData {
                // "--" after a positional argument is positional too
                args: vec!["--s=some", "-b", "abc", "--", "def"],
                flows: vec![next, next, next, next, next],
                tokens: vec![
                    flag("--s=some", true, false),
                    flag("-b", true, true),
                    unnamed("abc"),
                    unnamed("--"),
                    unnamed("def"),
                ],
            },
            TestData {
                // A known value flag consumes "--" as its value
                args: vec!["--s", "--", "-b=0", "--", "--abc"],
                flows: vec![next, next, next, next, next],
                tokens: vec![
                    flag("--s", true, false),
                    value("--", true),
                    flag("-b=0", true, true),
                    terminator(),
                    unnamed("--abc"),
                ],
            },
            TestData {
                args: vec!["--x", "-s", "--"],
                flows: vec![next, next, next],
                tokens: vec![
                    flag("--x", false, false),
                    flag("-s", true, false),
                    value("--", true),
                ],
            },
            TestData {
                args: vec!["--x", "-s", "--"],
                flows: vec![expect, next, next],
                tokens: vec![flag("--x", false, false), value("-s", false), terminator()],
            },
            TestData {
                // Unknown flag at the end defaults to bool
                args: vec!["--s", "abc", "--x"],
                flows: vec![next, next, next],
                tokens: vec![
                    flag("--s", true, false),
                    value("abc", true),
                    flag("--x", false, true),
                ],
            },
            TestData {
                // Unknown flag before a terminator defaults to bool
                args: vec!["-x", "--", "-y"],
                flows: vec![expect, next, next],
                tokens: vec![flag("-x", false, true), terminator(), unnamed("-y")],
            },
            TestData {
                // Missing value of a known flag is silently dropped
                args: vec!["-b", "-s"],
                flows: vec![next, next],
                tokens: vec![flag("-b", true, true), flag("-s", true, false)],
            },
            TestData {
                // ExpectValue on a known bool flag is ignored
                args: vec!["-b", "-s", "v"],
                flows: vec![expect, next, next],
                tokens: vec![flag("-b", true, true), flag("-s", true, false), value("v", true)],
            },
            TestData {
                // Inline unknown flag never expects a value
                args: vec!["-x=1", "-y=", "z"],
                flows: vec![expect, expect, next],
                tokens: vec![flag("-x=1", false, false), flag("-y=", false, false), unnamed("z")],
            },
            TestData {
                // Malformed flag is positional
                args: vec!["-=x", "-b"],
                flows: vec![next, next],
                tokens: vec![unnamed("-=x"), unnamed("-b")],
            },
        ];

        let known = test_flags();

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);
            let args = strings(&d.args);

            let mut tokens = Vec::new();
            let mut flows = d.flows.iter();

            Scanner::new(&args, &known).run(|token| {
                tokens.push(*token);
                *flows.next().expect("more tokens than expected")
            });

            assert_eq!(tokens, d.tokens, "{}", msg);
        }
    }

    #[test]
    fn test_scanner_unresolved_is_continue() {
        let args = strings(&["-x", "y"]);
        let known = KnownFlags::new();

        let mut scanner = Scanner::new(&args, &known);

        assert_eq!(scanner.next_token(), Some(flag("-x", false, false)));
        assert_eq!(scanner.next_token(), Some(unnamed("y")));
        assert_eq!(scanner.next_token(), None);

        let mut scanner = Scanner::new(&args, &known);

        assert!(scanner.next_token().is_some());
        assert!(!scanner.resolve(Flow::Stop));
        assert_eq!(scanner.next_token(), None);
    }

    #[test]
    fn test_tokens_policy() {
        #[derive(Debug)]
        struct TestData<'a> {
            args: Vec<&'a str>,
            ambiguous_as_bool: bool,
            tokens: Vec<Token<'a>>,
        }

        let tests = &[
            TestData {
                args: vec!["-s", "some", "-b", "-unknown", "value"],
                ambiguous_as_bool: true,
                tokens: vec![
                    flag("-s", true, false),
                    value("some", true),
                    flag("-b", true, true),
                    flag("-unknown", false, true),
                    unnamed("value"),
                ],
            },
            TestData {
                args: vec!["-s", "some", "-b", "-unknown", "value"],
                ambiguous_as_bool: false,
                tokens: vec![
                    flag("-s", true, false),
                    value("some", true),
                    flag("-b", true, true),
                    flag("-unknown", false, false),
                    value("value", false),
                ],
            },
            TestData {
                args: vec!["-unknown"],
                ambiguous_as_bool: true,
                tokens: vec![flag("-unknown", false, true)],
            },
            TestData {
                args: vec!["-unknown"],
                ambiguous_as_bool: false,
                tokens: vec![flag("-unknown", false, true)],
            },
            TestData {
                args: vec!["--x", "abc", "--y"],
                ambiguous_as_bool: true,
                tokens: vec![flag("--x", false, true), unnamed("abc"), unnamed("--y")],
            },
            TestData {
                args: vec!["--x", "abc", "--y"],
                ambiguous_as_bool: false,
                tokens: vec![flag("--x", false, false), value("abc", false), flag("--y", false, true)],
            },
        ];

        let known = test_flags();

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);
            let args = strings(&d.args);

            let tokens: Vec<Token> =
                Tokens::new(Scanner::new(&args, &known), d.ambiguous_as_bool).collect();

            assert_eq!(tokens, d.tokens, "{}", msg);
        }
    }
}
