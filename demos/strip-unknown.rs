// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to remove the flags a program does not know about
/// before handing the arguments to its real parser.
///
/// Try:
///
/// ```bash
/// $ RUST_LOG=debug cargo run --example strip-unknown -- -v --colour=red -o out.txt -x file
/// ```
use cmdargs::{ArgList, FlagEntry, KnownFlags, Need, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mut known = KnownFlags::new();

    // Support "-v" flag.
    known.register("v", Need::Nothing)?;

    // Support "-o <file>" option.
    known.register("o", Need::Argument)?;

    let args = ArgList::new(std::env::args().skip(1))
        .registry(known)
        .ambiguous_as_bool(true);

    let res = args.strip_unknown(&KnownFlags::new());

    println!("INFO: kept: {:?}", res.kept.args());
    println!("INFO: stripped: {:?}", res.stripped.args());

    // Make sure there is an output file, keeping the one specified (if any).
    let output = FlagEntry::from_arg("-o=stdout")?;
    let kept = res.kept.upsert_flag(output, |old| old);

    for entry in kept.entries() {
        println!("INFO: entry: {:?} ({})", entry.kind(), entry);
    }

    Ok(())
}
