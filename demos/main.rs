// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use labsexpr::chain::{Cell, ChainSink};
use labsexpr::cursor::Cursor;
use labsexpr::flat::FlatSexpr;
use labsexpr::parse::{parse_sexpr, Outcome};
use labsexpr::read::write_all;
use labsexpr::settings::{Settings, LABTEXT_SETTINGS, STRICT_SETTINGS};
use labsexpr::value::Token;
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Build the linked cell chain (default: the flat representation)
    #[clap(long, value_parser)]
    chain: bool,
    /// Print the tokens, one per line, indented by nesting depth
    #[clap(long, value_parser)]
    print: bool,
    /// Print the parsed data back as S-expression text
    #[clap(long, value_parser)]
    write: bool,
    /// Numbers must span the whole token, else they are atoms
    #[clap(long, value_parser)]
    strict: bool,
    /// Maximum list nesting
    #[clap(long, value_parser)]
    max_depth: Option<u32>,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings: Settings =
        if args.strict { STRICT_SETTINGS } else { LABTEXT_SETTINGS };
    if args.max_depth.is_some() {
        settings.max_depth = args.max_depth;
    }

    let input = std::fs::read_to_string(&args.input_path)?;
    let cursor = Cursor::new(&input);

    // Both representations end up as the same token sequence; the
    // choice only shows that they do.
    let mut flat = FlatSexpr::new();
    let mut head = Cell::sentinel();
    let (parsed, tokens): (_, Vec<Token>) =
        if args.chain {
            let parsed = parse_sexpr(cursor, &mut ChainSink::new(&mut head),
                                     0, &settings);
            (parsed, head.tokens().collect())
        } else {
            let parsed = parse_sexpr(cursor, &mut flat, 0, &settings);
            (parsed, flat.tokens().collect())
        };

    let mut count_toplevel = 0;
    let mut count_enter = 0;
    let mut depth: usize = 0;
    for token in &tokens {
        let indentlevel;
        match token {
            Token::PushList => {
                count_enter += 1;
                if depth == 0 {
                    count_toplevel += 1;
                }
                indentlevel = depth;
                depth += 1;
            }
            Token::PopList => {
                depth = depth.saturating_sub(1);
                indentlevel = depth;
            }
            _ => {
                indentlevel = depth;
            }
        }
        if args.print {
            if let Some(indent) = indentstr(indentlevel) {
                println!("{indent}{token}");
            } else {
                bail!("lists nested too deeply in {:?}", args.input_path)
            }
        }
    }
    if args.write {
        write_all(BufWriter::new(stdout()), tokens.iter().copied())?;
    }
    println!(";; count_toplevel = {count_toplevel}, count_enter = {count_enter}, \
              balance = {}", parsed.balance);

    match parsed.outcome {
        Outcome::Complete => Ok(()),
        Outcome::Truncated { open } => {
            bail!("premature EOF, list opened at {:?}{} is not closed",
                  args.input_path, open)
        }
        Outcome::Malformed(e) => {
            bail!("{} in {:?}{}", e.err, args.input_path, e.pos)
        }
    }
}
