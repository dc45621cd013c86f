// SPDX-License-Identifier: Apache-2.0

//! `jsoncheck`: validate a JSON document and print its compact form.

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use modjson::{dump, parse_with, TokenOptions};

#[derive(Parser, Debug)]
#[command(about = "Validate a JSON document and print its compact form")]
struct Args {
    /// Input file; reads stdin when omitted
    file: Option<String>,

    /// Allow // and /* */ comments
    #[arg(long)]
    comments: bool,

    /// Allow single-quoted strings and keys
    #[arg(long)]
    single_quotes: bool,

    /// Allow unquoted object keys
    #[arg(long)]
    simple_keys: bool,

    /// Skip escape validation when scanning strings
    #[arg(long)]
    unstrict: bool,

    /// Object nesting ceiling
    #[arg(long, default_value_t = modjson::DEFAULT_DEPTH)]
    object_depth: usize,

    /// Array nesting ceiling
    #[arg(long, default_value_t = modjson::DEFAULT_DEPTH)]
    array_depth: usize,

    /// Only validate; print nothing on success
    #[arg(short, long)]
    quiet: bool,
}

fn read_input(args: &Args) -> std::io::Result<Vec<u8>> {
    match &args.file {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match read_input(&args) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("jsoncheck: cannot read input: {err}");
            return ExitCode::FAILURE;
        }
    };
    debug!("read {} bytes", text.len());

    let options = TokenOptions::new()
        .comments(args.comments)
        .single_quotes(args.single_quotes)
        .simple_keys(args.simple_keys)
        .unstrict(args.unstrict)
        .object_depth(args.object_depth)
        .array_depth(args.array_depth);

    match parse_with(options, &text) {
        Ok(value) => {
            if !args.quiet {
                println!("{}", dump(&value));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("jsoncheck: {err}");
            ExitCode::FAILURE
        }
    }
}
