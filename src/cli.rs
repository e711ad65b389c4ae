// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help text.
use crate::model::{ReferenceYear, parse_capture};
use chrono::NaiveDateTime;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an intention. `None` opens the capture modal.
    Intention(Option<String>),
    /// Append to the daily log. `None` opens the capture modal.
    Log(Option<String>),
    /// Create an intention from selected text and print its wiki link.
    Link(String),
    /// Print the parsed capture without writing anything.
    Parse(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Parse arguments (without the binary name).
pub fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut root = None;
    let mut verbose = false;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        // Options are only recognised before the command word
        if !rest.is_empty() {
            rest.push(arg.clone());
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                return Ok(Args {
                    root,
                    verbose,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                root = Some(PathBuf::from(path));
            }
            "-v" | "--verbose" => verbose = true,
            _ => rest.push(arg.clone()),
        }
    }

    let command = match rest.split_first() {
        None => Command::Intention(None),
        Some((cmd, words)) => match cmd.as_str() {
            "intention" | "i" => Command::Intention(joined(words)),
            "log" | "l" => Command::Log(joined(words)),
            "link" => Command::Link(joined(words).ok_or("link needs the selected text")?),
            "parse" => Command::Parse(joined(words).ok_or("parse needs some text")?),
            other => return Err(format!("Unknown command '{}'", other)),
        },
    };

    Ok(Args {
        root,
        verbose,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Jotter v{} - Quick capture of intentions and daily log entries",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [intention] [text...]", binary_name);
    println!("    {} [OPTIONS] log [text...]", binary_name);
    println!("    {} [OPTIONS] link <selection...>", binary_name);
    println!("    {} [OPTIONS] parse <text...>", binary_name);
    println!();
    println!("Without text, intention and log open an interactive capture prompt.");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config, data and logs.");
    println!("    -v, --verbose         Write debug output to the log file.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CAPTURE SYNTAX:");
    println!("    D/M               Date (5/6 = 5 June; moves to next year once passed)");
    println!("    D/M/YY            Date with year (1/1/27)");
    println!("    #tag              Tag (lowercase letters and digits)");
    println!();
    println!("EXAMPLES:");
    println!("    {} intention Call mom 1/1/27 #family", binary_name);
    println!("    {} log Finished the quarterly report", binary_name);
    println!("    {} link \"Renew passport\"", binary_name);
}

/// JSON printed by `jotter parse`. Needs no config or vault.
pub fn parse_output(text: &str, now: NaiveDateTime) -> serde_json::Result<String> {
    let record = parse_capture(text, &ReferenceYear::from_date(now.date()), now);
    serde_json::to_string_pretty(&record)
}
