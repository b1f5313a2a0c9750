//! # Linebreaker CLI
//!
//! Usage:
//!   linebreaker paragraph.json -o breaks.json
//!   echo '{ ... }' | linebreaker
//!   linebreaker --example > paragraph.json
//!
//! Set `RUST_LOG=debug` (or `trace`) to watch candidates and commits.

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_paragraph_json());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> linebreaker::Result<()> {
    let input = match input_path(args) {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    let result = linebreaker::break_json(&input)?;
    let json = serde_json::to_string_pretty(&result)?;

    match output_path {
        Some(path) => {
            fs::write(&path, json.as_bytes())?;
            eprintln!("✓ Written {} lines to {}", result.lines.len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// First argument that is neither a flag nor the value of `-o`.
fn input_path(args: &[String]) -> Option<&str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "-o" {
            rest.next();
        } else if !arg.starts_with('-') {
            return Some(arg.as_str());
        }
    }
    None
}

fn example_paragraph_json() -> &'static str {
    r##"{
  "text": "The quick brown fox jumps over the lazy dog.\tSupercalifragilisticexpialidocious!",
  "lineWidth": 16,
  "tabStops": [20],
  "tabWidth": 8,
  "runs": [
    { "start": 0, "end": 10, "style": { "type": "Fixed", "advance": 1 } },
    { "start": 10, "end": 19, "style": { "type": "Fixed", "advance": 1.5 } },
    { "start": 19, "end": 80, "style": { "type": "Fixed", "advance": 1 } }
  ]
}
"##
}
