//! Command-line interface for bbcode
//! This binary is used to inspect and process BBCode markup: dump the token
//! stream, parse against a registered tag set, or list the tag sets.
//!
//! Usage:
//!   bbcode parse `<path|->` [--tags `<set>`] [--format `<format>`]  - Parse markup
//!   bbcode tokens `<path|->`                                    - Dump the token stream
//!   bbcode list-tag-sets                                      - List registered tag sets

use bbcode::{reconstruct, tag_sets, tokenize, ContentNode, ParseOptions};
use clap::{Arg, Command};
use std::io::Read;

fn main() {
    let matches = Command::new("bbcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and processing BBCode markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse markup against a registered tag set")
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .short('t')
                        .help("Tag set to parse against")
                        .default_value("chat"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('tree', 'json', or 'text')")
                        .default_value("tree"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file, or '-' for stdin")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-tag-sets").about("List registered tag sets"))
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let tags = parse_matches.get_one::<String>("tags").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(path, tags, format);
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            handle_tokens_command(path);
        }
        Some(("list-tag-sets", _)) => {
            handle_list_tag_sets_command();
        }
        _ => unreachable!(),
    }
}

/// Read the input file, or stdin when the path is `-`.
fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            });
        source
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        })
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, tags: &str, format: &str) {
    let source = read_source(path);
    let set = tag_sets::lookup(tags).unwrap_or_else(|| {
        eprintln!(
            "Unknown tag set '{}'; available: {}",
            tags,
            tag_sets::names().join(", ")
        );
        std::process::exit(1);
    });
    let result = set.parse(&source, ParseOptions::default()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match format {
        "tree" => print!("{}", format_tree(result.root(), 0)),
        "json" => {
            let mut used: Vec<&String> = result.used_eicons().iter().collect();
            used.sort();
            let output = serde_json::json!({
                "root": result.root(),
                "usedEicons": used,
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        "text" => println!("{}", reconstruct(result.root())),
        other => {
            eprintln!("Unknown format '{}'; expected 'tree', 'json', or 'text'", other);
            std::process::exit(1);
        }
    }
}

/// Indented one-node-per-line rendering of the content tree. Walked with
/// an explicit stack so deep trees cannot exhaust the call stack.
fn format_tree(node: &ContentNode, depth: usize) -> String {
    let mut out = String::new();
    let mut stack = vec![(node, depth)];
    while let Some((node, depth)) = stack.pop() {
        out.push_str(&format!("{}{}\n", "  ".repeat(depth), node));
        if let ContentNode::Element(element) = node {
            for child in element.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    out
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let source = read_source(path);
    let tokens = tokenize(&source, false);
    match serde_json::to_string_pretty(&tokens) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-tag-sets command
fn handle_list_tag_sets_command() {
    for name in tag_sets::names() {
        if let Some(set) = tag_sets::lookup(name) {
            let mut tags = set.tag_names();
            tags.dedup();
            println!("{}: {}", name, tags.join(" "));
        }
    }
}
