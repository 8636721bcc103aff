//! Sapling CLI
//!
//! Parses a markup buffer and prints the resulting tree, for testing and
//! debugging the parser.

use std::fs;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use sapling_common::warning::clear_warnings;
use sapling_dom::Node;
use sapling_markup::{DEFAULT_MAX_DEPTH, MarkupParser, ParseIssue, ParserOptions, print_tree};

/// Page parsed when no input is given.
const SAMPLE_PAGE: &str = "<html>
\t<head><title>=HTML Parser</title></head>
\t<body>
\t\t<h1>Welcome to the Sample Page</h1>
\t\t<p>This is a HTML parser.</p>
\t</body>
</html>";

/// Upper bound for `--max-depth`. The JSON dump serializes recursively.
const MAX_CLI_DEPTH: u64 = 1024;

/// Sapling — parse markup and print the element/text tree
#[derive(Parser, Debug)]
#[command(name = "sapling")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Parse the built-in sample page
    sapling

    # Parse a file
    sapling ./index.html

    # Parse inline markup and list recovered problems
    sapling --issues --html '<a><b></a>'

    # Dump the tree as JSON
    sapling --format json ./index.html
")]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<String>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Fail on the first irregularity instead of recovering
    #[arg(long)]
    strict: bool,

    /// Maximum element nesting depth
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_CLI_DEPTH)
    )]
    max_depth: usize,

    /// How to print the tree
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// List recovered parse issues after the tree
    #[arg(long)]
    issues: bool,

    /// Do not echo parse issues to stderr while parsing
    #[arg(short, long)]
    quiet: bool,
}

/// Output format for the parsed tree
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Indented markup, one node per line
    Tree,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (source_name, markup) = load_input(&cli)?;

    clear_warnings();
    let options = ParserOptions {
        max_depth: cli.max_depth,
        strict: cli.strict,
        emit_warnings: !cli.quiet,
    };
    let (root, issues) = MarkupParser::new(&markup)
        .with_options(options)
        .run_with_issues()
        .with_context(|| format!("failed to parse {source_name}"))?;

    match cli.format {
        OutputFormat::Tree => print_tree(&root, 0),
        OutputFormat::Json => print_json(&root)?,
    }

    if cli.issues {
        print_issues(&issues);
    }

    Ok(())
}

/// Resolve the markup to parse and a name to report it under
fn load_input(cli: &Cli) -> Result<(String, String)> {
    if let Some(ref html) = cli.html {
        Ok(("--html input".to_string(), html.clone()))
    } else if let Some(ref path) = cli.path {
        let markup = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        Ok((path.clone(), markup))
    } else {
        Ok(("sample page".to_string(), SAMPLE_PAGE.to_string()))
    }
}

fn print_json(root: &Node) -> Result<()> {
    let json = serde_json::to_string_pretty(root).context("failed to serialize tree")?;
    println!("{json}");
    Ok(())
}

fn print_issues(issues: &[ParseIssue]) {
    println!("\n=== Parse Issues ===");
    if issues.is_empty() {
        println!("{}", "none".green());
        return;
    }
    for issue in issues {
        println!(
            "{:>6}  {}  {}",
            issue.position.dimmed(),
            issue.kind.yellow(),
            issue.message
        );
    }
}
