use std::fs;
use std::path::PathBuf;
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;

use lox_lexer::Lexer;

/// Lox lexer.
///
/// Tokenizes .lox source files and prints the token stream.
#[derive(Parser)]
#[command(
    name = "loxc",
    version,
    about,
    long_about = "Lox lexer.\n\nTokenizes .lox source files into a typed token stream for the Lox\nfront end.\n\nExamples:\n  loxc hello.lox            Print the token stream\n  loxc hello.lox --check    Check for lexical errors only\n  loxc hello.lox --json     Emit tokens as JSON"
)]
struct Cli {
    /// Input .lox source file.
    input: PathBuf,

    /// Check for lexical errors without printing tokens.
    #[arg(long)]
    check: bool,

    /// Emit the token stream as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Suppress warning output.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Read source file
    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let file_name = cli
        .input
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    // === Lexer ===
    let (tokens, diags) = Lexer::new(&source, &file_name).tokenize();

    for diag in diags.diagnostics() {
        if diag.is_error() || !cli.quiet {
            print_diagnostic(diag, &source, &file_name);
        }
    }

    if diags.has_errors() {
        process::exit(1);
    }

    if cli.check {
        println!("No lexical errors.");
        return;
    }

    if cli.json {
        let json = match serde_json::to_string_pretty(&tokens) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("error: failed to serialize tokens: {}", e);
                process::exit(1);
            }
        };
        println!("{}", json);
        return;
    }

    for token in &tokens {
        println!(
            "{:>4}:{:<3} {:?} {:?}",
            token.span.start.line, token.span.start.column, token.kind, token.lexeme,
        );
    }
}

fn print_diagnostic(diag: &lox_common::Diagnostic, source: &str, file_name: &str) {
    let kind = if diag.is_error() {
        ReportKind::Error
    } else {
        ReportKind::Warning
    };

    if let Some(ref span) = diag.span {
        let start = span.start.offset as usize;
        let end = (span.end.offset as usize).max(start + 1);

        let color = if diag.is_error() {
            Color::Red
        } else {
            Color::Yellow
        };

        Report::build(kind, file_name, start)
            .with_message(&diag.message)
            .with_label(
                Label::new((file_name, start..end))
                    .with_message(&diag.message)
                    .with_color(color),
            )
            .finish()
            .eprint((file_name, Source::from(source)))
            .unwrap();
    } else {
        eprintln!("{}", diag);
    }
}
