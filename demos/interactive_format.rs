//! Interactive formatting demo - line-based numeric input formatting
//!
//! Usage: cargo run --example interactive_format
//! Type a number per line (compact and scientific notation accepted) and an
//! empty line to exit. Each line is processed as a fresh programmatic edit.

use numfield_core::{format_for_blur, process, FormattingConfig, ThousandStyle};
use std::io::{self, BufRead, Write};

/// Render one processed line with the caret marked.
fn display_outcome(input: &str, formatted: &str, raw: &str, caret: usize) {
    let mut marked = String::with_capacity(formatted.len() + 1);
    for (i, c) in formatted.chars().enumerate() {
        if i == caret {
            marked.push('|');
        }
        marked.push(c);
    }
    if caret >= formatted.chars().count() {
        marked.push('|');
    }
    println!("  {:<16} raw={:<16} display={}", input, raw, marked);
}

fn main() -> io::Result<()> {
    println!("Numeric Field Formatter");
    println!("=======================");
    println!("Enter a number (e.g. 1234567, 1.5k, 2e5). Empty line to exit.");
    println!();

    let config = FormattingConfig::builder()
        .thousand_style(ThousandStyle::Thousand)
        .decimal_max_length(6)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            break;
        }
        let outcome = process(input, &config, None);
        display_outcome(input, &outcome.formatted, &outcome.raw, outcome.caret);
        println!("  on blur: {}", format_for_blur(&outcome.raw, &config));
        print!("> ");
        io::stdout().flush()?;
    }

    println!("Goodbye!");
    Ok(())
}
