//! Small print helpers shared by the command handlers.

use std::fmt::Display;

use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// Print a labeled value.
pub fn key_value(label: &str, value: impl Display) {
    println!("  {:<16} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn ok(message: &str) {
    println!("  {} {message}", "✓".green());
}

/// Print a warning line.
pub fn warn(message: &str) {
    println!("  {} {message}", "⚠".yellow());
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("  {}", message.dimmed());
}

/// Print a rendered table, indented to line up with the other helpers.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}
