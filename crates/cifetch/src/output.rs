//! Terminal output utilities
//!
//! Errors go to stderr so stdout carries only command output.

use console::style;

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("{} {}", style(format!("{}:", key)).dim(), value);
}
