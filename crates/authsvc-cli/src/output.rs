//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a labeled field that may be unset.
pub fn optional_field(label: &str, value: Option<&str>) {
    match value {
        Some(value) if !value.is_empty() => field(label, value),
        _ => println!("{}: {}", label.dimmed(), "-".dimmed()),
    }
}

/// Print a yes/no field.
pub fn flag(label: &str, value: bool) {
    let value = if value { "yes".green() } else { "no".red() };
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
