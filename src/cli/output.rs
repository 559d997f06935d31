//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the mentor-review CLI.

use mentor_review_model::ReviewStatus;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Column width used by table rows.
const COLUMN_WIDTH: usize = 18;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Status label, colored by status
    pub fn badge(&self, status: ReviewStatus) -> String {
        self.paint(status, status.label())
    }

    /// Status column cell.
    ///
    /// The label is padded before it is colored, so escape codes never
    /// count toward the column width.
    pub fn status_cell(&self, status: ReviewStatus) -> String {
        self.paint(status, &cell(status.label()))
    }

    fn paint(&self, status: ReviewStatus, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }
        match status {
            ReviewStatus::Pending => text.yellow().bold().to_string(),
            ReviewStatus::Approved => text.green().bold().to_string(),
            ReviewStatus::Rejected => text.red().bold().to_string(),
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header = columns.iter().map(|c| cell(c)).collect::<Vec<_>>().join(" ");
        let rule_width = columns.len() * (COLUMN_WIDTH + 1);
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(rule_width).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(rule_width));
        }
    }

    /// Print a table row of cells built with [`cell`] or [`status_cell`](Self::status_cell)
    pub fn table_row(&self, cells: &[String]) {
        println!("    {}", cells.join(" "));
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

/// Plain table cell, cut and padded to the column width.
pub fn cell(value: &str) -> String {
    format!("{:<width$}", truncate(value, COLUMN_WIDTH), width = COLUMN_WIDTH)
}

/// Cut a cell to `width` characters, marking the cut with an ellipsis.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
