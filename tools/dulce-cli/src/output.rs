//! Output formatting for the CLI.

use console::style;
use dulce_storefront::{Notification, NotificationKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a storefront notification as shown on the page.
    pub fn notification(&self, notification: &Notification) {
        if self.json {
            return;
        }
        let text = match notification.kind {
            NotificationKind::FormError => style(&notification.text).red().to_string(),
            _ => style(&notification.text).green().to_string(),
        };
        println!("{}", text);
    }

    /// Print a dimmed secondary line.
    pub fn note(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("    {}", style(msg).dim());
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Create a spinner for simulated latency.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-align `text` in `width` columns, counting characters rather than bytes.
pub fn pad(text: &str, width: usize) -> String {
    let len = console::measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Markers wrapped around search matches.
pub fn highlight_marks() -> (&'static str, &'static str) {
    if console::colors_enabled() {
        ("\x1b[1;33m", "\x1b[0m")
    } else {
        ("*", "*")
    }
}

/// Badge shown next to featured products.
pub fn product_badge(badge: Option<&str>) -> String {
    match badge {
        Some(text) => style(format!("[{}]", text)).magenta().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_characters() {
        assert_eq!(pad("Pañuelo", 9), "Pañuelo  ");
        assert_eq!(pad("Medialunas", 4), "Medialunas");
    }

    #[test]
    fn test_highlight_marks_without_colors() {
        console::set_colors_enabled(false);
        assert_eq!(highlight_marks(), ("*", "*"));
    }
}
