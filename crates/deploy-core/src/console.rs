//! Terminal reporting helpers
//!
//! A `Reporter` is passed by value into every component that talks to the
//! user, so verbosity is explicit configuration rather than process-wide
//! state and components stay independently testable.

use colored::Colorize;

/// Width of the banner printed around section headers
const HEADER_WIDTH: usize = 80;

/// Console reporter with an explicit verbosity toggle
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a banner-framed section header
    pub fn header(&self, message: &str) {
        let bar = "=".repeat(HEADER_WIDTH);
        println!();
        println!("{}", bar.magenta().bold());
        println!("{}", center(message, HEADER_WIDTH).magenta().bold());
        println!("{}", bar.magenta().bold());
        println!();
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message.green());
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", "ℹ".cyan(), message.cyan());
    }

    /// Print only when verbose mode is on
    pub fn detail(&self, message: &str) {
        if self.verbose {
            self.info(message);
        }
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pads_shorter_text() {
        let centered = center("abcd", 10);
        assert!(centered.starts_with("   "));
        assert!(centered.ends_with("abcd"));
    }

    #[test]
    fn test_center_leaves_long_text_alone() {
        assert_eq!(center("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_detail_respects_verbosity_flag() {
        assert!(!Reporter::new(false).is_verbose());
        assert!(Reporter::new(true).is_verbose());
    }
}
