//! Terminal rendering of the markdown produced by `tasqe-core`.
//!
//! Rich mode styles headers and checkboxes through termimad; plain mode
//! prints the markdown untouched so it can be piped or asserted on.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const DONE_MARK: &str = "✔";
const OPEN_MARK: &str = "☐";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints markdown to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(&Self::checkboxes(line));
                println!();
            }
        }
        Ok(())
    }

    /// Replaces markdown checkboxes with glyphs.
    fn checkboxes(line: &str) -> String {
        line.replacen("[x]", DONE_MARK, 1)
            .replacen("[ ]", OPEN_MARK, 1)
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Lists\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_checkbox_glyphs() {
        assert_eq!(
            TerminalRenderer::checkboxes("1. [x] **Essay**"),
            "1. ✔ **Essay**"
        );
        assert_eq!(
            TerminalRenderer::checkboxes("   1. [ ] Outline (20 mins)"),
            "   1. ☐ Outline (20 mins)"
        );
        assert_eq!(TerminalRenderer::checkboxes("plain text"), "plain text");
    }
}
