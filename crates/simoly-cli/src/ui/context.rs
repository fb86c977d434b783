//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    ///
    /// Color is off when `--no-color`, `NO_COLOR`, `TERM=dumb` or the config
    /// disables it, and always off when stdout is not a terminal.
    pub fn from_env(json_flag: bool, color_allowed: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term = std::env::var("TERM").unwrap_or_default();
        let term_is_dumb = term == "dumb";
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        let color = is_tty && color_allowed && !no_color_env && !term_is_dumb;
        let unicode = !term_is_dumb && term != "linux";
        let width = terminal_width().unwrap_or(80);
        let mode = OutputMode::resolve(json_flag, is_tty, term_is_dumb);

        Self {
            is_tty,
            color,
            unicode,
            width,
            mode,
        }
    }

    /// Check if interactive prompts are allowed.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }
}

/// Terminal width from `COLUMNS`.
fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()?
        .parse::<usize>()
        .ok()
        .filter(|width| *width > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_from_flag() {
        let ctx = UiContext::from_env(true, true);
        assert_eq!(ctx.mode, OutputMode::Json);
    }

    #[test]
    fn test_color_flag_disables_color() {
        let ctx = UiContext::from_env(false, false);
        assert!(!ctx.color);
    }

    #[test]
    fn test_width_has_default() {
        let ctx = UiContext::from_env(false, true);
        assert!(ctx.width > 0);
    }
}
