use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI prefixes for the status labels. All empty when colours are off.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub error: &'static str,
    pub changed: &'static str,
    pub unchanged: &'static str,
    pub notice: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                error: "\x1b[31m",     // Red
                changed: "\x1b[32m",   // Green
                unchanged: "\x1b[2m",  // Dim
                notice: "\x1b[36m",    // Cyan
                enabled: true,
            }
        } else {
            Self {
                error: "",
                changed: "",
                unchanged: "",
                notice: "",
                enabled: false,
            }
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }

    /// Wrap `label` in `color` and the reset sequence
    pub fn paint(&self, color: &'static str, label: &str) -> String {
        format!("{color}{label}{}", self.reset())
    }
}

/// `NO_COLOR` wins over TTY detection.
pub fn should_use_colors(no_color_env: bool, is_tty: bool) -> bool {
    !no_color_env && is_tty
}

/// Decide colours for the current process
pub fn detect_colors() -> Colors {
    let no_color_env = std::env::var_os("NO_COLOR").is_some();
    Colors::new(should_use_colors(no_color_env, io::stdout().is_terminal()))
}
