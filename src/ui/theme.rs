use owo_colors::Style;
use std::ffi::OsString;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for the handful of message kinds the CLI prints
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
}

impl Theme {
    pub fn new(colored: bool) -> Self {
        let pick = |style: Style| if colored { style } else { Style::new() };
        Self {
            header: pick(Style::new().cyan().bold()),
            success: pick(Style::new().green().bold()),
            error: pick(Style::new().red().bold()),
            warn: pick(Style::new().yellow().bold()),
            info: pick(Style::new().blue()),
            dim: pick(Style::new().bright_black()),
        }
    }

    pub fn detect() -> Self {
        let colored = colors_wanted(std::env::var_os("NO_COLOR"), console::Term::stdout().is_term());
        Self::new(colored)
    }
}

/// A non-empty `NO_COLOR` wins over a terminal
fn colors_wanted(no_color: Option<OsString>, is_term: bool) -> bool {
    let disabled = no_color.is_some_and(|v| !v.is_empty());
    is_term && !disabled
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
