//! Style tokens for the dashboard — neon accents on the default terminal
//! background, high contrast for signal categories.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Magenta;
pub const WARNING: Color = Color::Yellow;
pub const NEUTRAL: Color = Color::Blue;
pub const MUTED: Color = Color::DarkGray;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Color for a stock signal category.
pub fn signal_style(signal: &str) -> Style {
    match signal {
        "BUY" => positive(),
        "SELL" => negative(),
        "HOLD" => neutral(),
        _ => muted(),
    }
}

/// Color for an options suggestion category.
pub fn options_style(suggestion: &str) -> Style {
    match suggestion {
        "CALL" => positive(),
        "PUT" => negative(),
        _ => muted(),
    }
}

/// Color for a BL tilt category.
pub fn tilt_style(tilt: &str) -> Style {
    match tilt {
        "OVERWEIGHT" => positive(),
        "UNDERWEIGHT" => negative(),
        "NEUTRAL" => neutral(),
        _ => muted(),
    }
}

/// Color for a signed metric (posterior returns etc.).
pub fn metric_style(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_styles_map_categories() {
        assert_eq!(signal_style("BUY"), positive());
        assert_eq!(signal_style("SELL"), negative());
        assert_eq!(signal_style("HOLD"), neutral());
        assert_eq!(signal_style("WHATEVER"), muted());
    }

    #[test]
    fn tilt_styles_map_categories() {
        assert_eq!(tilt_style("OVERWEIGHT"), positive());
        assert_eq!(tilt_style("UNDERWEIGHT"), negative());
        assert_eq!(tilt_style("NEUTRAL"), neutral());
    }

    #[test]
    fn metric_style_splits_on_sign() {
        assert_eq!(metric_style(0.08), positive());
        assert_eq!(metric_style(0.0), positive());
        assert_eq!(metric_style(-0.03), negative());
    }
}
