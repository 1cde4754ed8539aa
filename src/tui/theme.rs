//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::scoring::Level;
use crate::tui::app::FlashKind;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Level colors (traffic light pattern)
    pub level_strong: Color,
    pub level_medium: Color,
    pub level_weak: Color,

    // Rating dots
    pub dot_filled: Color,
    pub dot_empty: Color,
    pub unanswered: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub category_color: Color,
    pub id_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
    pub flash_info: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_warning: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            level_strong: Color::Green,
            level_medium: Color::Yellow,
            level_weak: Color::Red,
            dot_filled: Color::Cyan,
            dot_empty: Color::DarkGray,
            unanswered: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            category_color: Color::Cyan,
            id_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            flash_info: Color::White,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_warning: Color::Red,
        }
    }

    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Strong => self.level_strong,
            Level::Medium => self.level_medium,
            Level::Weak => self.level_weak,
        }
    }

    pub fn flash_color(&self, kind: FlashKind) -> Color {
        match kind {
            FlashKind::Success => self.flash_success,
            FlashKind::Error => self.flash_error,
            FlashKind::Info => self.flash_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colors_follow_traffic_light() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.level_color(Level::Strong), Color::Green);
        assert_eq!(theme.level_color(Level::Medium), Color::Yellow);
        assert_eq!(theme.level_color(Level::Weak), Color::Red);
    }
}
