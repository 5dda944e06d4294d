//! Color theme and styling for the character sheet

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use dnd_core::sheet::{Border, Emphasis};

/// Sheet color theme
#[derive(Debug, Clone)]
pub struct SheetTheme {
    pub foreground: Color,
    pub border: Color,
    /// Ability score boxes
    pub accent: Color,
    pub proficient: Color,
    pub subtitle: Color,
    pub status_bar: Color,
}

impl Default for SheetTheme {
    fn default() -> Self {
        Self {
            foreground: Color::Reset,
            border: Color::Reset,
            accent: Color::Green,
            proficient: Color::Green,
            subtitle: Color::Reset,
            status_bar: Color::DarkGray,
        }
    }
}

impl SheetTheme {
    /// Style for a span of sheet text
    pub fn emphasis_style(&self, emphasis: Emphasis) -> Style {
        let base = Style::default().fg(self.foreground);
        match emphasis {
            Emphasis::Plain => base,
            Emphasis::Strong => base.add_modifier(Modifier::BOLD),
            Emphasis::Proficient => Style::default()
                .fg(self.proficient)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            Emphasis::Glowing => base.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        }
    }

    /// Border style for a panel
    pub fn border_style(&self, border: Border) -> Style {
        let color = match border {
            Border::Accent => self.accent,
            Border::Heavy | Border::None => self.border,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn border_type(&self, _border: Border) -> BorderType {
        BorderType::Thick
    }

    /// Style for panel subtitles on the bottom border
    pub fn subtitle_style(&self) -> Style {
        Style::default().fg(self.subtitle)
    }

    /// Style for table column headings
    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    pub fn status_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar)
            .add_modifier(Modifier::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficient_marker_is_reversed() {
        let theme = SheetTheme::default();
        let style = theme.emphasis_style(Emphasis::Proficient);
        assert_eq!(style.fg, Some(Color::Green));
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_accent_border() {
        let theme = SheetTheme::default();
        assert_eq!(theme.border_style(Border::Accent).fg, Some(Color::Green));
        assert_eq!(theme.border_style(Border::Heavy).fg, Some(Color::Reset));
    }
}
