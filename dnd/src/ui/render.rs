//! Render orchestration for the sheet pager

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, STATUS_BAR_HEIGHT};
use crate::ui::widgets::SheetViewport;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(frame.area());

    let (x, y) = app.scroll_offset();
    frame.render_widget(SheetViewport::new(app.canvas()).offset(x, y), chunks[0]);

    render_status_bar(frame, app, chunks[1]);
}

/// Position, hints and the latest status message
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let sheet = app.sheet();
    let (x, y) = app.scroll_offset();
    let (view_width, view_height) = app.viewport();

    let mut spans = vec![
        Span::raw(format!(" {} ", app.character.name)),
        Span::raw(format!(
            "| rows {}-{}/{} ",
            y + 1,
            (y + view_height).min(sheet.height),
            sheet.height
        )),
    ];
    if sheet.width > view_width {
        spans.push(Span::raw(format!(
            "| cols {}-{}/{} ",
            x + 1,
            (x + view_width).min(sheet.width),
            sheet.width
        )));
    }
    spans.push(Span::raw("| j/k scroll  h/l pan  r reroll  q quit "));
    if let Some(message) = app.status_message() {
        spans.push(Span::raw(format!("| {message}")));
    }

    let status = Paragraph::new(Line::from(spans)).style(app.theme.status_style());
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnd_core::dice::FixedRoller;
    use dnd_core::sheet::SheetConfig;
    use dnd_core::testing::sample_wizard;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::ui::widgets::buffer_lines;

    fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn test_status_bar_on_last_row() {
        let app = App::new(
            sample_wizard(),
            SheetConfig::default(),
            Box::new(FixedRoller(10)),
            None,
            (200, 30),
        );
        let lines = draw(&app, 200, 30);
        assert_eq!(lines.len(), 30);
        assert!(lines[29].contains("Rando B. Higgins"));
        assert!(lines[29].contains("rows 1-29/"));
        assert!(!lines[29].contains("cols"));
        assert!(lines[0].starts_with('┏'));
    }

    #[test]
    fn test_scrolled_view_shows_later_rows() {
        let mut app = App::new(
            sample_wizard(),
            SheetConfig::default(),
            Box::new(FixedRoller(10)),
            None,
            (120, 20),
        );
        app.scroll_to_bottom();
        app.scroll_right(1000);
        let lines = draw(&app, 120, 20);
        assert!(lines[18].ends_with('┛'));
        assert!(lines[19].contains("cols 50-169/169"));
    }
}
