//! Main application state and logic

use dnd_core::dice::Roller;
use dnd_core::sheet::{render_sheet, RegionTree, SheetConfig};
use dnd_core::world::Character;
use ratatui::buffer::Buffer;
use tracing::debug;

use crate::ui::theme::SheetTheme;
use crate::ui::widgets::paint_sheet;

/// Rows reserved below the sheet for the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Pager state: the composed sheet, its painted canvas and the scroll position
pub struct App {
    pub character: Character,
    pub sheet_config: SheetConfig,
    pub theme: SheetTheme,
    roller: Box<dyn Roller>,

    /// Width forced on the command line; otherwise the terminal width is used
    fixed_width: Option<u16>,
    terminal_width: u16,

    sheet: RegionTree,
    canvas: Buffer,

    // Scroll state
    scroll_x: u16,
    scroll_y: u16,
    viewport: (u16, u16),

    // Status
    status_message: Option<String>,
}

impl App {
    /// Compose the sheet for a terminal of the given size
    pub fn new(
        character: Character,
        sheet_config: SheetConfig,
        mut roller: Box<dyn Roller>,
        fixed_width: Option<u16>,
        (terminal_width, terminal_height): (u16, u16),
    ) -> Self {
        let theme = SheetTheme::default();
        let width = fixed_width.unwrap_or(terminal_width);
        let sheet = render_sheet(&character, width, &sheet_config, roller.as_mut());
        let canvas = paint_sheet(&sheet, &theme);

        Self {
            character,
            sheet_config,
            theme,
            roller,
            fixed_width,
            terminal_width,
            sheet,
            canvas,
            scroll_x: 0,
            scroll_y: 0,
            viewport: (
                terminal_width,
                terminal_height.saturating_sub(STATUS_BAR_HEIGHT),
            ),
            status_message: None,
        }
    }

    /// Compose and paint the sheet again from the character record
    fn recompose(&mut self) {
        let width = self.fixed_width.unwrap_or(self.terminal_width);
        self.sheet = render_sheet(
            &self.character,
            width,
            &self.sheet_config,
            self.roller.as_mut(),
        );
        self.canvas = paint_sheet(&self.sheet, &self.theme);
        self.clamp_scroll();
        debug!(
            width = self.sheet.width,
            height = self.sheet.height,
            "sheet recomposed"
        );
    }

    /// Terminal was resized: re-render for the new width
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.viewport = (width, height.saturating_sub(STATUS_BAR_HEIGHT));
        self.recompose();
    }

    /// Re-render with a fresh initiative roll
    pub fn reroll(&mut self) {
        self.recompose();
        let initiative = self
            .sheet
            .panel("initiative")
            .and_then(|p| p.as_text())
            .map(|t| t.text())
            .unwrap_or_default();
        self.set_status(format!("Initiative: {initiative}"));
    }

    pub fn sheet(&self) -> &RegionTree {
        &self.sheet
    }

    /// The painted sheet at full size
    pub fn canvas(&self) -> &Buffer {
        &self.canvas
    }

    /// Column and row of the sheet in the top-left corner of the screen
    pub fn scroll_offset(&self) -> (u16, u16) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    fn max_scroll_x(&self) -> u16 {
        self.sheet.width.saturating_sub(self.viewport.0)
    }

    fn max_scroll_y(&self) -> u16 {
        self.sheet.height.saturating_sub(self.viewport.1)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
    }

    /// Rows moved by a page scroll
    fn page(&self) -> u16 {
        self.viewport.1.saturating_sub(1).max(1)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_y = self.scroll_y.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_y = self.scroll_y.saturating_add(lines).min(self.max_scroll_y());
    }

    pub fn scroll_left(&mut self, columns: u16) {
        self.scroll_x = self.scroll_x.saturating_sub(columns);
    }

    pub fn scroll_right(&mut self, columns: u16) {
        self.scroll_x = self
            .scroll_x
            .saturating_add(columns)
            .min(self.max_scroll_x());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.max_scroll_y();
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
