//! Painting a composed region tree with ratatui widgets

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, Widget, Wrap},
};

use dnd_core::sheet::{
    Align, Axis, Body, Border, Content, Panel, Region, RegionTree, Size, Span as SheetSpan,
    Table as SheetTable, TextBlock,
};

use crate::ui::theme::SheetTheme;

/// Paints a whole region tree into the area it is given
pub struct SheetWidget<'a> {
    tree: &'a RegionTree,
    theme: &'a SheetTheme,
}

impl<'a> SheetWidget<'a> {
    pub fn new(tree: &'a RegionTree, theme: &'a SheetTheme) -> Self {
        Self { tree, theme }
    }
}

impl Widget for SheetWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        paint_region(&self.tree.root, area, buf, self.theme);
    }
}

/// Paint a tree into an off-screen buffer of exactly the tree's size
pub fn paint_sheet(tree: &RegionTree, theme: &SheetTheme) -> Buffer {
    let area = Rect::new(0, 0, tree.width, tree.height);
    let mut buf = Buffer::empty(area);
    SheetWidget::new(tree, theme).render(area, &mut buf);
    buf
}

fn paint_region(region: &Region, area: Rect, buf: &mut Buffer, theme: &SheetTheme) {
    match &region.body {
        Body::Split { axis, children } => {
            let chunks = Layout::default()
                .direction(direction(*axis))
                .constraints(children.iter().map(|child| constraint(child.size)))
                .flex(Flex::Start)
                .split(area);

            for (child, chunk) in children.iter().zip(chunks.iter()) {
                paint_region(child, *chunk, buf, theme);
            }
        }
        Body::Panel(panel) => PanelWidget::new(panel, theme).render(area, buf),
    }
}

fn direction(axis: Axis) -> Direction {
    match axis {
        Axis::Horizontal => Direction::Horizontal,
        Axis::Vertical => Direction::Vertical,
    }
}

fn constraint(size: Size) -> Constraint {
    match size {
        Size::Length(n) => Constraint::Length(n),
        Size::Fill(weight) => Constraint::Fill(weight),
    }
}

/// A single bordered panel
struct PanelWidget<'a> {
    panel: &'a Panel,
    theme: &'a SheetTheme,
}

impl<'a> PanelWidget<'a> {
    fn new(panel: &'a Panel, theme: &'a SheetTheme) -> Self {
        Self { panel, theme }
    }

    fn block(&self) -> Block<'a> {
        let borders = match self.panel.border {
            Border::None => Borders::NONE,
            Border::Heavy | Border::Accent => Borders::ALL,
        };

        let mut block = Block::default()
            .borders(borders)
            .border_type(self.theme.border_type(self.panel.border))
            .border_style(self.theme.border_style(self.panel.border))
            .padding(Padding::uniform(self.panel.padding));

        if let Some(subtitle) = &self.panel.subtitle {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {subtitle} "),
                    self.theme.subtitle_style(),
                ))
                .left_aligned(),
            );
        }
        block
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = match self.panel.width {
            Some(width) => Rect {
                width: width.min(area.width),
                ..area
            },
            None => area,
        };

        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        match &self.panel.content {
            Content::Text(text) => text_paragraph(text, self.theme).render(inner, buf),
            Content::Table(table) => Widget::render(sheet_table(table, self.theme), inner, buf),
        }
    }
}

fn styled_span(span: &SheetSpan, theme: &SheetTheme) -> Span<'static> {
    Span::styled(span.text.clone(), theme.emphasis_style(span.emphasis))
}

fn text_paragraph<'a>(text: &TextBlock, theme: &SheetTheme) -> Paragraph<'a> {
    let lines: Vec<Line> = text
        .lines
        .iter()
        .map(|line| Line::from(line.spans.iter().map(|s| styled_span(s, theme)).collect::<Vec<_>>()))
        .collect();

    let alignment = match text.align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    };

    Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: false })
}

/// Display width of a cell's text
fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Column widths weighted by the widest entry in each column
fn column_constraints(table: &SheetTable) -> Vec<Constraint> {
    (0..table.column_count())
        .map(|column| {
            let header = table
                .header
                .as_ref()
                .and_then(|h| h.get(column))
                .map(|h| text_width(h))
                .unwrap_or(0);
            let widest = table
                .rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| text_width(&cell.text))
                .max()
                .unwrap_or(0);
            Constraint::Fill(header.max(widest).max(1))
        })
        .collect()
}

fn sheet_table<'a>(table: &SheetTable, theme: &SheetTheme) -> Table<'a> {
    let rows = table.rows.iter().map(|row| {
        Row::new(
            row.iter()
                .map(|cell| Cell::from(styled_span(cell, theme)))
                .collect::<Vec<_>>(),
        )
    });

    let widths = column_constraints(table);
    let mut widget = Table::new(rows, widths).column_spacing(1);

    if let Some(header) = &table.header {
        widget = widget.header(
            Row::new(header.iter().map(|h| Cell::from(h.clone())).collect::<Vec<_>>())
                .style(theme.table_header_style())
                .bottom_margin(1),
        );
    }
    widget
}

/// Shows the part of a painted sheet that fits the terminal
pub struct SheetViewport<'a> {
    canvas: &'a Buffer,
    offset: (u16, u16),
}

impl<'a> SheetViewport<'a> {
    pub fn new(canvas: &'a Buffer) -> Self {
        Self {
            canvas,
            offset: (0, 0),
        }
    }

    /// Column and row of the sheet shown in the top-left corner
    pub fn offset(mut self, x: u16, y: u16) -> Self {
        self.offset = (x, y);
        self
    }
}

impl Widget for SheetViewport<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (left, top) = self.offset;
        for dy in 0..area.height {
            for dx in 0..area.width {
                let source = (left.saturating_add(dx), top.saturating_add(dy));
                let target = (area.x + dx, area.y + dy);
                if let (Some(cell), Some(slot)) = (self.canvas.cell(source), buf.cell_mut(target)) {
                    *slot = cell.clone();
                }
            }
        }
    }
}

/// Plain text of each buffer row, trailing blanks removed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            let mut skip = 0usize;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                if let Some(cell) = buf.cell((x, y)) {
                    let symbol = cell.symbol();
                    skip = Span::raw(symbol).width().saturating_sub(1);
                    line.push_str(symbol);
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnd_core::dice::FixedRoller;
    use dnd_core::sheet::{render_sheet, SheetConfig};
    use dnd_core::testing::sample_wizard;

    fn painted_sample(width: u16) -> (RegionTree, Vec<String>) {
        let tree = render_sheet(&sample_wizard(), width, &SheetConfig::default(), &mut FixedRoller(10));
        let buf = paint_sheet(&tree, &SheetTheme::default());
        (tree, buffer_lines(&buf))
    }

    #[test]
    fn test_canvas_matches_tree_size() {
        let tree = render_sheet(&sample_wizard(), 200, &SheetConfig::default(), &mut FixedRoller(10));
        let buf = paint_sheet(&tree, &SheetTheme::default());
        assert_eq!(buf.area.width, tree.width);
        assert_eq!(buf.area.height, tree.height);
    }

    #[test]
    fn test_subtitles_on_bottom_borders() {
        let (_, lines) = painted_sample(200);
        let text = lines.join("\n");
        for subtitle in ["STR", "CHA", "Saving Throws", "Skills", "Armor Class", "Lore"] {
            assert!(text.contains(subtitle), "missing subtitle {subtitle}");
        }
    }

    #[test]
    fn test_character_name_and_spells_painted() {
        let (_, lines) = painted_sample(200);
        let text = lines.join("\n");
        assert!(text.contains("Rando B. Higgins"));
        assert!(text.contains("Magic Missile"));
        assert!(text.contains("Force"));
    }

    #[test]
    fn test_heavy_border_glyphs() {
        let (_, lines) = painted_sample(200);
        assert!(lines[0].starts_with('┏'));
    }

    #[test]
    fn test_viewport_offsets_into_canvas() {
        let mut canvas = Buffer::empty(Rect::new(0, 0, 10, 4));
        canvas.set_string(0, 2, "abcdefghij", ratatui::style::Style::default());

        let area = Rect::new(0, 0, 4, 2);
        let mut screen = Buffer::empty(area);
        SheetViewport::new(&canvas).offset(3, 1).render(area, &mut screen);

        let lines = buffer_lines(&screen);
        assert_eq!(lines, ["", "defg"]);
    }

    #[test]
    fn test_viewport_past_the_edge_leaves_blanks() {
        let canvas = Buffer::empty(Rect::new(0, 0, 2, 2));
        let area = Rect::new(0, 0, 4, 4);
        let mut screen = Buffer::empty(area);
        SheetViewport::new(&canvas).offset(50, 50).render(area, &mut screen);
        assert!(buffer_lines(&screen).iter().all(|l| l.is_empty()));
    }
}
