//! Region tree produced by the sheet compositor.
//!
//! A [`Region`] is a named rectangle. Its [`Size`] is declared along the axis
//! of the parent split; along the cross axis it takes the parent's full
//! extent. Leaves hold a [`Panel`] describing what to draw, never how.

use std::fmt;
use thiserror::Error;

/// Direction in which a split lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Children placed left to right; sizes are widths.
    Horizontal,
    /// Children stacked top to bottom; sizes are heights.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Declared size of a region along its parent's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    /// Absolute number of cells.
    Length(u16),
    /// Weighted share of whatever the `Length` siblings leave over.
    Fill(u16),
}

/// Layout invariant violations found by [`RegionTree::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("region '{region}' needs {used} cells {axis}ly but only {available} are available")]
    Overflow {
        region: String,
        axis: Axis,
        used: u16,
        available: u16,
    },
}

/// Text emphasis, mapped to concrete styles by the painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Plain,
    /// Labels and headings.
    Strong,
    /// Marker for a proficient saving throw or skill.
    Proficient,
    /// Hit dice counters.
    Glowing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Frame drawn around a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Border {
    #[default]
    Heavy,
    /// Heavy border in the accent colour (ability score boxes).
    Accent,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Plain)
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Span::plain(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Span::plain(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLine {
    pub spans: Vec<Span>,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<Span> for TextLine {
    fn from(span: Span) -> Self {
        TextLine { spans: vec![span] }
    }
}

impl From<&str> for TextLine {
    fn from(text: &str) -> Self {
        Span::plain(text).into()
    }
}

impl From<String> for TextLine {
    fn from(text: String) -> Self {
        Span::plain(text).into()
    }
}

/// Free text, one entry per display line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub align: Align,
}

/// Characters that end a line, besides `\r\n` which counts as one break.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into lines on any line break, including vertical tab, form
/// feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators. A trailing break does not add an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

impl TextBlock {
    /// Split `text` into plain lines, see [`split_lines`].
    pub fn plain(text: &str) -> Self {
        Self {
            lines: split_lines(text).into_iter().map(TextLine::from).collect(),
            align: Align::Left,
        }
    }

    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            align: Align::Left,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Make every span in the block use `emphasis`.
    pub fn emphasized(mut self, emphasis: Emphasis) -> Self {
        for span in self.lines.iter_mut().flat_map(|l| l.spans.iter_mut()) {
            span.emphasis = emphasis;
        }
        self
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rows of cells. A table without a header is drawn as a borderless grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<Span>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: Some(columns.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    pub fn grid() -> Self {
        Self::default()
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Span>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Span>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn column_count(&self) -> usize {
        self.header
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.rows.first().map(Vec::len))
            .unwrap_or(0)
    }

    /// Text of column `column` in every row.
    pub fn column_text(&self, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(column).map(|s| s.text.as_str()).unwrap_or(""))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(TextBlock),
    Table(Table),
}

/// A boxed content block with an optional subtitle on its bottom border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub subtitle: Option<String>,
    pub border: Border,
    /// Inner blank cells between border and content.
    pub padding: u16,
    /// Fixed panel width inside a wider region.
    pub width: Option<u16>,
    pub content: Content,
}

impl Panel {
    pub fn new(content: Content) -> Self {
        Self {
            subtitle: None,
            border: Border::Heavy,
            padding: 0,
            width: None,
            content,
        }
    }

    pub fn text(block: TextBlock) -> Self {
        Self::new(Content::Text(block))
    }

    pub fn table(table: Table) -> Self {
        Self::new(Content::Table(table))
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.content {
            Content::Table(table) => Some(table),
            Content::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match &self.content {
            Content::Text(block) => Some(block),
            Content::Table(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Split { axis: Axis, children: Vec<Region> },
    Panel(Panel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub size: Size,
    pub body: Body,
}

impl Region {
    pub fn panel(name: impl Into<String>, size: Size, panel: Panel) -> Self {
        Self {
            name: name.into(),
            size,
            body: Body::Panel(panel),
        }
    }

    pub fn split(name: impl Into<String>, size: Size, axis: Axis, children: Vec<Region>) -> Self {
        Self {
            name: name.into(),
            size,
            body: Body::Split { axis, children },
        }
    }

    pub fn children(&self) -> &[Region] {
        match &self.body {
            Body::Split { children, .. } => children,
            Body::Panel(_) => &[],
        }
    }

    pub fn as_panel(&self) -> Option<&Panel> {
        match &self.body {
            Body::Panel(panel) => Some(panel),
            Body::Split { .. } => None,
        }
    }

    /// Depth-first search for the first region called `name`.
    pub fn find(&self, name: &str) -> Option<&Region> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// All panel leaves, in paint order.
    pub fn leaves(&self) -> Vec<&Region> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Region>) {
        match &self.body {
            Body::Panel(_) => out.push(self),
            Body::Split { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    fn check(&self, width: u16, height: u16, errors: &mut Vec<LayoutError>) {
        match &self.body {
            Body::Panel(panel) => {
                if let Some(panel_width) = panel.width {
                    if panel_width > width {
                        errors.push(LayoutError::Overflow {
                            region: self.name.clone(),
                            axis: Axis::Horizontal,
                            used: panel_width,
                            available: width,
                        });
                    }
                }
            }
            Body::Split { axis, children } => {
                let available = match axis {
                    Axis::Horizontal => width,
                    Axis::Vertical => height,
                };
                let extents = distribute(available, children.iter().map(|c| c.size));
                let used: u32 = children
                    .iter()
                    .filter_map(|c| match c.size {
                        Size::Length(n) => Some(u32::from(n)),
                        Size::Fill(_) => None,
                    })
                    .sum();
                if used > u32::from(available) {
                    errors.push(LayoutError::Overflow {
                        region: self.name.clone(),
                        axis: *axis,
                        used: u16::try_from(used).unwrap_or(u16::MAX),
                        available,
                    });
                }

                for (child, extent) in children.iter().zip(extents) {
                    match axis {
                        Axis::Horizontal => child.check(extent, height, errors),
                        Axis::Vertical => child.check(width, extent, errors),
                    }
                }
            }
        }
    }
}

/// Split `available` cells between `sizes`.
///
/// `Length` sizes get exactly their length, clipped to what is left. `Fill`
/// sizes share the remainder by weight; the last fill absorbs rounding.
pub fn distribute(available: u16, sizes: impl IntoIterator<Item = Size>) -> Vec<u16> {
    let sizes: Vec<Size> = sizes.into_iter().collect();
    let fixed: u32 = sizes
        .iter()
        .map(|s| match s {
            Size::Length(n) => u32::from(*n),
            Size::Fill(_) => 0,
        })
        .sum();
    let total_weight: u32 = sizes
        .iter()
        .map(|s| match s {
            Size::Fill(w) => u32::from(*w),
            Size::Length(_) => 0,
        })
        .sum();
    let spare = u32::from(available).saturating_sub(fixed);
    let last_fill = sizes.iter().rposition(|s| matches!(s, Size::Fill(_)));

    let mut handed_out = 0u32;
    let mut left = u32::from(available);
    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let want = match size {
                Size::Length(n) => u32::from(*n),
                Size::Fill(_) if Some(i) == last_fill => spare - handed_out.min(spare),
                Size::Fill(w) if total_weight > 0 => {
                    let share = spare * u32::from(*w) / total_weight;
                    handed_out += share;
                    share
                }
                Size::Fill(_) => 0,
            };
            let got = want.min(left);
            left -= got;
            got as u16
        })
        .collect()
}

/// The full sheet: a root region plus the extent it was composed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTree {
    pub width: u16,
    pub height: u16,
    pub root: Region,
}

impl RegionTree {
    /// Every place where declared sizes exceed the parent's extent.
    pub fn check(&self) -> Vec<LayoutError> {
        let mut errors = Vec::new();
        self.root.check(self.width, self.height, &mut errors);
        errors
    }

    pub fn find(&self, name: &str) -> Option<&Region> {
        self.root.find(name)
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.find(name).and_then(Region::as_panel)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.panel(name).and_then(Panel::as_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_on_every_break() {
        assert_eq!(split_lines(""), Vec::<&str>::new());
        assert_eq!(split_lines("one"), ["one"]);
        assert_eq!(split_lines("one\ntwo\n"), ["one", "two"]);
        assert_eq!(split_lines("one\r\ntwo\rthree"), ["one", "two", "three"]);
        assert_eq!(split_lines("a\n\nb"), ["a", "", "b"]);
        assert_eq!(split_lines("\n"), [""]);
        assert_eq!(
            split_lines("a\u{0b}b\u{0c}c\u{1c}d\u{1d}e\u{1e}f\u{85}g\u{2028}h\u{2029}i"),
            ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        );
    }

    #[test]
    fn test_plain_text_block_uses_every_break() {
        let block = TextBlock::plain("first\u{2028}second\x0cthird");
        assert_eq!(block.lines.len(), 3);
        assert_eq!(block.text(), "first\nsecond\nthird");
    }

    fn leaf(name: &str, size: Size) -> Region {
        Region::panel(name, size, Panel::text(TextBlock::plain(name)))
    }

    #[test]
    fn test_distribute_lengths_and_fills() {
        let sizes = [Size::Length(10), Size::Fill(1), Size::Fill(1)];
        assert_eq!(distribute(31, sizes), vec![10, 10, 11]);

        let weighted = [Size::Fill(1), Size::Fill(3)];
        assert_eq!(distribute(40, weighted), vec![10, 30]);
    }

    #[test]
    fn test_distribute_clips_overflow() {
        let sizes = [Size::Length(8), Size::Length(8), Size::Fill(1)];
        assert_eq!(distribute(10, sizes), vec![8, 2, 0]);
    }

    #[test]
    fn test_check_reports_overflow() {
        let tree = RegionTree {
            width: 20,
            height: 5,
            root: Region::split(
                "row",
                Size::Fill(1),
                Axis::Horizontal,
                vec![leaf("a", Size::Length(15)), leaf("b", Size::Length(10))],
            ),
        };
        let errors = tree.check();
        assert_eq!(
            errors,
            vec![LayoutError::Overflow {
                region: "row".to_string(),
                axis: Axis::Horizontal,
                used: 25,
                available: 20,
            }]
        );
    }

    #[test]
    fn test_check_descends_with_child_extents() {
        let column = Region::split(
            "column",
            Size::Length(10),
            Axis::Vertical,
            vec![Region::panel(
                "narrow",
                Size::Length(4),
                Panel::text(TextBlock::plain("x")).width(12),
            )],
        );
        let tree = RegionTree {
            width: 30,
            height: 4,
            root: Region::split("root", Size::Fill(1), Axis::Horizontal, vec![column]),
        };
        let errors = tree.check();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("narrow"));
    }

    #[test]
    fn test_find_and_leaves() {
        let root = Region::split(
            "root",
            Size::Fill(1),
            Axis::Vertical,
            vec![
                leaf("top", Size::Length(1)),
                Region::split(
                    "bottom",
                    Size::Fill(1),
                    Axis::Horizontal,
                    vec![leaf("left", Size::Fill(1)), leaf("right", Size::Fill(1))],
                ),
            ],
        );
        assert!(root.find("right").is_some());
        assert!(root.find("missing").is_none());
        let names: Vec<&str> = root.leaves().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["top", "left", "right"]);
    }

    #[test]
    fn test_table_columns() {
        let table = Table::new(["QTY", "COIN"]).row(["3", "gp"]).row(["0", "sp"]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_text(1), ["gp", "sp"]);
        assert_eq!(Table::grid().row(["a", "b", "c"]).column_count(), 3);
    }
}
