mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use dockview_core::feature::Feature;
use dockview_core::menu::{MenuController, Phase};
use dockview_core::region::RegionId;

pub use theme::styles;

/// Menu pane height: one row per entry plus borders.
const MENU_HEIGHT: u16 = Feature::ALL.len() as u16 + 2;

/// Where each pane was drawn, for mouse hit-testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaneLayout {
    pub menu: Rect,
    pub info: Rect,
    pub detail: Rect,
}

impl PaneLayout {
    /// Splits `area` into the menu and info stacked on the left third, the
    /// detail pane on the right, and a one-row footer.
    pub fn compute(area: Rect) -> (Self, Rect) {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
        let columns =
            Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)]).split(rows[0]);
        let left =
            Layout::vertical([Constraint::Length(MENU_HEIGHT), Constraint::Min(0)]).split(columns[0]);

        let layout = Self {
            menu: left[0],
            info: left[1],
            detail: columns[1],
        };
        (layout, rows[1])
    }

    pub fn rect(&self, id: RegionId) -> Rect {
        match id {
            RegionId::Menu => self.menu,
            RegionId::Info => self.info,
            RegionId::Detail => self.detail,
        }
    }

    pub fn region_at(&self, column: u16, row: u16) -> Option<RegionId> {
        let pos = Position::new(column, row);
        RegionId::CYCLE
            .into_iter()
            .find(|id| self.rect(*id).contains(pos))
    }
}

pub fn draw(f: &mut Frame, controller: &mut MenuController) -> PaneLayout {
    let (layout, footer) = PaneLayout::compute(f.area());

    for id in RegionId::CYCLE {
        draw_region(f, controller, id, layout.rect(id));
    }
    draw_footer(f, controller, footer);

    layout
}

fn draw_region(f: &mut Frame, controller: &mut MenuController, id: RegionId, area: Rect) {
    let focused = controller.active_region() == id;
    let border_style = if focused {
        styles::border_focused()
    } else {
        styles::border_subtle()
    };

    let region = controller.region_mut(id);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(region.title().to_string(), styles::title()));

    let height = block.inner(area).height as usize;
    let origin = region.scroll_into_view(height);
    let cursor = region.cursor();

    // The menu always shows its selection; other panes only while focused.
    let show_cursor = id == RegionId::Menu || focused;
    let cursor_style = if id == RegionId::Menu {
        styles::menu_selection()
    } else {
        styles::selection()
    };

    let lines: Vec<Line> = region
        .lines()
        .enumerate()
        .skip(origin)
        .take(height)
        .map(|(row, text)| {
            let line = styled_line(id, text);
            if show_cursor && row == cursor && !region.is_empty() {
                line.style(cursor_style)
            } else {
                line
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Colors the leading `<tag>` of listing lines and error reports.
fn styled_line(id: RegionId, text: &str) -> Line<'static> {
    if id != RegionId::Menu {
        if text.starts_with(" error:") {
            return Line::styled(text.to_string(), styles::error());
        }
        if let Some(rest) = text.strip_prefix(" <") {
            if let Some(end) = rest.find('>') {
                let tag = &rest[..end];
                return Line::from(vec![
                    Span::raw(" "),
                    Span::styled(format!("<{}>", tag), styles::tag(tag)),
                    Span::styled(rest[end + 1..].to_string(), styles::text()),
                ]);
            }
        }
    }
    Line::styled(text.to_string(), styles::text())
}

fn draw_footer(f: &mut Frame, controller: &MenuController, area: Rect) {
    let mut spans = Vec::new();
    for (key, action) in [
        ("Enter", "open"),
        ("1-3", "jump"),
        ("Tab", "focus"),
        ("↑↓", "move"),
        ("r", "refresh"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(format!(" {}", key), styles::key_hint()));
        spans.push(Span::styled(format!(" {} ", action), styles::text_dim()));
    }

    spans.push(Span::styled(
        format!("│ {} ", controller.client_name()),
        styles::text_dim(),
    ));
    if let Phase::Dispatching { label } = controller.phase() {
        spans.push(Span::styled(
            format!("│ Loading {}…", label.trim()),
            styles::warn(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(Style::default()), area);
}
