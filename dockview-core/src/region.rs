use std::collections::VecDeque;

/// The three panes of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    Menu,
    Info,
    Detail,
}

impl RegionId {
    /// Focus rotation order.
    pub const CYCLE: [RegionId; 3] = [RegionId::Menu, RegionId::Info, RegionId::Detail];

    pub fn name(&self) -> &'static str {
        match self {
            RegionId::Menu => "menu",
            RegionId::Info => "info",
            RegionId::Detail => "detail",
        }
    }
}

/// A titled text buffer with a cursor and a scroll origin.
///
/// Text is written like a terminal stream: `\n` terminates a line, anything
/// after the last `\n` stays on an open line until more text arrives.
#[derive(Clone, Debug)]
pub struct Region {
    title: String,
    lines: VecDeque<String>,
    pending: String,
    cursor: usize,
    origin: usize,
    /// Keep the view pinned to the newest line.
    autoscroll: bool,
    following: bool,
    cap: Option<usize>,
}

impl Region {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: VecDeque::new(),
            pending: String::new(),
            cursor: 0,
            origin: 0,
            autoscroll: false,
            following: false,
            cap: None,
        }
    }

    pub fn with_autoscroll(mut self) -> Self {
        self.autoscroll = true;
        self.following = true;
        self
    }

    /// Drop the oldest lines once more than `cap` are held.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn write(&mut self, text: &str) {
        let mut rest = text;
        while let Some(pos) = rest.find('\n') {
            self.pending.push_str(&rest[..pos]);
            self.lines.push_back(std::mem::take(&mut self.pending));
            rest = &rest[pos + 1..];
        }
        self.pending.push_str(rest);

        self.enforce_cap();
        if self.autoscroll && self.following {
            self.cursor = self.line_count().saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
        self.cursor = 0;
        self.origin = 0;
    }

    /// Move cursor and origin back to the top-left.
    pub fn reset_position(&mut self) {
        self.cursor = 0;
        self.origin = 0;
        self.following = self.autoscroll;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(!self.pending.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        match self.lines.get(row) {
            Some(line) => Some(line.as_str()),
            None if row == self.lines.len() && !self.pending.is_empty() => {
                Some(self.pending.as_str())
            }
            None => None,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|s| s.as_str())
            .chain((!self.pending.is_empty()).then_some(self.pending.as_str()))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line under the cursor.
    pub fn current_line(&self) -> Option<&str> {
        self.line(self.cursor)
    }

    pub fn set_cursor(&mut self, row: usize) {
        self.cursor = row.min(self.last_row());
        self.following = self.autoscroll && self.cursor == self.last_row();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.set_cursor(self.cursor.saturating_add_signed(delta));
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    /// First line to draw in a viewport `height` rows tall. Moves the origin
    /// just enough to keep the cursor visible, or onto the tail when
    /// following new output.
    pub fn scroll_into_view(&mut self, height: usize) -> usize {
        if height == 0 {
            return self.origin;
        }

        if self.following {
            self.origin = self.line_count().saturating_sub(height);
        } else if self.cursor < self.origin {
            self.origin = self.cursor;
        } else if self.cursor >= self.origin + height {
            self.origin = self.cursor + 1 - height;
        }
        self.origin = self.origin.min(self.last_row());
        self.origin
    }

    fn last_row(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    fn enforce_cap(&mut self) {
        let Some(cap) = self.cap else {
            return;
        };
        while self.lines.len() > cap {
            self.lines.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
            self.origin = self.origin.saturating_sub(1);
        }
    }
}

/// Owns every pane. All three always exist, so lookups are total.
#[derive(Clone, Debug)]
pub struct RegionRegistry {
    menu: Region,
    info: Region,
    detail: Region,
}

impl RegionRegistry {
    pub fn new(menu: Region, info: Region, detail: Region) -> Self {
        Self { menu, info, detail }
    }

    pub fn get(&self, id: RegionId) -> &Region {
        match id {
            RegionId::Menu => &self.menu,
            RegionId::Info => &self.info,
            RegionId::Detail => &self.detail,
        }
    }

    pub fn get_mut(&mut self, id: RegionId) -> &mut Region {
        match id {
            RegionId::Menu => &mut self.menu,
            RegionId::Info => &mut self.info,
            RegionId::Detail => &mut self.detail,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        RegionId::CYCLE.into_iter().map(|id| (id, self.get(id)))
    }
}
