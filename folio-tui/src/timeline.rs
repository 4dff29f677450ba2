//! Education timeline widget.
//!
//! Entries reveal themselves once 30% of their rows are inside the
//! viewport and stay revealed afterwards. The vertical line grows from 10%
//! to 100% of the container as the container scrolls through the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::markup::sanitize_terminal;
use crate::models::EducationEntry;
use crate::theme::{colors, get_accent_color, styles};

/// Fraction of an entry that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.3;
/// Line height bounds, as fractions of the container
pub const LINE_MIN: f64 = 0.10;
pub const LINE_MAX: f64 = 1.0;

/// Rows used by a single entry (title, institution/period, summary, gap)
pub const ENTRY_HEIGHT: u16 = 4;
/// Rows above the first entry (section heading)
pub const HEADER_HEIGHT: u16 = 2;

const LINE_COLUMN: u16 = 3;
const LINE_CHAR: char = '┃';
const LINE_TRACK_CHAR: char = '┆';
const NODE_REVEALED: char = '◆';
const NODE_HIDDEN: char = '◇';
const PULSE_CHARS: [char; 4] = ['◆', '◈', '◇', '◈'];

/// Share of a span `[top, top + height)` lying inside `[0, viewport)`
pub fn visible_fraction(top: i32, height: u16, viewport: u16) -> f64 {
    if height == 0 {
        return 0.0;
    }
    let start = top.max(0);
    let end = (top + height as i32).min(viewport as i32);
    if end <= start {
        return 0.0;
    }
    (end - start) as f64 / height as f64
}

/// Scroll progress of a container through the viewport in `[0, 1]`:
/// 0 while its top is still below the viewport, 1 once its bottom has
/// left through the top.
pub fn scroll_progress(top: i32, height: u16, viewport: u16) -> f64 {
    let vh = viewport as f64;
    let total = height as f64 + vh;
    if total <= 0.0 {
        return 0.0;
    }
    let visible_top = (vh - top as f64).clamp(0.0, total);
    (visible_top / total).clamp(0.0, 1.0)
}

/// Line height as a percentage of the container
pub fn line_height_percent(top: i32, height: u16, viewport: u16) -> f64 {
    let progress = scroll_progress(top, height, viewport);
    (LINE_MIN + (LINE_MAX - LINE_MIN) * progress) * 100.0
}

/// Timeline animation state
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    /// Per-entry one-shot reveal flags
    revealed: Vec<bool>,
    /// Current line height in percent; `None` while the feature is disabled
    line_percent: Option<f64>,
    /// Animation frame counter for the pulse effect
    pub animation_frame: u64,
}

impl TimelineState {
    pub fn new(entries: usize) -> Self {
        Self {
            revealed: vec![false; entries],
            line_percent: None,
            animation_frame: 0,
        }
    }

    /// Whether there is anything to animate
    pub fn is_enabled(&self) -> bool {
        !self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    pub fn line_percent(&self) -> Option<f64> {
        self.line_percent
    }

    /// Recompute reveal flags and line height for a container whose top is
    /// `container_top` rows from the top of the viewport. Called on every
    /// scroll and resize. Returns the indices revealed by this call.
    pub fn update(&mut self, container_top: i32, viewport: u16) -> Vec<usize> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let mut newly = Vec::new();
        for (index, revealed) in self.revealed.iter_mut().enumerate() {
            if *revealed {
                continue;
            }
            let top = container_top + entry_offset(index) as i32;
            if visible_fraction(top, ENTRY_HEIGHT, viewport) >= REVEAL_THRESHOLD {
                *revealed = true;
                newly.push(index);
            }
        }

        let height = container_height(self.revealed.len());
        self.line_percent = Some(line_height_percent(container_top, height, viewport));
        newly
    }

    /// Advance animation frame
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }
}

/// Row offset of an entry inside the container
pub fn entry_offset(index: usize) -> u16 {
    HEADER_HEIGHT + index as u16 * ENTRY_HEIGHT
}

/// Rows needed for the whole timeline section
pub fn container_height(entries: usize) -> u16 {
    HEADER_HEIGHT + entries as u16 * ENTRY_HEIGHT
}

/// Renders the education section
pub struct TimelineWidget<'a> {
    entries: &'a [EducationEntry],
    state: &'a TimelineState,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(entries: &'a [EducationEntry], state: &'a TimelineState) -> Self {
        Self { entries, state }
    }

    fn render_line(&self, area: Rect, buf: &mut Buffer) {
        let track = area.height.saturating_sub(HEADER_HEIGHT);
        let percent = self.state.line_percent.unwrap_or(LINE_MIN * 100.0);
        let filled = ((track as f64) * percent / 100.0).round() as u16;
        let x = area.x + LINE_COLUMN;

        for row in 0..track {
            let y = area.y + HEADER_HEIGHT + row;
            let (ch, style) = if row < filled {
                (LINE_CHAR, Style::default().fg(colors::PURPLE))
            } else {
                (LINE_TRACK_CHAR, Style::default().fg(colors::BORDER_DIM))
            };
            buf[(x, y)].set_char(ch).set_style(style);
        }
    }

    fn render_entry(&self, area: Rect, buf: &mut Buffer, index: usize, entry: &EducationEntry) {
        let y = area.y + entry_offset(index);
        if y + 1 >= area.y + area.height {
            return;
        }
        let accent = get_accent_color(index);
        let text_x = area.x + LINE_COLUMN + 3;
        let text_width = area.width.saturating_sub(LINE_COLUMN + 4) as usize;

        if !self.state.is_revealed(index) {
            buf.set_string(
                area.x + LINE_COLUMN,
                y,
                NODE_HIDDEN.to_string(),
                styles::text_hint(),
            );
            return;
        }

        let newest = index + 1 == self.state.revealed_count();
        let node = if newest {
            PULSE_CHARS[(self.state.animation_frame / 6) as usize % PULSE_CHARS.len()]
        } else {
            NODE_REVEALED
        };
        buf.set_string(
            area.x + LINE_COLUMN,
            y,
            node.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        );

        let title = truncate(&sanitize_terminal(&entry.title), text_width);
        buf.set_string(
            text_x,
            y,
            title,
            Style::default().fg(colors::FG_PRIMARY).add_modifier(Modifier::BOLD),
        );

        let meta = format!("{}  ·  {}", sanitize_terminal(&entry.institution), entry.period());
        buf.set_string(text_x, y + 1, truncate(&meta, text_width), Style::default().fg(accent));

        if y + 2 < area.y + area.height {
            let summary = truncate(&sanitize_terminal(&entry.summary), text_width);
            buf.set_string(text_x, y + 2, summary, styles::text_dim());
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < LINE_COLUMN + 8 || area.height <= HEADER_HEIGHT {
            return;
        }

        buf.set_string(area.x + 1, area.y, "Education", styles::title_accent());

        if self.entries.is_empty() {
            return;
        }

        self.render_line(area, buf);
        for (index, entry) in self.entries.iter().enumerate() {
            self.render_entry(area, buf, index, entry);
        }
    }
}
