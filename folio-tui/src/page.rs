//! Page layout and scrolling.
//!
//! The page is a single tall document made of stacked sections. The
//! terminal shows a window onto it; `Page` owns the scroll offset, the
//! smooth-scroll target and respects the gallery's scroll lock.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::gallery::ScrollLock;
use crate::models::Category;
use crate::timeline;

/// Card footprint inside the project grid
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 7;

const HERO_HEIGHT: u16 = 11;
const ABOUT_HEIGHT: u16 = 8;
const FOOTER_HEIGHT: u16 = 5;
/// Section title and blank row above the filter buttons
const PROJECTS_TITLE_ROWS: u16 = 2;
/// Blank rows between the filter buttons and the grid
const FILTER_GAP_ROWS: u16 = 2;

/// Fraction of the remaining distance covered per frame while smooth scrolling
const SMOOTH_FACTOR: f64 = 0.25;

/// Rows reserved for the status bar and the log panel
const STATUS_HEIGHT: u16 = 1;
const LOG_HEIGHT: u16 = 5;

/// Fixed screen regions around the scrolling document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegions {
    pub status: Rect,
    pub document: Rect,
    pub log: Rect,
}

/// Split the terminal into status bar, document window and log panel
pub fn screen_regions(area: Rect) -> ScreenRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(LOG_HEIGHT),
        ])
        .split(area);
    ScreenRegions {
        status: chunks[0],
        document: chunks[1],
        log: chunks[2],
    }
}

/// Page sections in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Projects,
    Education,
    Footer,
}

impl SectionId {
    pub fn name(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Education => "education",
            SectionId::Footer => "footer",
        }
    }
}

/// Position of one section inside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

/// Inputs that determine section heights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInput {
    pub width: u16,
    pub show_about: bool,
    pub project_count: usize,
    pub education_count: usize,
}

/// Vertical layout of the whole document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    slots: Vec<SectionSlot>,
    total_height: u16,
    /// Rows between the projects anchor and the first card row
    projects_header: u16,
}

/// Number of card columns that fit in `width`
pub fn grid_columns(width: u16) -> u16 {
    (width.saturating_sub(2) / CARD_WIDTH).max(1)
}

/// Rows of cards needed for `count` projects, clamped to `u16::MAX`
pub fn grid_rows(count: usize, width: u16) -> u16 {
    let columns = grid_columns(width) as usize;
    u16::try_from(count.div_ceil(columns)).unwrap_or(u16::MAX)
}

/// Height of the card grid in rows, clamped to `u16::MAX`
pub fn grid_height(count: usize, width: u16) -> u16 {
    grid_rows(count, width).max(1).saturating_mul(CARD_HEIGHT)
}

/// Placement of one filter button relative to the projects section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterButton {
    pub category: Category,
    /// Column inside the section
    pub x: u16,
    /// Wrapped row, 0 for the first row of buttons
    pub row: u16,
    pub width: u16,
}

/// Lay the filter buttons out left to right, wrapping onto new rows when
/// the next button would cross `width`
pub fn filter_buttons(width: u16) -> Vec<FilterButton> {
    let mut x = 1u16;
    let mut row = 0u16;
    Category::all()
        .iter()
        .map(|&category| {
            let width_needed = category.label().chars().count() as u16 + 2;
            if x.saturating_add(width_needed) > width && x > 1 {
                x = 1;
                row += 1;
            }
            let button = FilterButton {
                category,
                x,
                row,
                width: width_needed,
            };
            x = x.saturating_add(width_needed + 1);
            button
        })
        .collect()
}

/// Rows taken by the wrapped filter buttons
pub fn filter_rows(width: u16) -> u16 {
    filter_buttons(width).last().map_or(1, |b| b.row + 1)
}

/// Rows above the card grid: title, filters and spacing
fn projects_header_height(width: u16) -> u16 {
    PROJECTS_TITLE_ROWS + filter_rows(width) + FILTER_GAP_ROWS
}

impl PageLayout {
    /// Stack the sections. The about and education sections are omitted
    /// when disabled or empty, which also removes their anchors.
    pub fn compute(input: LayoutInput) -> Self {
        let mut sections = vec![(SectionId::Hero, HERO_HEIGHT)];
        if input.show_about {
            sections.push((SectionId::About, ABOUT_HEIGHT));
        }
        let projects_header = projects_header_height(input.width);
        let grid = grid_height(input.project_count, input.width);
        sections.push((
            SectionId::Projects,
            projects_header.saturating_add(grid).saturating_add(1),
        ));
        if input.education_count > 0 {
            sections.push((
                SectionId::Education,
                timeline::container_height(input.education_count) + 1,
            ));
        }
        sections.push((SectionId::Footer, FOOTER_HEIGHT));

        let mut top = 0u16;
        let slots = sections
            .into_iter()
            .map(|(id, height)| {
                let slot = SectionSlot { id, top, height };
                top = top.saturating_add(height);
                slot
            })
            .collect();

        Self {
            slots,
            total_height: top,
            projects_header,
        }
    }

    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SectionId) -> Option<SectionSlot> {
        self.slots.iter().copied().find(|s| s.id == id)
    }

    /// Document row where a section starts, if the section exists
    pub fn anchor(&self, id: SectionId) -> Option<u16> {
        self.slot(id).map(|s| s.top)
    }

    pub fn total_height(&self) -> u16 {
        self.total_height
    }

    /// Row offset of the project grid inside the document
    pub fn grid_top(&self) -> Option<u16> {
        self.anchor(SectionId::Projects)
            .map(|top| top.saturating_add(self.projects_header))
    }
}

/// Scroll position over the document
#[derive(Debug, Clone, Default)]
pub struct Page {
    layout: PageLayout,
    /// Rows visible at once
    viewport_height: u16,
    /// Fractional offset so smooth scrolling can ease
    offset: f64,
    target: Option<f64>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Current top row of the viewport
    pub fn offset(&self) -> u16 {
        self.offset.round() as u16
    }

    pub fn is_scrolling(&self) -> bool {
        self.target.is_some()
    }

    fn max_offset(&self) -> f64 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height) as f64
    }

    /// Install a new layout and viewport size, keeping the offset in range
    pub fn relayout(&mut self, layout: PageLayout, viewport_height: u16) {
        self.layout = layout;
        self.viewport_height = viewport_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
        if let Some(target) = self.target {
            self.target = Some(target.clamp(0.0, self.max_offset()));
        }
    }

    /// Scroll by `delta` rows. Ignored while the scroll lock is held.
    pub fn scroll_by(&mut self, delta: i32, lock: ScrollLock) -> bool {
        if lock.is_locked() {
            return false;
        }
        self.target = None;
        self.offset = (self.offset + delta as f64).clamp(0.0, self.max_offset());
        true
    }

    pub fn scroll_to_top(&mut self, lock: ScrollLock) -> bool {
        self.scroll_by(-(self.offset.ceil() as i32), lock)
    }

    pub fn scroll_to_bottom(&mut self, lock: ScrollLock) -> bool {
        let remaining = self.max_offset() - self.offset;
        self.scroll_by(remaining.ceil() as i32, lock)
    }

    /// Start a smooth scroll to a section. Missing sections are a no-op.
    pub fn smooth_scroll_to(&mut self, id: SectionId, lock: ScrollLock) -> bool {
        if lock.is_locked() {
            return false;
        }
        match self.layout.anchor(id) {
            Some(row) => {
                self.target = Some((row as f64).clamp(0.0, self.max_offset()));
                true
            }
            None => false,
        }
    }

    /// Smoothly bring document rows `[top, top + height)` into view
    pub fn reveal_rows(&mut self, top: u16, height: u16, lock: ScrollLock) {
        if lock.is_locked() {
            return;
        }
        let start = self.target.unwrap_or(self.offset);
        let view = self.viewport_height as f64;
        let (top, bottom) = (top as f64, (top + height) as f64);
        let wanted = if top < start {
            top
        } else if bottom > start + view {
            bottom - view
        } else {
            return;
        };
        self.target = Some(wanted.clamp(0.0, self.max_offset()));
    }

    /// Advance smooth scrolling by one frame. Returns whether the offset moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target - self.offset;
        if distance.abs() <= 0.5 {
            self.offset = target;
            self.target = None;
        } else {
            let step = distance * SMOOTH_FACTOR;
            let step = if step.abs() < 0.5 { 0.5 * distance.signum() } else { step };
            self.offset += step;
        }
        true
    }

    /// Viewport-relative top of a section, negative once scrolled past
    pub fn section_screen_top(&self, id: SectionId) -> Option<i32> {
        self.layout
            .anchor(id)
            .map(|top| top as i32 - self.offset() as i32)
    }
}
