//! Application state and event handling.
//!
//! A single `App` owns every piece of state (gallery, page scroll, timeline
//! animation, focus, log) and is mutated only from the event loop, one
//! event at a time.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, error, info, warn};

use crate::error::GalleryError;
use crate::gallery::{Gallery, Step};
use crate::models::{Catalog, Category, EducationEntry};
use crate::page::{screen_regions, LayoutInput, Page, PageLayout, SectionId};
use crate::timeline::TimelineState;

/// Rows scrolled per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: Catalog,
    pub education: Vec<EducationEntry>,
    pub show_about: bool,
}

/// Buttons inside the project modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalButton {
    Close,
    Previous,
    Next,
}

impl ModalButton {
    pub fn all() -> &'static [ModalButton] {
        &[ModalButton::Close, ModalButton::Previous, ModalButton::Next]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModalButton::Close => "Close",
            ModalButton::Previous => "← Previous",
            ModalButton::Next => "Next →",
        }
    }
}

/// Something on the page that reacts to clicks and can hold focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    HeroViewWork,
    HeroAbout,
    Filter(Category),
    Card(u32),
    Modal(ModalButton),
}

/// Clickable regions recorded during the last render
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Screen area showing the document
    pub document_area: Rect,
    /// Scroll offset the document was rendered at
    pub offset: u16,
    /// Targets in document coordinates
    pub targets: Vec<(Rect, Focus)>,
    /// Modal content box in screen coordinates
    pub modal_content: Option<Rect>,
    /// Modal buttons in screen coordinates
    pub modal_buttons: Vec<(Rect, ModalButton)>,
}

impl HitMap {
    /// Page target under a screen cell
    pub fn target_at(&self, column: u16, row: u16) -> Option<Focus> {
        if !self.document_area.contains(Position::new(column, row)) {
            return None;
        }
        let doc = Position::new(
            column - self.document_area.x,
            row - self.document_area.y + self.offset,
        );
        self.targets
            .iter()
            .find(|(rect, _)| rect.contains(doc))
            .map(|(_, target)| *target)
    }

    pub fn modal_button_at(&self, column: u16, row: u16) -> Option<ModalButton> {
        let pos = Position::new(column, row);
        self.modal_buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, button)| *button)
    }

    pub fn inside_modal(&self, column: u16, row: u16) -> bool {
        self.modal_content
            .is_some_and(|rect| rect.contains(Position::new(column, row)))
    }

    /// Document rect of a page target
    pub fn rect_of(&self, focus: Focus) -> Option<Rect> {
        self.targets
            .iter()
            .find(|(_, target)| *target == focus)
            .map(|(rect, _)| *rect)
    }
}

/// Log entry for the message area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogEntry {
    fn with_level(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(LogLevel::Error, message)
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Filter and modal state
    pub gallery: Gallery,

    /// Document scroll state
    pub page: Page,

    /// Education entries and their animation state
    pub education: Vec<EducationEntry>,
    pub timeline_state: TimelineState,

    show_about: bool,

    /// Focused element, if any
    pub focus: Option<Focus>,
    /// Where focus goes back to when the modal closes
    return_focus: Option<Focus>,

    /// Regions from the last render, used for mouse hit testing
    pub hit_map: HitMap,

    /// Last known terminal size
    screen: Rect,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// Frame counter for animations
    pub frame_count: u64,

    /// Show help overlay
    pub show_help: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Self {
        let gallery = Gallery::new(config.catalog);
        let timeline_state = TimelineState::new(config.education.len());

        let mut app = Self {
            should_quit: false,
            gallery,
            page: Page::new(),
            education: config.education,
            timeline_state,
            show_about: config.show_about,
            focus: None,
            return_focus: None,
            hit_map: HitMap::default(),
            screen: Rect::default(),
            logs: Vec::new(),
            max_logs: 100,
            frame_count: 0,
            show_help: false,
        };

        let count = app.gallery.catalog().len();
        app.log(LogEntry::success(format!("Loaded {} projects", count)));
        if !app.timeline_state.is_enabled() {
            app.log(LogEntry::warning("No education entries, timeline disabled"));
        }
        app
    }

    /// Add a log entry, mirrored to the tracing subscriber
    pub fn log(&mut self, entry: LogEntry) {
        match entry.level {
            LogLevel::Info | LogLevel::Success => info!("{}", entry.message),
            LogLevel::Warning => warn!("{}", entry.message),
            LogLevel::Error => error!("{}", entry.message),
        }
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn show_about(&self) -> bool {
        self.show_about
    }

    // ============================================
    // Layout and animation
    // ============================================

    /// Recompute the document layout for the current screen and filter
    fn refresh_layout(&mut self) {
        let document = screen_regions(self.screen).document;
        let layout = PageLayout::compute(LayoutInput {
            width: document.width,
            show_about: self.show_about,
            project_count: self.gallery.filtered_len(),
            education_count: self.education.len(),
        });
        self.page.relayout(layout, document.height);
        self.update_timeline();
    }

    /// Handle a terminal resize
    pub fn resize(&mut self, width: u16, height: u16) {
        let screen = Rect::new(0, 0, width, height);
        if screen != self.screen {
            self.screen = screen;
            self.refresh_layout();
            debug!(width, height, "resized");
        }
    }

    fn update_timeline(&mut self) {
        let Some(top) = self.page.section_screen_top(SectionId::Education) else {
            return;
        };
        let newly = self.timeline_state.update(top, self.page.viewport_height());
        for index in newly {
            if let Some(entry) = self.education.get(index) {
                debug!(entry = %entry.title, "timeline entry revealed");
            }
        }
    }

    /// Update animations (called every frame)
    pub fn tick(&mut self, width: u16, height: u16) {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.resize(width, height);
        if self.page.tick() {
            self.update_timeline();
        }
        self.timeline_state.tick();
    }

    // ============================================
    // Gallery actions
    // ============================================

    /// Switch the active filter
    pub fn set_category(&mut self, category: Category) {
        self.gallery.set_category(category);
        self.log(LogEntry::info(format!(
            "Filter: {} ({} projects)",
            category.label(),
            self.gallery.filtered_len()
        )));
        self.refresh_layout();
        if let Some(Focus::Card(id)) = self.focus {
            if self.gallery.position_in_view(id).is_none() {
                self.focus = Some(Focus::Filter(category));
            }
        }
    }

    /// Switch the active filter by name
    pub fn set_category_name(&mut self, name: &str) -> Result<(), GalleryError> {
        let category = name.parse::<Category>()?;
        self.set_category(category);
        Ok(())
    }

    pub fn open_project(&mut self, id: u32) {
        match self.gallery.open_project(id) {
            Ok(project) => {
                let title = project.title.clone();
                self.return_focus = Some(Focus::Card(id));
                self.focus = Some(Focus::Modal(ModalButton::Close));
                self.log(LogEntry::info(format!("Opened \"{}\"", title)));
            }
            Err(e) => self.log(LogEntry::error(format!("Cannot open project: {}", e))),
        }
    }

    pub fn close_modal(&mut self) {
        let was_open = self.gallery.modal().is_open();
        self.gallery.close_modal();
        if was_open || matches!(self.focus, Some(Focus::Modal(_))) {
            self.focus = self
                .return_focus
                .take()
                .filter(|f| self.focus_ring().contains(f));
        }
    }

    pub fn navigate(&mut self, step: Step) {
        match self.gallery.step(step) {
            Ok(Some(project)) => {
                let id = project.id;
                self.return_focus = Some(Focus::Card(id));
            }
            Ok(None) => {}
            Err(e) => self.log(LogEntry::warning(e.to_string())),
        }
    }

    /// Perform the click/Enter action of a target
    pub fn activate(&mut self, target: Focus) {
        match target {
            Focus::HeroViewWork => self.scroll_to_section(SectionId::Projects),
            Focus::HeroAbout => self.scroll_to_section(SectionId::About),
            Focus::Filter(category) => self.set_category(category),
            Focus::Card(id) => self.open_project(id),
            Focus::Modal(ModalButton::Close) => self.close_modal(),
            Focus::Modal(ModalButton::Previous) => self.navigate(Step::Previous),
            Focus::Modal(ModalButton::Next) => self.navigate(Step::Next),
        }
    }

    fn scroll_to_section(&mut self, id: SectionId) {
        if !self.page.smooth_scroll_to(id, self.gallery.scroll_lock()) {
            debug!(section = id.name(), "scroll target unavailable");
        }
    }

    // ============================================
    // Focus
    // ============================================

    /// Focusable targets in tab order. While the modal is open only its
    /// buttons are reachable.
    pub fn focus_ring(&self) -> Vec<Focus> {
        if self.gallery.modal().is_open() {
            return ModalButton::all().iter().map(|b| Focus::Modal(*b)).collect();
        }
        let mut ring = vec![Focus::HeroViewWork];
        if self.page.layout().anchor(SectionId::About).is_some() {
            ring.push(Focus::HeroAbout);
        }
        ring.extend(Category::all().iter().map(|c| Focus::Filter(*c)));
        ring.extend(self.gallery.filtered_view().iter().map(|p| Focus::Card(p.id)));
        ring
    }

    fn move_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        if ring.is_empty() {
            self.focus = None;
            return;
        }
        let len = ring.len();
        let next = match self.focus.and_then(|f| ring.iter().position(|r| *r == f)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        let focus = ring[next];
        self.focus = Some(focus);

        if let Some(rect) = self.hit_map.rect_of(focus) {
            self.page.reveal_rows(rect.y, rect.height, self.gallery.scroll_lock());
        }
    }

    /// Pull stray focus back into the modal while it is open
    fn trap_focus(&mut self) {
        if self.gallery.modal().is_open() && !matches!(self.focus, Some(Focus::Modal(_))) {
            self.focus = Some(Focus::Modal(ModalButton::Close));
        }
    }

    // ============================================
    // Input
    // ============================================

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Handle help overlay
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        if self.gallery.modal().is_open() {
            self.handle_modal_key(key);
        } else {
            self.handle_page_key(key);
        }
        self.trap_focus();
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Right => self.navigate(Step::Next),
            KeyCode::Left => self.navigate(Step::Previous),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(focus) = self.focus {
                    self.activate(focus);
                }
            }
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let lock = self.gallery.scroll_lock();
        let page_rows = self.page.viewport_height().saturating_sub(2).max(1) as i32;
        let scrolled = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                false
            }
            KeyCode::Tab => {
                self.move_focus(true);
                false
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(focus) = self.focus {
                    self.activate(focus);
                }
                false
            }
            KeyCode::Char('j') | KeyCode::Down => self.page.scroll_by(1, lock),
            KeyCode::Char('k') | KeyCode::Up => self.page.scroll_by(-1, lock),
            KeyCode::PageDown => self.page.scroll_by(page_rows, lock),
            KeyCode::PageUp => self.page.scroll_by(-page_rows, lock),
            KeyCode::Char('g') | KeyCode::Home => self.page.scroll_to_top(lock),
            KeyCode::Char('G') | KeyCode::End => self.page.scroll_to_bottom(lock),
            KeyCode::Char('v') => {
                self.activate(Focus::HeroViewWork);
                false
            }
            KeyCode::Char('a') => {
                self.activate(Focus::HeroAbout);
                false
            }
            KeyCode::Char(']') => {
                self.set_category(self.gallery.selected_category().next());
                false
            }
            KeyCode::Char('[') => {
                self.set_category(self.gallery.selected_category().previous());
                false
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(&category) = Category::all().get(index) {
                    self.set_category(category);
                }
                false
            }
            KeyCode::Esc => {
                self.focus = None;
                false
            }
            _ => false,
        };
        if scrolled {
            self.update_timeline();
        }
    }

    /// Handle mouse events
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.show_help = false;
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if self.page.scroll_by(WHEEL_ROWS, self.gallery.scroll_lock()) {
                    self.update_timeline();
                }
            }
            MouseEventKind::ScrollUp => {
                if self.page.scroll_by(-WHEEL_ROWS, self.gallery.scroll_lock()) {
                    self.update_timeline();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
        self.trap_focus();
    }

    /// Dispatch a click at a screen cell
    pub fn click(&mut self, column: u16, row: u16) {
        if self.gallery.modal().is_open() {
            if let Some(button) = self.hit_map.modal_button_at(column, row) {
                self.focus = Some(Focus::Modal(button));
                self.activate(Focus::Modal(button));
            } else if !self.hit_map.inside_modal(column, row) {
                self.close_modal();
            }
            return;
        }

        if let Some(target) = self.hit_map.target_at(column, row) {
            self.focus = Some(target);
            self.activate(target);
        }
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let modal = match self.gallery.selected_project() {
            Some(project) => {
                let position = self
                    .gallery
                    .position_in_view(project.id)
                    .map(|i| format!("{}/{}", i + 1, self.gallery.filtered_len()))
                    .unwrap_or_else(|| "-".to_string());
                format!(" | Viewing {} | Esc: Close | ←/→: Browse", position)
            }
            None => " | Tab: Focus | Enter: Open | [ ]: Filter | v: Work | q: Quit".to_string(),
        };
        format!(
            "{} ({}){} | ?: Help",
            self.gallery.selected_category().label(),
            self.gallery.filtered_len(),
            modal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_education, CatalogKind};

    fn app() -> App {
        let mut app = App::new(AppConfig {
            catalog: Catalog::builtin(CatalogKind::Home),
            education: default_education(),
            show_about: true,
        });
        app.resize(100, 40);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_ring_closed() {
        let app = app();
        let ring = app.focus_ring();
        assert_eq!(ring[0], Focus::HeroViewWork);
        assert_eq!(ring[1], Focus::HeroAbout);
        assert_eq!(ring.len(), 2 + Category::all().len() + 5);
        assert_eq!(ring.last(), Some(&Focus::Card(5)));
    }

    #[test]
    fn test_focus_ring_without_about() {
        let mut app = App::new(AppConfig {
            catalog: Catalog::builtin(CatalogKind::Home),
            education: Vec::new(),
            show_about: false,
        });
        app.resize(100, 40);
        assert!(!app.focus_ring().contains(&Focus::HeroAbout));
        // About button absent: the shortcut is a silent no-op
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.page.is_scrolling());
    }

    #[test]
    fn test_focus_trapped_in_modal() {
        let mut app = app();
        app.open_project(2);
        assert_eq!(app.focus, Some(Focus::Modal(ModalButton::Close)));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Some(Focus::Modal(ModalButton::Previous)));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Some(Focus::Modal(ModalButton::Close)));

        app.focus = Some(Focus::HeroAbout);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.focus, Some(Focus::Modal(ModalButton::Close)));
    }

    #[test]
    fn test_focus_returns_to_last_card() {
        let mut app = app();
        app.focus = Some(Focus::Card(1));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.gallery.selected_project().map(|p| p.id), Some(1));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Some(Focus::Card(2)));
    }

    #[test]
    fn test_enter_on_modal_buttons() {
        let mut app = app();
        app.open_project(1);
        app.focus = Some(Focus::Modal(ModalButton::Next));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.gallery.selected_project().map(|p| p.id), Some(2));
        app.focus = Some(Focus::Modal(ModalButton::Previous));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.gallery.selected_project().map(|p| p.id), Some(1));
        app.focus = Some(Focus::Modal(ModalButton::Close));
        press(&mut app, KeyCode::Enter);
        assert!(!app.gallery.modal().is_open());
    }

    #[test]
    fn test_arrows_ignored_while_closed() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        assert!(!app.gallery.modal().is_open());
        assert_eq!(app.gallery.selected_category(), Category::All);
    }

    #[test]
    fn test_scroll_keys_blocked_by_modal() {
        let mut app = app();
        app.open_project(1);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.page.offset(), 0);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.page.offset(), 1);
    }

    #[test]
    fn test_category_shortcuts() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.gallery.selected_category(), Category::Photography);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.gallery.selected_category(), Category::Videography);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.gallery.selected_category(), Category::DigitalMarketing);
    }

    #[test]
    fn test_filter_moves_focus_off_hidden_card() {
        let mut app = app();
        app.focus = Some(Focus::Card(3));
        app.set_category(Category::Photography);
        assert_eq!(app.focus, Some(Focus::Filter(Category::Photography)));
    }

    #[test]
    fn test_unknown_category_name_is_rejected() {
        let mut app = app();
        let err = app.set_category_name("podcasts").unwrap_err();
        assert_eq!(err, GalleryError::UnknownCategory("podcasts".to_string()));
        assert_eq!(app.gallery.selected_category(), Category::All);
    }

    #[test]
    fn test_view_work_scrolls_to_projects() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        assert!(app.page.is_scrolling());
        for _ in 0..200 {
            app.tick(100, 40);
        }
        let anchor = app.page.layout().anchor(SectionId::Projects).unwrap();
        assert_eq!(app.page.offset(), anchor);
    }

    #[test]
    fn test_resize_recomputes_timeline_line() {
        let mut app = app();
        app.resize(100, 80);
        let tall = app.timeline_state.line_percent().unwrap();
        app.resize(100, 60);
        let short = app.timeline_state.line_percent().unwrap();
        assert!(short < tall, "{short} should be below {tall}");
    }

    #[test]
    fn test_log_levels() {
        let mut app = app();
        assert_eq!(app.logs[0].level, LogLevel::Success);

        app.open_project(42);
        let last = app.logs.last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert!(last.message.contains("42"));
        assert!(!app.gallery.modal().is_open());
    }

    #[test]
    fn test_category_name_routes_through_app() {
        let mut app = app();
        app.set_category_name(" Video Editing ").unwrap();
        assert_eq!(app.gallery.selected_category(), Category::VideoEditing);
        assert_eq!(app.gallery.filtered_len(), 1);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut app = app();
        for i in 0..150 {
            app.log(LogEntry::info(format!("entry {}", i)));
        }
        assert_eq!(app.logs.len(), 100);
        assert_eq!(app.logs.last().map(|e| e.message.as_str()), Some("entry 149"));
    }

    #[test]
    fn test_hit_map_translates_scroll() {
        let map = HitMap {
            document_area: Rect::new(0, 1, 80, 20),
            offset: 10,
            targets: vec![(Rect::new(2, 15, 10, 3), Focus::Card(4))],
            modal_content: None,
            modal_buttons: Vec::new(),
        };
        // Screen row 6 is document row 6 - 1 + 10 = 15
        assert_eq!(map.target_at(3, 6), Some(Focus::Card(4)));
        assert_eq!(map.target_at(3, 5), None);
        assert_eq!(map.target_at(3, 30), None);
    }
}
