//! Gallery controller: category filter, modal selection and scroll lock.
//!
//! The controller owns the immutable catalog and derives the filtered view
//! from the active category. Navigation inside the modal always walks the
//! filtered view, never the full catalog.

use tracing::debug;

use crate::error::{GalleryError, Result};
use crate::models::{Catalog, Category, Project};

/// Modal selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    /// Modal showing the project with this id
    Open(u32),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}

/// Page scroll lock, one flag per scroll container (document root and body)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollLock {
    pub root: bool,
    pub body: bool,
}

impl ScrollLock {
    pub fn lock(&mut self) {
        self.root = true;
        self.body = true;
    }

    /// Always clears both flags, whatever their current state
    pub fn release(&mut self) {
        self.root = false;
        self.body = false;
    }

    pub fn is_locked(&self) -> bool {
        self.root || self.body
    }
}

/// Direction of modal navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Filter and modal state for one project catalog
#[derive(Debug, Clone)]
pub struct Gallery {
    catalog: Catalog,
    selected_category: Category,
    /// Indices into the catalog, in declaration order
    filtered: Vec<usize>,
    modal: ModalState,
    scroll_lock: ScrollLock,
}

impl Gallery {
    pub fn new(catalog: Catalog) -> Self {
        let mut gallery = Self {
            catalog,
            selected_category: Category::All,
            filtered: Vec::new(),
            modal: ModalState::Closed,
            scroll_lock: ScrollLock::default(),
        };
        gallery.apply_filter();
        gallery
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn scroll_lock(&self) -> ScrollLock {
        self.scroll_lock
    }

    /// Set the active category and recompute the filtered view
    pub fn set_category(&mut self, category: Category) {
        self.selected_category = category;
        self.apply_filter();
        debug!(category = %category, visible = self.filtered.len(), "filter applied");
    }

    /// Set the active category by name. Unknown names are rejected and
    /// leave the current filter untouched.
    pub fn set_category_name(&mut self, name: &str) -> Result<()> {
        let category = name.parse::<Category>()?;
        self.set_category(category);
        Ok(())
    }

    fn apply_filter(&mut self) {
        let category = self.selected_category;
        self.filtered = self
            .catalog
            .projects()
            .iter()
            .enumerate()
            .filter(|(_, p)| category.matches(p.category))
            .map(|(i, _)| i)
            .collect();
    }

    /// Projects visible under the active filter
    pub fn filtered_view(&self) -> Vec<&Project> {
        let projects = self.catalog.projects();
        self.filtered.iter().map(|&i| &projects[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Project at `position` in the filtered view
    pub fn filtered_at(&self, position: usize) -> Option<&Project> {
        self.filtered
            .get(position)
            .map(|&i| &self.catalog.projects()[i])
    }

    /// Position of a project id in the filtered view
    pub fn position_in_view(&self, id: u32) -> Option<usize> {
        let projects = self.catalog.projects();
        self.filtered.iter().position(|&i| projects[i].id == id)
    }

    /// Currently open project, if any
    pub fn selected_project(&self) -> Option<&Project> {
        match self.modal {
            ModalState::Open(id) => self.catalog.get(id),
            ModalState::Closed => None,
        }
    }

    /// Open the modal on a project of the filtered view. Opening while
    /// another project is shown replaces it.
    pub fn open_project(&mut self, id: u32) -> Result<&Project> {
        if self.catalog.get(id).is_none() {
            return Err(GalleryError::ProjectNotFound(id));
        }
        if self.position_in_view(id).is_none() {
            return Err(GalleryError::NotInView(id));
        }
        self.show(id)
    }

    fn show(&mut self, id: u32) -> Result<&Project> {
        self.modal = ModalState::Open(id);
        self.scroll_lock.lock();
        debug!(project = id, "modal opened");
        self.catalog.get(id).ok_or(GalleryError::ProjectNotFound(id))
    }

    /// Close the modal and release the scroll lock. Safe to repeat.
    pub fn close_modal(&mut self) {
        if let ModalState::Open(id) = self.modal {
            debug!(project = id, "modal closed");
        }
        self.modal = ModalState::Closed;
        self.scroll_lock.release();
    }

    pub fn next_project(&mut self) -> Result<Option<&Project>> {
        self.step(Step::Next)
    }

    pub fn prev_project(&mut self) -> Result<Option<&Project>> {
        self.step(Step::Previous)
    }

    /// Move the modal one project forward or back with wraparound.
    ///
    /// Returns `Ok(None)` while the modal is closed and
    /// [`GalleryError::EmptySelection`] when nothing matches the filter;
    /// neither case changes any state. If the open project was filtered out
    /// after opening, `Next` lands on the first and `Previous` on the last
    /// visible project.
    pub fn step(&mut self, step: Step) -> Result<Option<&Project>> {
        let ModalState::Open(current) = self.modal else {
            return Ok(None);
        };
        let len = self.filtered.len();
        if len == 0 {
            return Err(GalleryError::EmptySelection);
        }

        let target = match (self.position_in_view(current), step) {
            (Some(i), Step::Next) => (i + 1) % len,
            (Some(i), Step::Previous) => (i + len - 1) % len,
            (None, Step::Next) => 0,
            (None, Step::Previous) => len - 1,
        };
        let id = self.catalog.projects()[self.filtered[target]].id;
        self.show(id).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogKind;

    fn home() -> Gallery {
        Gallery::new(Catalog::builtin(CatalogKind::Home))
    }

    fn ids(gallery: &Gallery) -> Vec<u32> {
        gallery.filtered_view().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let gallery = home();
        assert_eq!(gallery.selected_category(), Category::All);
        assert_eq!(gallery.modal(), ModalState::Closed);
        assert!(!gallery.scroll_lock().is_locked());
        assert_eq!(ids(&gallery), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_matches_category_in_order() {
        let mut gallery = Gallery::new(Catalog::builtin(CatalogKind::Showcase));
        for &category in Category::all() {
            gallery.set_category(category);
            let expected: Vec<u32> = gallery
                .catalog()
                .projects()
                .iter()
                .filter(|p| category == Category::All || p.category == category)
                .map(|p| p.id)
                .collect();
            assert_eq!(ids(&gallery), expected, "category {category}");
        }

        gallery.set_category(Category::DigitalMarketing);
        assert_eq!(ids(&gallery), vec![1, 5, 6, 7]);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut gallery = home();
        gallery.set_category(Category::Photography);
        let err = gallery.set_category_name("podcasts").unwrap_err();
        assert_eq!(err, GalleryError::UnknownCategory("podcasts".to_string()));
        assert_eq!(gallery.selected_category(), Category::Photography);
        assert_eq!(ids(&gallery), vec![2]);
    }

    #[test]
    fn test_open_locks_scroll() {
        let mut gallery = home();
        let project = gallery.open_project(3).unwrap();
        assert_eq!(project.title, "Promo Video");
        assert_eq!(gallery.modal(), ModalState::Open(3));
        assert_eq!(gallery.scroll_lock(), ScrollLock { root: true, body: true });
    }

    #[test]
    fn test_open_rejects_missing_and_hidden() {
        let mut gallery = home();
        assert_eq!(gallery.open_project(42).unwrap_err(), GalleryError::ProjectNotFound(42));

        gallery.set_category(Category::Photography);
        assert_eq!(gallery.open_project(1).unwrap_err(), GalleryError::NotInView(1));
        assert_eq!(gallery.modal(), ModalState::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut gallery = home();
        gallery.open_project(1).unwrap();
        gallery.close_modal();
        let once = (gallery.modal(), gallery.scroll_lock());
        gallery.close_modal();
        assert_eq!((gallery.modal(), gallery.scroll_lock()), once);
        assert_eq!(once, (ModalState::Closed, ScrollLock::default()));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut gallery = home();
        gallery.open_project(5).unwrap();
        assert_eq!(gallery.next_project().unwrap().map(|p| p.id), Some(1));
        assert_eq!(gallery.prev_project().unwrap().map(|p| p.id), Some(5));
        assert_eq!(gallery.prev_project().unwrap().map(|p| p.id), Some(4));
    }

    #[test]
    fn test_navigation_closed_is_noop() {
        let mut gallery = home();
        assert_eq!(gallery.next_project(), Ok(None));
        assert_eq!(gallery.prev_project(), Ok(None));
        assert_eq!(gallery.modal(), ModalState::Closed);
    }

    #[test]
    fn test_navigation_single_item() {
        let mut gallery = home();
        gallery.set_category(Category::Videography);
        gallery.open_project(3).unwrap();
        assert_eq!(gallery.next_project().unwrap().map(|p| p.id), Some(3));
        assert_eq!(gallery.prev_project().unwrap().map(|p| p.id), Some(3));
    }

    #[test]
    fn test_navigation_empty_view() {
        let catalog = Catalog::new(vec![Project::new(1, Category::Photography, "Only", "")]).unwrap();
        let mut gallery = Gallery::new(catalog);
        gallery.open_project(1).unwrap();
        gallery.set_category(Category::Videography);

        assert_eq!(gallery.next_project(), Err(GalleryError::EmptySelection));
        assert_eq!(gallery.prev_project(), Err(GalleryError::EmptySelection));
        assert_eq!(gallery.modal(), ModalState::Open(1));
    }

    #[test]
    fn test_navigation_after_filter_change() {
        let mut gallery = home();
        gallery.open_project(2).unwrap();
        gallery.set_category(Category::DigitalMarketing);
        assert_eq!(gallery.next_project().unwrap().map(|p| p.id), Some(1));

        gallery.open_project(1).unwrap();
        gallery.set_category(Category::VideoEditing);
        assert_eq!(gallery.prev_project().unwrap().map(|p| p.id), Some(4));
    }
}
