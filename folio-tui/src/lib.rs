//! Folio - a terminal portfolio with a filterable project gallery.
//!
//! The gallery controller and markup renderer are plain library code; the
//! terminal front end (`app`, `ui`) drives them from a single event loop.

pub mod app;
pub mod error;
pub mod gallery;
pub mod markup;
pub mod models;
pub mod page;
pub mod theme;
pub mod timeline;
pub mod ui;

pub use error::{GalleryError, Result};
pub use gallery::{Gallery, ModalState, ScrollLock, Step};
pub use models::{Catalog, CatalogKind, Category, Project};
