//! Error types for the gallery and catalog.

use thiserror::Error;

/// Errors surfaced by the gallery controller and catalog loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// A category name outside the fixed set
    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),

    /// Next/previous requested while the filtered view is empty
    #[error("no projects match the current filter")]
    EmptySelection,

    /// Project id absent from the catalog
    #[error("project {0} does not exist")]
    ProjectNotFound(u32),

    /// Project exists but is hidden by the active filter
    #[error("project {0} is not part of the current filter")]
    NotInView(u32),

    #[error("duplicate project id {0}")]
    DuplicateProjectId(u32),

    /// "all" is a filter, never a project classification
    #[error("project {0} uses the reserved category \"all\"")]
    ReservedCategory(u32),

    /// Catalog larger than the page can lay out
    #[error("{count} projects exceed the limit of {max}")]
    TooManyProjects { count: usize, max: usize },

    #[error("project {0} has an empty title")]
    EmptyTitle(u32),

    /// Project file could not be parsed
    #[error("invalid project file: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
