//! Domain models for the portfolio.
//!
//! Projects and categories are immutable once a catalog is loaded.
//! Categories serialize to the lowercase names used by the website
//! ("digital marketing", "video editing", ...).

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Project category. `All` is the synthetic filter value that matches
/// every project and is never attached to a project itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    #[default]
    All,
    DigitalMarketing,
    Photography,
    Videography,
    VideoEditing,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::All,
            Category::DigitalMarketing,
            Category::Photography,
            Category::Videography,
            Category::VideoEditing,
        ]
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::DigitalMarketing => "digital marketing",
            Category::Photography => "photography",
            Category::Videography => "videography",
            Category::VideoEditing => "video editing",
        }
    }

    /// Button label: the name with its first character upper-cased
    pub fn label(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether a project of category `other` passes this filter
    pub fn matches(&self, other: Category) -> bool {
        *self == Category::All || *self == other
    }

    /// Cycle to the next category
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Cycle to the previous category
    pub fn previous(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl FromStr for Category {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GalleryError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = GalleryError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub category: Category,
    pub title: String,
    pub description: String,
}

impl Project {
    pub fn new(id: u32, category: Category, title: &str, description: &str) -> Self {
        Self {
            id,
            category,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

// ============================================
// Catalogs
// ============================================

const PLACEHOLDER_TITLE: &str = "Coming Soon Project";
const PLACEHOLDER_DESCRIPTION: &str = "This is a temporary placeholder for an upcoming project.";

/// Built-in project lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CatalogKind {
    /// Landing page selection (5 projects)
    #[default]
    Home,
    /// Full projects page including upcoming placeholders (9 projects)
    Showcase,
}

/// On-disk layout of a project file
#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Largest catalog accepted. One card column at this size still fits in
/// the document height.
pub const MAX_PROJECTS: usize = 5_000;

/// A validated, ordered list of projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Validate and wrap a project list. Declaration order is kept.
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        if projects.len() > MAX_PROJECTS {
            return Err(GalleryError::TooManyProjects {
                count: projects.len(),
                max: MAX_PROJECTS,
            });
        }
        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id) {
                return Err(GalleryError::DuplicateProjectId(project.id));
            }
            if project.category == Category::All {
                return Err(GalleryError::ReservedCategory(project.id));
            }
            if project.title.trim().is_empty() {
                return Err(GalleryError::EmptyTitle(project.id));
            }
        }
        Ok(Self { projects })
    }

    /// One of the built-in catalogs
    pub fn builtin(kind: CatalogKind) -> Self {
        let mut projects = vec![
            Project::new(
                1,
                Category::DigitalMarketing,
                "Marketing Campaign 1",
                "A digital marketing campaign focused on social media engagement.",
            ),
            Project::new(
                2,
                Category::Photography,
                "Portrait Shoot",
                "A professional portrait session using natural lighting techniques.",
            ),
            Project::new(
                3,
                Category::Videography,
                "Promo Video",
                "A short promotional video crafted for a product launch.",
            ),
            Project::new(
                4,
                Category::VideoEditing,
                "Short Film Edit",
                "A cinematic short film editing project focusing on color grading and pacing.",
            ),
            Project::new(
                5,
                Category::DigitalMarketing,
                "Ad Design",
                "A digital ad series created for an online campaign.",
            ),
        ];

        if kind == CatalogKind::Showcase {
            let upcoming = [
                (6, Category::DigitalMarketing),
                (7, Category::DigitalMarketing),
                (8, Category::Photography),
                (9, Category::VideoEditing),
            ];
            projects.extend(upcoming.into_iter().map(|(id, category)| {
                Project::new(id, category, PLACEHOLDER_TITLE, PLACEHOLDER_DESCRIPTION)
            }));
        }

        Self { projects }
    }

    /// Parse a TOML document with `[[projects]]` tables
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ProjectFile =
            toml::from_str(source).map_err(|e| GalleryError::Parse(e.to_string()))?;
        Self::new(file.projects)
    }

    /// Load a TOML project file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| GalleryError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

// ============================================
// Education
// ============================================

/// One entry of the education timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationEntry {
    pub title: String,
    pub institution: String,
    pub start: NaiveDate,
    /// `None` while still in progress
    pub end: Option<NaiveDate>,
    pub summary: String,
}

impl EducationEntry {
    /// Period label such as "Sep 2019 - Jun 2022" or "Sep 2023 - Present"
    pub fn period(&self) -> String {
        let end = self
            .end
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| "Present".to_string());
        format!("{} - {}", self.start.format("%b %Y"), end)
    }
}

/// Default education history shown on the page
pub fn default_education() -> Vec<EducationEntry> {
    let date = |y: i32, m: u32| NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default();
    vec![
        EducationEntry {
            title: "Diploma in Media Production".to_string(),
            institution: "City College of Arts".to_string(),
            start: date(2016, 9),
            end: Some(date(2018, 6)),
            summary: "Camera work, lighting and studio production fundamentals.".to_string(),
        },
        EducationEntry {
            title: "BA Digital Media".to_string(),
            institution: "Metropolitan University".to_string(),
            start: date(2018, 9),
            end: Some(date(2021, 6)),
            summary: "Video editing, motion graphics and visual storytelling.".to_string(),
        },
        EducationEntry {
            title: "Certificate in Digital Marketing".to_string(),
            institution: "Online Marketing Institute".to_string(),
            start: date(2022, 1),
            end: Some(date(2022, 7)),
            summary: "Paid social, analytics and campaign planning.".to_string(),
        },
        EducationEntry {
            title: "Advanced Colour Grading".to_string(),
            institution: "Post Production Academy".to_string(),
            start: date(2024, 2),
            end: None,
            summary: "Grading workflows for film and commercial work.".to_string(),
        },
    ]
}
