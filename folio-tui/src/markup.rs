//! HTML markup for the projects section.
//!
//! Produces the fragment the website injects into its `projects-section`
//! container: filter row, project grid and the modal overlay. All text
//! taken from project data goes through [`escape_html`].

use std::fmt::Write;

use crate::gallery::Gallery;
use crate::models::{Category, Project};

/// Escape `& < > " '` for safe inclusion in HTML text and attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace control characters so project text cannot emit terminal
/// escape sequences. Tabs become spaces, everything else becomes U+FFFD.
pub fn sanitize_terminal(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => '\u{FFFD}',
            c => c,
        })
        .collect()
}

/// One `<button>` per category, the active one marked
pub fn render_filter_buttons(active: Category) -> String {
    let mut out = String::new();
    for &category in Category::all() {
        let class = if category == active {
            "filter-btn active"
        } else {
            "filter-btn"
        };
        let _ = writeln!(
            out,
            r#"<button class="{}" data-category="{}">{}</button>"#,
            class,
            escape_html(category.name()),
            escape_html(&category.label())
        );
    }
    out
}

/// A single project card
pub fn render_card(project: &Project) -> String {
    format!(
        concat!(
            r#"<div class="project-card" data-id="{}">"#,
            "\n",
            r#"  <div class="project-placeholder">"#,
            "\n",
            r#"    <span class="coming-soon">Coming soon...</span>"#,
            "\n",
            "  </div>\n",
            "  <h3>{}</h3>\n",
            r#"  <p class="category">{}</p>"#,
            "\n",
            "</div>\n"
        ),
        project.id,
        escape_html(&project.title),
        escape_html(project.category.name())
    )
}

/// Cards for every project in the filtered view
pub fn render_grid(projects: &[&Project]) -> String {
    projects.iter().map(|p| render_card(p)).collect()
}

/// Modal overlay for an open project
pub fn render_modal(project: &Project) -> String {
    format!(
        concat!(
            r#"<div class="modal-overlay" tabindex="-1">"#,
            "\n",
            r#"  <div class="modal-content">"#,
            "\n",
            r#"    <div class="modal-image"></div>"#,
            "\n",
            "    <h2>{}</h2>\n",
            "    <p>{}</p>\n",
            r#"    <div class="modal-buttons-row">"#,
            "\n",
            r#"      <button class="modal-btn close-btn">Close</button>"#,
            "\n",
            r#"      <div class="modal-btn-group">"#,
            "\n",
            r#"        <button class="modal-btn prev-btn">← Previous</button>"#,
            "\n",
            r#"        <button class="modal-btn next-btn">Next →</button>"#,
            "\n",
            "      </div>\n",
            "    </div>\n",
            "  </div>\n",
            "</div>\n"
        ),
        escape_html(&project.title),
        escape_html(&project.description)
    )
}

/// Full projects section reflecting the gallery's current state. The modal
/// is appended only while one is open.
pub fn render_section(gallery: &Gallery) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"project-section\" id=\"projects\">\n");
    out.push_str("<h2 class=\"section-title\">My Projects</h2>\n");
    out.push_str("<div class=\"filter-buttons\" id=\"filter-buttons\">\n");
    out.push_str(&render_filter_buttons(gallery.selected_category()));
    out.push_str("</div>\n");
    out.push_str("<div class=\"project-grid\" id=\"project-grid\">\n");
    out.push_str(&render_grid(&gallery.filtered_view()));
    out.push_str("</div>\n");
    out.push_str("</section>\n");
    if let Some(project) = gallery.selected_project() {
        out.push_str(&render_modal(project));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Catalog, CatalogKind};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>X</b>"), "&lt;b&gt;X&lt;/b&gt;");
        assert_eq!(escape_html(r#"Tom & "Jerry's""#), "Tom &amp; &quot;Jerry&#39;s&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_sanitize_terminal() {
        assert_eq!(sanitize_terminal("a\tb"), "a b");
        assert_eq!(sanitize_terminal("\u{1b}[31mred"), "\u{FFFD}[31mred");
    }

    #[test]
    fn test_card_escapes_title() {
        let project = Project::new(7, Category::Photography, "<b>X</b>", "d");
        let card = render_card(&project);
        assert!(card.contains("<h3>&lt;b&gt;X&lt;/b&gt;</h3>"));
        assert!(!card.contains("<b>X</b>"));
        assert!(card.contains(r#"data-id="7""#));
    }

    #[test]
    fn test_filter_buttons_mark_active() {
        let html = render_filter_buttons(Category::Photography);
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[2],
            r#"<button class="filter-btn active" data-category="photography">Photography</button>"#
        );
        assert_eq!(lines.iter().filter(|l| l.contains("active")).count(), 1);
    }

    #[test]
    fn test_modal_escapes_description() {
        let project = Project::new(1, Category::Videography, "T", "<script>x</script>");
        let modal = render_modal(&project);
        assert!(modal.contains("<p>&lt;script&gt;x&lt;/script&gt;</p>"));
        assert!(modal.contains("next-btn"));
    }

    #[test]
    fn test_section_follows_state() {
        let mut gallery = Gallery::new(Catalog::builtin(CatalogKind::Home));
        gallery.set_category(Category::DigitalMarketing);
        let html = render_section(&gallery);
        assert_eq!(html.matches("class=\"project-card\"").count(), 2);
        assert!(!html.contains("modal-overlay"));

        gallery.open_project(5).unwrap();
        let html = render_section(&gallery);
        assert!(html.contains("<h2>Ad Design</h2>"));
        assert_eq!(html.matches("modal-overlay").count(), 1);
    }
}
