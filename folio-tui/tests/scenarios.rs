//! End-to-end scenarios driving the app the way the event loop does.

use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};

use folio_tui::app::{App, AppConfig, Focus, HitMap, ModalButton};
use folio_tui::markup;
use folio_tui::models::{default_education, MAX_PROJECTS};
use folio_tui::{Catalog, CatalogKind, Category, Gallery, GalleryError, ModalState};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 40;

fn app_with(catalog: Catalog) -> App {
    let mut app = App::new(AppConfig {
        catalog,
        education: default_education(),
        show_about: true,
    });
    app.resize(WIDTH, HEIGHT);
    app
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) {
    let mut hits = HitMap::default();
    terminal
        .draw(|frame| hits = folio_tui::ui::render(frame, app))
        .unwrap();
    app.hit_map = hits;
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn click(app: &mut App, column: u16, row: u16) {
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    });
}

/// Screen cell in the middle of a page target
fn screen_point(app: &App, focus: Focus) -> (u16, u16) {
    let rect = app.hit_map.rect_of(focus).unwrap();
    let area = app.hit_map.document_area;
    (
        area.x + rect.x + rect.width / 2,
        area.y + rect.y + rect.height / 2 - app.hit_map.offset,
    )
}

fn selected_id(app: &App) -> Option<u32> {
    app.gallery.selected_project().map(|p| p.id)
}

#[test]
fn test_photography_single_project_scenario() {
    let mut app = app_with(Catalog::builtin(CatalogKind::Home));
    assert_eq!(app.gallery.filtered_len(), 5);

    app.set_category_name("photography").unwrap();
    let ids: Vec<u32> = app.gallery.filtered_view().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);

    app.open_project(2);
    assert!(app.gallery.scroll_lock().is_locked());
    press(&mut app, KeyCode::Right);
    assert_eq!(selected_id(&app), Some(2));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.gallery.modal(), ModalState::Closed);
    assert!(!app.gallery.scroll_lock().is_locked());
}

#[test]
fn test_next_wraps_through_all_projects() {
    let mut app = app_with(Catalog::builtin(CatalogKind::Home));
    app.open_project(1);
    let mut seen = Vec::new();
    for _ in 0..5 {
        press(&mut app, KeyCode::Right);
        seen.push(selected_id(&app).unwrap());
    }
    assert_eq!(seen, vec![2, 3, 4, 5, 1]);

    press(&mut app, KeyCode::Left);
    assert_eq!(selected_id(&app), Some(5));
}

#[test]
fn test_close_is_idempotent() {
    let mut gallery = Gallery::new(Catalog::builtin(CatalogKind::Home));
    gallery.open_project(3).unwrap();
    gallery.close_modal();
    let once = (gallery.modal(), gallery.scroll_lock());
    gallery.close_modal();
    assert_eq!((gallery.modal(), gallery.scroll_lock()), once);
}

#[test]
fn test_empty_filter_navigation_is_an_error() {
    let catalog = Catalog::new(vec![folio_tui::Project::new(
        1,
        Category::Photography,
        "Only Shot",
        "",
    )])
    .unwrap();
    let mut gallery = Gallery::new(catalog);
    gallery.open_project(1).unwrap();
    gallery.set_category(Category::Videography);
    assert_eq!(gallery.next_project().unwrap_err(), GalleryError::EmptySelection);
    assert_eq!(gallery.modal(), ModalState::Open(1));
}

#[test]
fn test_clicks_drive_the_gallery() {
    let mut app = app_with(Catalog::builtin(CatalogKind::Home));
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    draw(&mut terminal, &mut app);

    // Filter button
    let (x, y) = screen_point(&app, Focus::Filter(Category::DigitalMarketing));
    click(&mut app, x, y);
    assert_eq!(app.gallery.selected_category(), Category::DigitalMarketing);
    draw(&mut terminal, &mut app);

    // Card opens the modal
    let (x, y) = screen_point(&app, Focus::Card(5));
    click(&mut app, x, y);
    assert_eq!(selected_id(&app), Some(5));
    draw(&mut terminal, &mut app);

    // Next button wraps within the filtered view
    let next = app
        .hit_map
        .modal_buttons
        .iter()
        .find(|(_, b)| *b == ModalButton::Next)
        .map(|(rect, _)| *rect)
        .unwrap();
    click(&mut app, next.x, next.y);
    assert_eq!(selected_id(&app), Some(1));

    // Clicks inside the content box keep it open
    let content = app.hit_map.modal_content.unwrap();
    click(&mut app, content.x + 2, content.y + 2);
    assert!(app.gallery.modal().is_open());

    // Clicking the overlay outside the box closes it
    click(&mut app, 0, 0);
    assert!(!app.gallery.modal().is_open());
    assert_eq!(app.focus, Some(Focus::Card(1)));
}

#[test]
fn test_wheel_is_ignored_while_modal_open() {
    let mut app = app_with(Catalog::builtin(CatalogKind::Showcase));
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 10,
        row: 10,
        modifiers: KeyModifiers::NONE,
    };
    app.open_project(7);
    app.handle_mouse(wheel);
    assert_eq!(app.page.offset(), 0);

    press(&mut app, KeyCode::Esc);
    app.handle_mouse(wheel);
    assert_eq!(app.page.offset(), 3);
}

#[test]
fn test_export_escapes_catalog_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[projects]]
id = 10
category = "photography"
title = "<b>X</b>"
description = "Tom & Jerry"

[[projects]]
id = 11
category = "video editing"
title = "Cut"
description = "Fast"
"#
    )
    .unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);

    let mut gallery = Gallery::new(catalog);
    gallery.set_category_name("Photography").unwrap();
    gallery.open_project(10).unwrap();
    let html = markup::render_section(&gallery);

    assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"));
    assert!(html.contains("Tom &amp; Jerry"));
    assert!(!html.contains("<b>X</b>"));
    assert!(!html.contains("data-id=\"11\""));
    assert!(html.contains("class=\"modal-overlay\""));
}

#[test]
fn test_invalid_project_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[[projects]]\nid = 1\ncategory = \"all\"\ntitle = \"A\"\ndescription = \"\""
    )
    .unwrap();
    assert_eq!(
        Catalog::load(file.path()).unwrap_err(),
        GalleryError::ReservedCategory(1)
    );
}

#[test]
fn test_oversized_catalog_is_rejected() {
    let projects = |n: u32| -> Vec<folio_tui::Project> {
        (1..=n)
            .map(|id| folio_tui::Project::new(id, Category::Photography, "Frame", ""))
            .collect()
    };
    assert!(matches!(
        Catalog::new(projects(10_000)),
        Err(GalleryError::TooManyProjects { count: 10_000, .. })
    ));

    // The largest accepted catalog still lays out in a single column
    let mut app = app_with(Catalog::new(projects(MAX_PROJECTS as u32)).unwrap());
    app.resize(40, 40);
    let layout = app.page.layout();
    let grid_top = layout.grid_top().unwrap();
    assert!(layout.total_height() > grid_top);
    assert!(layout.total_height() < u16::MAX);
}
