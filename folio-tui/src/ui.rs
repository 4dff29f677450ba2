//! UI rendering module.
//!
//! The page is drawn into an off-screen buffer as tall as the whole
//! document, then the rows under the scroll offset are copied to the
//! terminal. Overlays (modal, help) are drawn on top in screen space.
//! Rendering records every clickable region in a [`HitMap`].

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, Focus, HitMap, LogLevel, ModalButton};
use crate::markup::sanitize_terminal;
use crate::models::Project;
use crate::page::{
    filter_buttons, grid_columns, screen_regions, SectionId, CARD_HEIGHT, CARD_WIDTH,
};
use crate::theme::{category_color, colors, styles};
use crate::timeline::TimelineWidget;

const HERO_TITLE: &str = "Creative Portfolio";
const HERO_TAGLINE: &str = "Digital marketing · Photography · Videography · Video editing";
const VIEW_WORK_LABEL: &str = " View my work ";
const ABOUT_LABEL: &str = " About me ";

const ABOUT_TEXT: &str = "I help brands tell their story through campaigns, \
    photography and film. From the first concept to the final grade, every \
    project is planned around the audience it needs to reach.";

const FOOTER_LINKS: &[(&str, &str)] = &[
    ("Home", "index.html"),
    ("Projects", "myprojects.html"),
    ("Work with me", "book-a-call.html"),
];

/// Render the entire UI and return the clickable regions
pub fn render(frame: &mut Frame, app: &App) -> HitMap {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let regions = screen_regions(area);

    render_status(frame, app, regions.status);
    let mut hit_map = render_document(frame, app, regions.document);
    render_logs(frame, app, regions.log);

    // Render overlays
    if let Some(project) = app.gallery.selected_project() {
        render_modal(frame, app, project, area, &mut hit_map);
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }

    hit_map
}

/// Render the status bar
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Folio ", styles::filter_active()),
        Span::styled(format!(" {}", app.status_text()), styles::text_dim()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors::BG_MEDIUM)),
        area,
    );
}

/// Draw every section off-screen and copy the visible window
fn render_document(frame: &mut Frame, app: &App, area: Rect) -> HitMap {
    let layout = app.page.layout();
    let mut doc = Buffer::empty(Rect::new(0, 0, area.width, layout.total_height().max(1)));
    let clip = doc.area;
    let mut targets = Vec::new();

    for slot in layout.slots() {
        let rect = Rect::new(0, slot.top, area.width, slot.height).intersection(clip);
        if rect.is_empty() {
            continue;
        }
        match slot.id {
            SectionId::Hero => render_hero(&mut doc, rect, app, &mut targets),
            SectionId::About => render_about(&mut doc, rect),
            SectionId::Projects => render_projects(&mut doc, rect, app, &mut targets),
            SectionId::Education => {
                TimelineWidget::new(&app.education, &app.timeline_state).render(rect, &mut doc)
            }
            SectionId::Footer => render_footer(&mut doc, rect),
        }
    }

    let offset = app.page.offset();
    let buf = frame.buffer_mut();
    for y in 0..area.height {
        let doc_y = offset + y;
        if doc_y >= clip.height {
            break;
        }
        for x in 0..area.width {
            buf[(area.x + x, area.y + y)] = doc[(x, doc_y)].clone();
        }
    }

    HitMap {
        document_area: area,
        offset,
        targets,
        modal_content: None,
        modal_buttons: Vec::new(),
    }
}

/// Style for a clickable label depending on focus
fn button_style(app: &App, focus: Focus) -> Style {
    if app.focus == Some(focus) {
        styles::button_focused()
    } else {
        styles::button()
    }
}

fn render_hero(buf: &mut Buffer, area: Rect, app: &App, targets: &mut Vec<(Rect, Focus)>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_dim());
    block.render(area, buf);

    let center = |text: &str| area.x + area.width.saturating_sub(text.chars().count() as u16) / 2;

    let y = area.y + 3;
    buf.set_string(
        center(HERO_TITLE),
        y,
        HERO_TITLE,
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD),
    );
    buf.set_string(center(HERO_TAGLINE), y + 1, HERO_TAGLINE, styles::text_dim());

    let mut buttons = vec![(VIEW_WORK_LABEL, Focus::HeroViewWork)];
    if app.page.layout().anchor(SectionId::About).is_some() {
        buttons.push((ABOUT_LABEL, Focus::HeroAbout));
    }
    let total: u16 = buttons
        .iter()
        .map(|(label, _)| label.chars().count() as u16 + 2)
        .sum();
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let y = y + 3;
    for (label, focus) in buttons {
        let width = label.chars().count() as u16;
        buf.set_string(x, y, label, button_style(app, focus));
        targets.push((Rect::new(x, y, width, 1), focus));
        x += width + 2;
    }
}

fn render_about(buf: &mut Buffer, area: Rect) {
    let text = vec![
        Line::from(Span::styled("About Me", styles::title_accent())),
        Line::from(""),
        Line::from(Span::styled(ABOUT_TEXT, styles::text())),
    ];
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .render(inner_margin(area, 1), buf);
}

fn render_projects(buf: &mut Buffer, area: Rect, app: &App, targets: &mut Vec<(Rect, Focus)>) {
    buf.set_string(area.x + 1, area.y, "My Projects", styles::title_accent());

    // Filter buttons, re-rendered in full every frame
    for button in filter_buttons(area.width) {
        let x = area.x + button.x;
        let y = area.y + 2 + button.row;
        if y >= area.bottom() {
            break;
        }
        let focus = Focus::Filter(button.category);
        let mut style = if button.category == app.gallery.selected_category() {
            styles::filter_active()
        } else {
            styles::filter_inactive()
        };
        if app.focus == Some(focus) {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        buf.set_string(x, y, format!(" {} ", button.category.label()), style);
        targets.push((Rect::new(x, y, button.width, 1).intersection(area), focus));
    }

    let Some(grid_top) = app.page.layout().grid_top() else {
        return;
    };
    let projects = app.gallery.filtered_view();
    if projects.is_empty() {
        render_empty_state(buf, Rect::new(area.x, grid_top, area.width, 1), "No projects in this category");
        return;
    }

    let columns = grid_columns(area.width) as usize;
    for (index, project) in projects.iter().enumerate() {
        let col = (index % columns) as u16;
        let Some(y) = u16::try_from(index / columns)
            .ok()
            .and_then(|row| row.checked_mul(CARD_HEIGHT))
            .and_then(|offset| grid_top.checked_add(offset))
        else {
            break;
        };
        let card = Rect::new(
            area.x + 1 + col * CARD_WIDTH,
            y,
            CARD_WIDTH - 2,
            CARD_HEIGHT - 1,
        );
        if card.bottom() > area.bottom() || card.right() > area.right() {
            continue;
        }
        let focus = Focus::Card(project.id);
        render_card(buf, card, project, app.focus == Some(focus));
        targets.push((card, focus));
    }
}

/// Render one project card: placeholder image, title, category
fn render_card(buf: &mut Buffer, area: Rect, project: &Project, focused: bool) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            styles::border_focused()
        } else {
            styles::border_dim()
        })
        .style(Style::default().bg(if focused {
            colors::BG_HIGHLIGHT
        } else {
            colors::BG_MEDIUM
        }));
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.height < 4 {
        return;
    }

    let hatch = "░".repeat(inner.width as usize);
    let placeholder = Style::default().fg(colors::PLACEHOLDER);
    buf.set_string(inner.x, inner.y, &hatch, placeholder);
    buf.set_string(inner.x, inner.y + 1, &hatch, placeholder);
    let soon = "Coming soon...";
    let soon_x = inner.x + inner.width.saturating_sub(soon.len() as u16) / 2;
    buf.set_string(soon_x, inner.y + 1, soon, styles::text_hint());

    let title = sanitize_terminal(&project.title);
    buf.set_stringn(
        inner.x,
        inner.y + 2,
        &title,
        inner.width as usize,
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD),
    );
    buf.set_stringn(
        inner.x,
        inner.y + 3,
        project.category.name(),
        inner.width as usize,
        Style::default().fg(category_color(project.category)),
    );
}

fn render_footer(buf: &mut Buffer, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::border_dim());
    let inner = block.inner(area);
    block.render(area, buf);

    let mut spans = Vec::new();
    for (i, (label, target)) in FOOTER_LINKS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", styles::border_dim()));
        }
        spans.push(Span::styled(*label, styles::info()));
        spans.push(Span::styled(format!(" ({})", target), styles::text_hint()));
    }
    let text = vec![
        Line::from(spans),
        Line::from(""),
        Line::from(Span::styled("Thanks for scrolling all the way down.", styles::text_dim())),
    ];
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

/// Render empty state message
fn render_empty_state(buf: &mut Buffer, area: Rect, message: &str) {
    Paragraph::new(message)
        .style(styles::text_dim())
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Render the project modal over a dimmed page
fn render_modal(frame: &mut Frame, app: &App, project: &Project, area: Rect, hit_map: &mut HitMap) {
    // Dim everything behind the overlay
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_style(styles::modal_bg());
        }
    }

    let popup_width = 64.min(area.width.saturating_sub(4));
    let popup_height = 15.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);
    frame.render_widget(Clear, popup_area);

    let position = app
        .gallery
        .position_in_view(project.id)
        .map(|i| format!(" {}/{} ", i + 1, app.gallery.filtered_len()))
        .unwrap_or_default();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", project.category.label()),
            Style::default().fg(category_color(project.category)),
        ))
        .title_bottom(Line::from(Span::styled(position, styles::text_hint())).right_aligned())
        .border_style(styles::border_focused())
        .style(styles::modal_content_bg());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    hit_map.modal_content = Some(popup_area);

    if inner.height < 6 || inner.width < 20 {
        return;
    }

    let content = inner_margin(inner, 1);
    let buf = frame.buffer_mut();
    let hatch = "░".repeat(content.width as usize);
    for row in 0..3 {
        buf.set_string(content.x, content.y + row, &hatch, Style::default().fg(colors::PLACEHOLDER));
    }

    let text = vec![
        Line::from(Span::styled(
            sanitize_terminal(&project.title),
            Style::default()
                .fg(colors::FG_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(sanitize_terminal(&project.description), styles::text())),
    ];
    let label = |b: ModalButton| format!("[ {} ]", b.label());
    let widths: Vec<u16> = ModalButton::all()
        .iter()
        .map(|b| label(*b).chars().count() as u16)
        .collect();
    let bottom = inner.bottom().saturating_sub(1);
    let one_row = widths.iter().sum::<u16>() + 2 <= content.width;

    // Close on the left, Previous/Next on the right; one per row when the
    // box is too narrow for that
    let positions: [(u16, u16); 3] = if one_row {
        [
            (content.x, bottom),
            (content.right().saturating_sub(widths[1] + widths[2] + 1), bottom),
            (content.right().saturating_sub(widths[2]), bottom),
        ]
    } else {
        [
            (content.x, bottom.saturating_sub(2)),
            (content.x, bottom.saturating_sub(1)),
            (content.x, bottom),
        ]
    };
    let button_rows = if one_row { 1 } else { 3 };

    let text_area = Rect::new(
        content.x,
        content.y + 4,
        content.width,
        content.height.saturating_sub(4 + button_rows),
    );
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), text_area);

    let buf = frame.buffer_mut();
    for ((button, (x, y)), width) in ModalButton::all().iter().zip(positions).zip(widths) {
        let style = button_style(app, Focus::Modal(*button));
        buf.set_stringn(x, y, label(*button), content.width as usize, style);
        let rect = Rect::new(x, y, width.min(content.width), 1);
        hit_map.modal_buttons.push((rect, *button));
    }
}

/// Render the activity log, newest first
fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let rows = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(rows)
        .map(|entry| {
            let (marker, color) = match entry.level {
                LogLevel::Info => ("·", colors::BLUE),
                LogLevel::Success => ("✓", colors::GREEN),
                LogLevel::Warning => ("!", colors::YELLOW),
                LogLevel::Error => ("✗", colors::RED),
            };
            let age = entry.timestamp.elapsed().as_secs();

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4}s ", age), styles::text_hint()),
                Span::styled(format!("{} ", marker), Style::new().fg(color)),
                Span::styled(entry.message.as_str(), styles::text_dim()),
            ]))
        })
        .collect();

    let panel = Block::bordered()
        .title(Span::styled(" Activity ", styles::text_dim()))
        .border_style(styles::border_dim())
        .style(Style::new().bg(colors::BG_DARK));

    frame.render_widget(List::new(items).block(panel), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(54, 22, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(colors::BLUE)),
            Span::raw(what),
        ])
    };
    let heading = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(colors::PURPLE)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        heading("Page"),
        key("j/k ↑/↓", "Scroll"),
        key("PgUp/PgDn", "Scroll a screen"),
        key("g/G", "Top / bottom"),
        key("v", "View my work"),
        key("a", "About me"),
        key("Tab/S-Tab", "Move focus"),
        key("Enter/Space", "Activate focused item"),
        Line::from(""),
        heading("Projects"),
        key("[ ]", "Previous / next category"),
        key("1-5", "Pick a category"),
        key("Click", "Filter or open a card"),
        Line::from(""),
        heading("Project viewer"),
        key("←/→", "Previous / next project"),
        key("Esc", "Close (or click outside)"),
        Line::from(""),
        key("q/Ctrl+C", "Quit"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .style(styles::text());

    frame.render_widget(paragraph, popup_area);
}

/// Helper to create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn inner_margin(area: Rect, margin: u16) -> Rect {
    Rect::new(
        area.x + margin,
        area.y,
        area.width.saturating_sub(margin * 2),
        area.height,
    )
}
