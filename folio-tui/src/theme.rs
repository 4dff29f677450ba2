//! Portfolio theme.
//!
//! Dark ink palette with a warm orange accent. Categories and timeline
//! entries get their own accent so they can be told apart at a glance.

use ratatui::style::Color;

use crate::models::Category;

/// Base palette
pub mod colors {
    use super::Color;

    /// Page background
    pub const BG_DARK: Color = Color::Rgb(0x14, 0x15, 0x1A);
    /// Cards, bars and panels
    pub const BG_MEDIUM: Color = Color::Rgb(0x1E, 0x20, 0x27);
    /// Focused card background
    pub const BG_HIGHLIGHT: Color = Color::Rgb(0x2A, 0x2D, 0x37);
    /// Dimmed page behind an open modal
    pub const BG_DIM: Color = Color::Rgb(0x0B, 0x0B, 0x0E);

    pub const FG_PRIMARY: Color = Color::Rgb(0xE4, 0xE1, 0xD8);
    pub const FG_DIM: Color = Color::Rgb(0x8E, 0x8B, 0x82);
    pub const FG_HINT: Color = Color::Rgb(0x5C, 0x5E, 0x66);

    // Category and status accents
    pub const RED: Color = Color::Rgb(0xE0, 0x6C, 0x75);
    pub const GREEN: Color = Color::Rgb(0x98, 0xC3, 0x79);
    pub const YELLOW: Color = Color::Rgb(0xE5, 0xC0, 0x7B);
    pub const ORANGE: Color = Color::Rgb(0xF2, 0x9E, 0x5C);
    pub const BLUE: Color = Color::Rgb(0x6F, 0xB3, 0xD2);
    pub const PURPLE: Color = Color::Rgb(0xB4, 0x8E, 0xD8);
    pub const MAGENTA: Color = Color::Rgb(0xE8, 0x7E, 0xB4);

    pub const BORDER: Color = Color::Rgb(0x8E, 0x8B, 0x82);
    pub const BORDER_DIM: Color = Color::Rgb(0x33, 0x36, 0x40);
    /// Focused element border
    pub const BORDER_ACCENT: Color = Color::Rgb(0xF2, 0x9E, 0x5C);

    /// Placeholder image hatching inside cards
    pub const PLACEHOLDER: Color = Color::Rgb(0x2C, 0x2F, 0x38);
}

/// Accent colors cycled across timeline entries
pub const ACCENT_COLORS: &[Color] = &[
    colors::ORANGE,
    colors::BLUE,
    colors::GREEN,
    colors::PURPLE,
    colors::YELLOW,
    colors::MAGENTA,
];

/// Accent color by index (cycles through available colors)
pub fn get_accent_color(index: usize) -> Color {
    ACCENT_COLORS[index % ACCENT_COLORS.len()]
}

/// Tag color for a category
pub fn category_color(category: Category) -> Color {
    match category {
        Category::All => colors::FG_PRIMARY,
        Category::DigitalMarketing => colors::ORANGE,
        Category::Photography => colors::BLUE,
        Category::Videography => colors::MAGENTA,
        Category::VideoEditing => colors::GREEN,
    }
}

/// Style helpers shared by the widgets
pub mod styles {
    use ratatui::style::{Modifier, Style};

    use super::colors;

    pub fn text() -> Style {
        Style::new().fg(colors::FG_PRIMARY)
    }

    pub fn text_dim() -> Style {
        Style::new().fg(colors::FG_DIM)
    }

    pub fn text_hint() -> Style {
        Style::new().fg(colors::FG_HINT)
    }

    /// Links and key names
    pub fn info() -> Style {
        Style::new().fg(colors::BLUE).add_modifier(Modifier::UNDERLINED)
    }

    pub fn border() -> Style {
        Style::new().fg(colors::BORDER)
    }

    pub fn border_dim() -> Style {
        Style::new().fg(colors::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::new().fg(colors::BORDER_ACCENT)
    }

    pub fn title() -> Style {
        text().add_modifier(Modifier::BOLD)
    }

    /// Section headings
    pub fn title_accent() -> Style {
        Style::new()
            .fg(colors::ORANGE)
            .add_modifier(Modifier::BOLD)
    }

    /// Filter button for the active category
    pub fn filter_active() -> Style {
        Style::new()
            .fg(colors::BG_DARK)
            .bg(colors::ORANGE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn filter_inactive() -> Style {
        Style::new().fg(colors::FG_DIM).bg(colors::BG_MEDIUM)
    }

    pub fn button() -> Style {
        Style::new().fg(colors::FG_PRIMARY).bg(colors::BG_HIGHLIGHT)
    }

    /// Focused button: inverted accent
    pub fn button_focused() -> Style {
        filter_active().add_modifier(Modifier::UNDERLINED)
    }

    /// Page cells behind an open modal
    pub fn modal_bg() -> Style {
        Style::new().fg(colors::FG_HINT).bg(colors::BG_DIM)
    }

    pub fn modal_content_bg() -> Style {
        Style::new().bg(colors::BG_MEDIUM)
    }
}
