//! # Theme Configuration
//!
//! Centralized colors for the bank usage client. Widgets read these constants
//! instead of hard-coding colors so the palette stays consistent.

use eframe::egui::{self, Color32};

use crate::ui::mappers::Direction;

#[derive(Debug, Clone)]
pub struct Theme {
    pub layout: LayoutColors,
    pub typography: TypographyColors,
    pub money: MoneyColors,
    pub table: TableColors,
}

/// Backgrounds and containers
#[derive(Debug, Clone)]
pub struct LayoutColors {
    pub background: Color32,
    pub header_background: Color32,
    pub card_background: Color32,
    pub card_border: Color32,
    /// Primary action buttons ("+ Add Transaction", "Sign in")
    pub accent: Color32,
}

#[derive(Debug, Clone)]
pub struct TypographyColors {
    pub primary: Color32,
    pub secondary: Color32,
    pub error: Color32,
    pub white: Color32,
}

/// Income/expense coding for amounts and cards
#[derive(Debug, Clone)]
pub struct MoneyColors {
    pub income: Color32,
    pub expense: Color32,
    pub income_background: Color32,
    pub expense_background: Color32,
}

#[derive(Debug, Clone)]
pub struct TableColors {
    pub header: Color32,
    pub row_even: Color32,
    pub row_odd: Color32,
}

pub const CURRENT_THEME: Theme = Theme {
    layout: LayoutColors {
        background: Color32::from_rgb(244, 246, 250),
        header_background: Color32::WHITE,
        card_background: Color32::WHITE,
        card_border: Color32::from_rgb(225, 228, 235),
        accent: Color32::from_rgb(52, 101, 214),
    },
    typography: TypographyColors {
        primary: Color32::from_rgb(40, 44, 52),
        secondary: Color32::from_rgb(110, 116, 128),
        error: Color32::from_rgb(200, 45, 45),
        white: Color32::WHITE,
    },
    money: MoneyColors {
        income: Color32::from_rgb(30, 140, 70),
        expense: Color32::from_rgb(200, 45, 45),
        income_background: Color32::from_rgb(232, 246, 237),
        expense_background: Color32::from_rgb(252, 235, 235),
    },
    table: TableColors {
        header: Color32::from_rgb(236, 239, 245),
        row_even: Color32::WHITE,
        row_odd: Color32::from_rgb(249, 250, 252),
    },
};

impl Theme {
    pub fn amount_color(&self, direction: Direction) -> Color32 {
        match direction {
            Direction::Income => self.money.income,
            Direction::Expense => self.money.expense,
        }
    }
}

/// Convenience constants for the most commonly used colors
pub mod colors {
    use super::CURRENT_THEME;
    use eframe::egui::Color32;

    pub const ACCENT: Color32 = CURRENT_THEME.layout.accent;
    pub const TEXT_PRIMARY: Color32 = CURRENT_THEME.typography.primary;
    pub const TEXT_SECONDARY: Color32 = CURRENT_THEME.typography.secondary;
    pub const TEXT_ERROR: Color32 = CURRENT_THEME.typography.error;
    pub const TEXT_WHITE: Color32 = CURRENT_THEME.typography.white;
    pub const CARD_BACKGROUND: Color32 = CURRENT_THEME.layout.card_background;
    pub const CARD_BORDER: Color32 = CURRENT_THEME.layout.card_border;
}

/// Parse a CSS-style hex color, leading '#' optional. Category colors come from user data.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.trim().trim_start_matches('#');
    // from_hex slices by byte offset
    if !digits.is_ascii() {
        return None;
    }
    Color32::from_hex(&format!("#{}", digits)).ok()
}

/// Category badge color, grey when the stored value is unusable
pub fn category_color(hex: &str) -> Color32 {
    parse_hex_color(hex).unwrap_or(Color32::from_rgb(0x88, 0x88, 0x88))
}

/// Global visuals, applied once at startup
pub fn setup_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = CURRENT_THEME.layout.background;
    style.visuals.window_fill = CURRENT_THEME.layout.card_background;
    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, colors::CARD_BORDER);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    ctx.set_style(style);
}
