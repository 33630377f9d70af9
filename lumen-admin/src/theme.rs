//! Admin panel palette and color helpers.

use lumen_core::InquiryStatus;
use ratatui::style::Color;

use crate::notifications::NotificationLevel;

#[derive(Debug, Clone)]
pub struct AdminTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl AdminTheme {
    /// Warm amber on charcoal, after the site's LED signage.
    pub fn lumen() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 20),
            bg_highlight: Color::Rgb(44, 40, 32),
            primary: Color::Rgb(255, 183, 3),
            primary_dim: Color::Rgb(140, 100, 10),
            accent: Color::Rgb(120, 200, 255),
            success: Color::Rgb(80, 220, 120),
            warning: Color::Rgb(255, 210, 80),
            error: Color::Rgb(255, 85, 85),
            info: Color::Rgb(120, 200, 255),
            text: Color::Rgb(240, 240, 235),
            text_dim: Color::Rgb(140, 140, 135),
            border: Color::Rgb(70, 70, 70),
            border_focus: Color::Rgb(255, 183, 3),
        }
    }
}

impl Default for AdminTheme {
    fn default() -> Self {
        Self::lumen()
    }
}

pub fn inquiry_status_color(status: InquiryStatus, theme: &AdminTheme) -> Color {
    match status {
        InquiryStatus::New => theme.primary,
        InquiryStatus::Contacted => theme.info,
        InquiryStatus::Closed => theme.text_dim,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &AdminTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Success => theme.success,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}

/// Color for a row action style class such as "danger" or "primary".
pub fn action_style_color(style: Option<&str>, theme: &AdminTheme) -> Color {
    match style.map(|s| s.trim().to_ascii_lowercase()) {
        Some(s) if s == "danger" => theme.error,
        Some(s) if s == "primary" => theme.primary,
        Some(s) if s == "success" => theme.success,
        _ => theme.accent,
    }
}
