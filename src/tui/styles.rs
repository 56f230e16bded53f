//! AgeWell color palette and preset styles.
//!
//! Blue headline accent on a dark slate background; green and rose carry
//! the low/high risk meaning everywhere a label is shown.

use ratatui::style::{Color, Modifier, Style};

use crate::application::NoticeLevel;
use crate::domain::RiskLabel;

/// Application theme.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Accent ===

    /// AgeWell blue (#0B6AFF)
    pub const PRIMARY: Color = Color::Rgb(11, 106, 255);

    /// Lighter blue for focus and key hints
    pub const PRIMARY_LIGHT: Color = Color::Rgb(96, 165, 250); // #60A5FA

    /// Darker blue for the header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(29, 78, 216); // #1D4ED8

    /// Border gray
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const INFO: Color = Color::Rgb(56, 189, 248); // #38BDF8

    // === Background / text ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Highlighted table row
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Label of the field being edited
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Table header row
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Style for a risk label
    #[must_use]
    pub fn risk_label(risk: RiskLabel) -> Style {
        match risk {
            RiskLabel::Low => Self::success(),
            RiskLabel::High => Self::danger(),
        }
    }

    /// Style for an inline notice
    #[must_use]
    pub fn notice(level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Success => Self::success(),
            NoticeLevel::Info => Self::info(),
            NoticeLevel::Warning => Self::warning(),
            NoticeLevel::Error => Self::danger(),
        }
    }

    /// Gauge style for a health score fraction (0.0 to 1.0)
    #[must_use]
    pub fn gauge(fraction: f64) -> Style {
        if fraction >= 0.7 {
            Self::success()
        } else if fraction >= 0.4 {
            Self::warning()
        } else {
            Self::danger()
        }
    }
}

/// Product name shown in the header bar
pub const APP_NAME: &str = "AgeWell";
