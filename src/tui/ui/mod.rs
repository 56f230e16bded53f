//! UI module: View components for the TUI.

pub mod form;
pub mod history;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Notice;
use crate::tui::styles::{MedicalTheme, APP_NAME};

/// Top bar: product name and tagline.
pub fn render_header(f: &mut Frame, area: Rect, section: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(format!("{APP_NAME} - Elderly Health Risk Predictor"), MedicalTheme::title()),
        Span::styled(format!(" │ {section}"), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Bottom caption shown on every screen.
pub fn render_caption(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "AgeWell: enter patient details, predict risk, export the report, and optionally save the record.",
            MedicalTheme::text_muted(),
        )),
        Line::from(Span::styled(
            "Indicative estimate only; not a substitute for a clinical assessment.",
            MedicalTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One line per notice, colored by level.
pub(crate) fn notice_lines(notices: &[Notice]) -> Vec<Line<'_>> {
    notices
        .iter()
        .map(|n| Line::from(Span::styled(n.message.as_str(), MedicalTheme::notice(n.level))))
        .collect()
}

/// Footer row of `[key] description` hints.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                Span::styled(format!("{desc} "), MedicalTheme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Footer block holding either an error line or key hints.
pub(crate) fn render_footer(f: &mut Frame, area: Rect, content: Line<'_>) {
    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
