//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::{Notice, SubmissionOutcome};
use crate::domain::HealthRecord;
use crate::tui::styles::MedicalTheme;

use super::{key_hints, notice_lines, render_footer, render_header};

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted yet
    #[default]
    Empty,
    /// Submission finished (possibly with storage/report notices)
    Complete(SubmissionOutcome),
    /// Submission aborted before a record was produced
    Failed(String),
}

/// Render the result screen.
///
/// `extra` holds notices raised outside a submission, such as the last-report
/// lookup. They get their own row so they show whatever the result state is.
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState, extra: &[Notice]) {
    let extra_height = u16::try_from(extra.len()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(extra_height),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "Assessment");

    match state {
        ResultState::Empty => render_message(
            f,
            chunks[1],
            "No assessment yet. Fill in the form and press Enter.",
            MedicalTheme::border(),
        ),
        ResultState::Failed(message) => {
            render_message(f, chunks[1], message, MedicalTheme::danger());
        }
        ResultState::Complete(outcome) => render_outcome(f, chunks[1], outcome),
    }

    if !extra.is_empty() {
        f.render_widget(
            Paragraph::new(notice_lines(extra)).wrap(Wrap { trim: true }),
            chunks[2],
        );
    }

    render_footer(
        f,
        chunks[3],
        key_hints(&[
            ("Esc", "Back to form"),
            ("D", "Last report"),
            ("H", "History"),
            ("Ctrl-Q", "Quit"),
        ]),
    );
}

fn render_message(f: &mut Frame, area: Rect, message: &str, border: ratatui::style::Style) {
    let content = Paragraph::new(vec![Line::from(""), Line::from(message)])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(content, area);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: &SubmissionOutcome) {
    let record = &outcome.record;
    let block = Block::default()
        .title(Span::styled(" Prediction ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk + BMI
            Constraint::Length(3), // Health score
            Constraint::Length(5), // Plans
            Constraint::Min(0),    // Notices
        ])
        .margin(1)
        .split(inner);

    let risk_style = MedicalTheme::risk_label(record.risk);
    let headline = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Prediction: ", MedicalTheme::text_secondary()),
            Span::styled(record.risk.to_string(), risk_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("BMI: ", MedicalTheme::text_secondary()),
            Span::styled(format!("{:.2}", record.bmi), MedicalTheme::text()),
            Span::styled("   Patient ID: ", MedicalTheme::text_secondary()),
            Span::styled(record.display_id(), MedicalTheme::text()),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let fraction = f64::from(record.health_score) / 100.0;
    let score = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Health Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::gauge(fraction))
        .percent(u16::from(record.health_score))
        .label(format!("{}/100", record.health_score));
    f.render_widget(score, chunks[1]);

    f.render_widget(plans(record), chunks[2]);

    f.render_widget(
        Paragraph::new(notice_lines(&outcome.notices)).wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn plans(record: &HealthRecord) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Food Plan: ", MedicalTheme::subtitle()),
            Span::styled(record.food_plan.as_str(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Exercise Plan: ", MedicalTheme::subtitle()),
            Span::styled(record.exercise_plan.as_str(), MedicalTheme::text()),
        ]),
    ])
    .wrap(Wrap { trim: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyMeasurements, RiskLabel, VitalSigns};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &ResultState, extra: &[Notice]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("Should create terminal");
        terminal
            .draw(|f| render_result(f, f.area(), state, extra))
            .expect("Should draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn complete_state() -> ResultState {
        let record = HealthRecord::assess(
            VitalSigns::default(),
            BodyMeasurements::default(),
            RiskLabel::High,
        )
        .expect("Should assess");
        ResultState::Complete(SubmissionOutcome {
            record,
            report_path: None,
            notices: vec![Notice::info("Database insert disabled; record not saved.")],
        })
    }

    #[test]
    fn test_extra_notice_shown_without_assessment() {
        let text = rendered(&ResultState::Empty, &[Notice::warning("No report yet")]);
        assert!(text.contains("No assessment yet"));
        assert!(text.contains("No report yet"));
    }

    #[test]
    fn test_extra_notice_shown_after_failure() {
        let state = ResultState::Failed("Classifier failed: model not loaded".to_string());
        let text = rendered(&state, &[Notice::warning("No report yet")]);
        assert!(text.contains("Classifier failed"));
        assert!(text.contains("No report yet"));
    }

    #[test]
    fn test_complete_shows_prediction_and_all_notices() {
        let text = rendered(&complete_state(), &[Notice::info("Last report: r.pdf")]);
        assert!(text.contains("High Risk"));
        assert!(text.contains("record not saved"));
        assert!(text.contains("Last report: r.pdf"));
    }
}
