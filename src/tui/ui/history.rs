//! Latest records table and systolic BP trend.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState,
    },
    Frame,
};

use crate::application::RecordHistory;
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_footer, render_header};

/// History screen state
#[derive(Debug, Default)]
pub struct HistoryState {
    pub history: RecordHistory,
    pub error: Option<String>,
    pub table: TableState,
}

impl HistoryState {
    /// Replace the loaded rows and reset the selection.
    pub fn set_history(&mut self, history: RecordHistory) {
        let selected = (!history.is_empty()).then_some(0);
        self.history = history;
        self.error = None;
        self.table.select(selected);
    }

    pub fn set_error(&mut self, message: String) {
        self.history = RecordHistory::default();
        self.error = Some(message);
        self.table.select(None);
    }

    pub fn next_row(&mut self) {
        let len = self.history.records.len();
        if len > 0 {
            let i = self.table.selected().map_or(0, |i| (i + 1).min(len - 1));
            self.table.select(Some(i));
        }
    }

    pub fn prev_row(&mut self) {
        if let Some(i) = self.table.selected() {
            self.table.select(Some(i.saturating_sub(1)));
        }
    }
}

/// Render the history screen
pub fn render_history(f: &mut Frame, area: Rect, state: &mut HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(55),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "Latest records");

    if let Some(err) = &state.error {
        let p = Paragraph::new(Line::from(Span::styled(err.as_str(), MedicalTheme::danger())))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::danger()),
            );
        f.render_widget(p, chunks[1]);
    } else if state.history.is_empty() {
        let p = Paragraph::new("No records stored yet.")
            .style(MedicalTheme::text_muted())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::border()),
            );
        f.render_widget(p, chunks[1]);
    } else {
        render_table(f, chunks[1], state);
        render_trend(f, chunks[2], &state.history);
    }

    render_footer(
        f,
        chunks[3],
        key_hints(&[
            ("↑↓", "Scroll"),
            ("R", "Refresh"),
            ("Esc", "Back to form"),
            ("Ctrl-Q", "Quit"),
        ]),
    );
}

fn render_table(f: &mut Frame, area: Rect, state: &mut HistoryState) {
    let header = Row::new([
        "ID", "Age", "HR", "BP", "Chol", "Risk", "BMI", "Score", "Food Plan", "Exercise Plan",
    ])
    .style(MedicalTheme::header());

    let rows = state.history.records.iter().map(|r| {
        Row::new([
            Cell::from(r.display_id()),
            Cell::from(r.vitals.age.to_string()),
            Cell::from(r.vitals.heart_rate.to_string()),
            Cell::from(r.vitals.systolic_bp.to_string()),
            Cell::from(r.vitals.cholesterol.to_string()),
            Cell::from(Span::styled(
                r.risk.as_flag().to_string(),
                MedicalTheme::risk_label(r.risk),
            )),
            Cell::from(format!("{:.2}", r.bmi)),
            Cell::from(r.health_score.to_string()),
            Cell::from(r.food_plan.as_str()),
            Cell::from(r.exercise_plan.as_str()),
        ])
    });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(MedicalTheme::selected())
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} most recent ", state.history.records.len()),
                    MedicalTheme::subtitle(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_stateful_widget(table, area, &mut state.table);
}

fn render_trend(f: &mut Frame, area: Rect, history: &RecordHistory) {
    let Some((x_bounds, y_bounds)) = history.trend_bounds() else {
        return;
    };
    // Pad so a single point or a flat line still has visible extent.
    let x_bounds = [x_bounds[0] - 1.0, x_bounds[1] + 1.0];
    let y_bounds = [y_bounds[0] - 10.0, y_bounds[1] + 10.0];

    let dataset = Dataset::default()
        .name("Systolic BP")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(MedicalTheme::info())
        .data(&history.bp_trend);

    let axis_labels = |[lo, hi]: [f64; 2]| vec![format!("{lo:.0}"), format!("{hi:.0}")];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(Span::styled(" BP Trend ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .x_axis(
            Axis::default()
                .title("Patient ID")
                .style(MedicalTheme::text_muted())
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("mmHg")
                .style(MedicalTheme::text_muted())
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}
