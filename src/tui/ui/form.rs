//! Patient details entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::vitals::{
    IntRange, AGE_RANGE, CHOLESTEROL_RANGE, HEART_RATE_RANGE, HEIGHT_RANGE_M,
    SYSTOLIC_BP_RANGE, WEIGHT_RANGE_KG,
};
use crate::domain::{BodyMeasurements, ValidationError, VitalSigns};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_footer, render_header};

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
}

impl FormField {
    fn integer(label: &'static str, hint: &'static str, range: IntRange, default: u32) -> Self {
        Self {
            label,
            hint,
            value: default.to_string(),
            kind: FieldKind::Integer,
            min: f64::from(range.min),
            max: f64::from(range.max),
        }
    }

    fn decimal(label: &'static str, hint: &'static str, (min, max): (f64, f64), default: f64) -> Self {
        Self {
            label,
            hint,
            value: format_decimal(default),
            kind: FieldKind::Decimal,
            min,
            max,
        }
    }

    /// Parse and range-check the current buffer.
    ///
    /// # Errors
    /// Returns a `ValidationError` naming this field.
    pub fn parse(&self) -> Result<f64, ValidationError> {
        let field = self.label;
        let value: f64 = self
            .value
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or(ValidationError::NotANumber { field })?;

        if self.kind == FieldKind::Integer && value.fract() != 0.0 {
            return Err(ValidationError::NotAnInteger { field });
        }
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

fn format_decimal(value: f64) -> String {
    // 70.0 -> "70.0", 1.68 -> "1.68"
    let s = format!("{value}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

const AGE: usize = 0;
const HEART_RATE: usize = 1;
const SYSTOLIC_BP: usize = 2;
const CHOLESTEROL: usize = 3;
const WEIGHT: usize = 4;
const HEIGHT: usize = 5;

/// Entry form state
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
    /// Whether a submission is stored in the database.
    pub insert_to_db: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FormState {
    /// Fresh form prefilled with the default patient.
    #[must_use]
    pub fn new(insert_to_db: bool) -> Self {
        let vitals = VitalSigns::default();
        let body = BodyMeasurements::default();

        Self {
            fields: vec![
                FormField::integer("Age", "years (40-120)", AGE_RANGE, vitals.age),
                FormField::integer(
                    "Heart Rate",
                    "bpm (30-200)",
                    HEART_RATE_RANGE,
                    vitals.heart_rate,
                ),
                FormField::integer(
                    "Systolic BP",
                    "mmHg (80-250)",
                    SYSTOLIC_BP_RANGE,
                    vitals.systolic_bp,
                ),
                FormField::integer(
                    "Cholesterol",
                    "mg/dL (100-400)",
                    CHOLESTEROL_RANGE,
                    vitals.cholesterol,
                ),
                FormField::decimal("Weight (kg)", "kg (30-200)", WEIGHT_RANGE_KG, body.weight_kg),
                FormField::decimal("Height (m)", "m (1.0-2.2)", HEIGHT_RANGE_M, body.height_m),
            ],
            selected_field: 0,
            error_message: None,
            insert_to_db,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        let accepted = c.is_ascii_digit() || (c == '.' && field.kind == FieldKind::Decimal);
        if accepted {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    pub fn toggle_insert(&mut self) {
        self.insert_to_db = !self.insert_to_db;
    }

    /// Wipe typed values and restore the defaults.
    ///
    /// Called after a submission so the entered vitals do not linger in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        let insert_to_db = self.insert_to_db;
        *self = Self::new(insert_to_db);
    }

    /// Parse every field into domain inputs.
    ///
    /// # Errors
    /// Returns the first field that fails to parse or is out of range.
    pub fn to_inputs(&self) -> Result<(VitalSigns, BodyMeasurements), ValidationError> {
        let values = self
            .fields
            .iter()
            .map(FormField::parse)
            .collect::<Result<Vec<f64>, _>>()?;

        // Integer fields are whole and within u32 bounds after parse().
        let vitals = VitalSigns {
            age: values[AGE] as u32,
            heart_rate: values[HEART_RATE] as u32,
            systolic_bp: values[SYSTOLIC_BP] as u32,
            cholesterol: values[CHOLESTEROL] as u32,
        };
        let body = BodyMeasurements {
            weight_kg: values[WEIGHT],
            height_m: values[HEIGHT],
        };
        Ok((vitals, body))
    }
}

/// Render the entry form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Insert toggle
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], "Enter patient details");
    render_form_fields(f, chunks[1], state);
    render_insert_toggle(f, chunks[2], state.insert_to_db);

    let footer = match &state.error_message {
        Some(err) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.as_str(), MedicalTheme::danger()),
        ]),
        None => key_hints(&[
            ("↑↓", "Navigate"),
            ("Enter", "Predict"),
            ("I", "Toggle DB insert"),
            ("D", "Last report"),
            ("H", "History"),
            ("Ctrl-Q", "Quit"),
        ]),
    };
    render_footer(f, chunks[3], footer);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_insert_toggle(f: &mut Frame, area: Rect, insert_to_db: bool) {
    let (mark, style) = if insert_to_db {
        ("[x]", MedicalTheme::success())
    } else {
        ("[ ]", MedicalTheme::text_muted())
    };
    let line = Line::from(vec![
        Span::styled(format!("  {mark} "), style),
        Span::styled("Insert record into database", MedicalTheme::text_secondary()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
