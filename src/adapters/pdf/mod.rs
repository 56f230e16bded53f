//! PDF adapter: Implementation of ReportWriter using printpdf.
//!
//! Produces a single A4 page with the identifier, the four vitals, BMI,
//! health score, risk label and both recommendation strings.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::domain::HealthRecord;
use crate::ports::{ReportError, ReportWriter};

const REPORT_TITLE: &str = "AgeWell - Patient Health Report";

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_LEFT: Mm = Mm(20.0);
const TOP: Mm = Mm(280.0);

/// Characters per wrapped line for the plan paragraphs at 11pt.
const WRAP_COLUMNS: usize = 85;

/// File name for a record's report: `AgeWell_Report_<id>.pdf`, `temp` when unsaved.
#[must_use]
pub fn report_file_name(record: &HealthRecord) -> String {
    format!("AgeWell_Report_{}.pdf", record.display_id())
}

/// Writes PDF reports into a fixed directory.
#[derive(Debug, Clone)]
pub struct PdfReportWriter {
    output_dir: PathBuf,
}

impl PdfReportWriter {
    #[must_use]
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ReportWriter for PdfReportWriter {
    fn write_report(&self, record: &HealthRecord) -> Result<PathBuf, ReportError> {
        let bytes = render_report(record)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(report_file_name(record));
        std::fs::write(&path, bytes)?;

        tracing::info!("Wrote report {:?}", path);
        Ok(path)
    }
}

/// Render the report for `record` to PDF bytes.
///
/// # Errors
/// Returns `ReportError::Render` if printpdf fails.
pub fn render_report(record: &HealthRecord) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("font error: {e}")))?;

    let mut y = TOP;

    layer.use_text(REPORT_TITLE, 14.0, Mm(62.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        format!(
            "Generated: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M")
        ),
        8.0,
        MARGIN_LEFT,
        y,
        &font,
    );
    y -= Mm(10.0);

    let vitals = &record.vitals;
    for line in [
        format!("Patient ID: {}", record.display_id()),
        format!(
            "Age: {}  |  Heart Rate: {}  |  BP: {}  |  Cholesterol: {}",
            vitals.age, vitals.heart_rate, vitals.systolic_bp, vitals.cholesterol
        ),
        format!(
            "BMI: {:.2}  |  Health Score: {}  |  Risk: {}",
            record.bmi, record.health_score, record.risk
        ),
    ] {
        layer.use_text(line, 12.0, MARGIN_LEFT, y, &font);
        y -= Mm(8.0);
    }

    y -= Mm(6.0);
    y = write_paragraph(&layer, &font, "Food Plan: ", &record.food_plan, y);
    y -= Mm(3.0);
    write_paragraph(&layer, &font, "Exercise Plan: ", &record.exercise_plan, y);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("buffer error: {e}")))
}

fn write_paragraph(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    label: &str,
    text: &str,
    mut y: Mm,
) -> Mm {
    for line in wrap_text(&format!("{label}{text}"), WRAP_COLUMNS) {
        layer.use_text(line, 11.0, MARGIN_LEFT, y, font);
        y -= Mm(8.0);
    }
    y
}

/// Greedy word wrap on whitespace.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
