//! A4 PDF composition via `printpdf`.
//!
//! Layout works top-down with a y cursor in millimetres. Any block that would
//! cross the bottom margin starts on a fresh page. Metadata (document id,
//! dates, trailer id) comes from the summary, so output bytes depend on
//! nothing else.

use std::io::BufWriter;

use chrono::Datelike;
use lopdf::{Object, StringFormat};
use printpdf::{
    BuiltinFont, CustomPdfConformance, Image, ImageTransform, IndirectFontRef, Mm,
    PdfConformance, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::chart::{
    point_x_px, score_y_px, ChartImage, CHART_HEIGHT_PX, CHART_WIDTH_PX, Y_AXIS_MAX, Y_GRID_STEP,
};
use super::ReportError;
use crate::models::{CarePlan, DischargeSummary, PlanEntry};

// ─── Layout ───────────────────────────────────────────────────────────────────

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LEFT_MM: f32 = 20.0;

const TITLE: &str = "Hospital Discharge Summary";
const LAYER_NAME: &str = "Layer 1";

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 9.0;
const TICK_SIZE: f32 = 7.0;

const LINE_HEIGHT_MM: f32 = 5.0;
const HEADING_GAP_MM: f32 = 7.0;
const SECTION_GAP_MM: f32 = 6.0;
/// Characters per wrapped body line at `BODY_SIZE`.
const WRAP_CHARS: usize = 90;

/// Embedded chart geometry on the page.
const CHART_LEFT_MM: f32 = 30.0;
const CHART_WIDTH_MM: f32 = 160.0;
const CHART_HEIGHT_MM: f32 = CHART_WIDTH_MM * CHART_HEIGHT_PX as f32 / CHART_WIDTH_PX as f32;
/// Space under the image for day labels and the axis caption.
const CHART_FOOTER_MM: f32 = 10.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

// ─── Canvas ───────────────────────────────────────────────────────────────────

struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Canvas {
    fn new(summary: &DischargeSummary) -> Result<Self, ReportError> {
        let stamp = document_date(summary)?;
        let (doc, page1, layer1) = PdfDocument::new(
            TITLE,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let doc = doc
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                allows_default_fonts: true,
                allows_pdf_layers: true,
                ..Default::default()
            }))
            .with_document_id(document_id(summary))
            .with_creation_date(stamp)
            .with_mod_date(stamp)
            .with_metadata_date(stamp);

        let layer = doc.get_page(page1).get_layer(layer1);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("PDF font error: {e}")))?;

        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: TOP_MM,
            pages: 1,
        })
    }

    /// Starts a new page unless `height` millimetres still fit above the margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height >= BOTTOM_MARGIN_MM {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MM;
        self.pages += 1;
        tracing::debug!(page = self.pages, "Report continues on new page");
    }

    fn text_at(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(latin1(text), size, Mm(x), Mm(y), font);
    }

    fn centered(&self, text: &str, size: f32, bold: bool) {
        let x = ((PAGE_WIDTH_MM - text_width_mm(text, size)) / 2.0).max(LEFT_MM);
        self.text_at(text, size, x, self.y, bold);
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading with at least its first line of content.
        self.reserve(HEADING_GAP_MM + LINE_HEIGHT_MM);
        self.text_at(text, HEADING_SIZE, LEFT_MM, self.y, true);
        self.y -= HEADING_GAP_MM;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, WRAP_CHARS) {
            self.reserve(LINE_HEIGHT_MM);
            self.text_at(&line, BODY_SIZE, LEFT_MM, self.y, false);
            self.y -= LINE_HEIGHT_MM;
        }
    }

    fn finish(self, document_id: &str) -> Result<(Vec<u8>, usize), ReportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ReportError::Pdf(format!("PDF save error: {e}")))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| ReportError::Pdf(format!("PDF buffer error: {e}")))?;
        Ok((stamp_trailer_id(&bytes, document_id)?, self.pages))
    }
}

// ─── Composition ──────────────────────────────────────────────────────────────

/// Lays out every section of the report and returns the PDF bytes.
pub fn compose(summary: &DischargeSummary, chart: &ChartImage) -> Result<Vec<u8>, ReportError> {
    let mut canvas = Canvas::new(summary)?;

    // Title block
    canvas.centered(TITLE, TITLE_SIZE, true);
    canvas.y -= HEADING_GAP_MM;
    let prepared = format!("Prepared: {}", summary.prepared_on.format("%d %B %Y"));
    canvas.centered(&prepared, SMALL_SIZE, false);
    canvas.y -= SECTION_GAP_MM + LINE_HEIGHT_MM;

    // Patient fields
    for (label, value) in summary.patient.populated_fields() {
        canvas.paragraph(&format!("{label}: {value}"));
    }
    canvas.y -= SECTION_GAP_MM;

    draw_chart_section(&mut canvas, summary, chart)?;

    canvas.heading("Doctor Summary");
    canvas.paragraph(&summary.narrative);
    canvas.y -= SECTION_GAP_MM;

    plan_section(&mut canvas, &summary.medications);
    plan_section(&mut canvas, &summary.diet);

    let (bytes, pages) = canvas.finish(&document_id(summary))?;
    tracing::debug!(pages, "PDF composed");
    Ok(bytes)
}

fn plan_section<E: PlanEntry>(canvas: &mut Canvas, plan: &CarePlan<E>) {
    canvas.heading(E::HEADING);
    for line in plan.lines() {
        canvas.paragraph(&line);
    }
    canvas.y -= SECTION_GAP_MM;
}

/// Chart heading, embedded image, and the text drawn around it.
fn draw_chart_section(
    canvas: &mut Canvas,
    summary: &DischargeSummary,
    chart: &ChartImage,
) -> Result<(), ReportError> {
    canvas.reserve(HEADING_GAP_MM * 2.0 + CHART_HEIGHT_MM + CHART_FOOTER_MM);

    let heading = format!("Recovery Progress: {}", summary.patient.display_name());
    canvas.text_at(&heading, HEADING_SIZE, LEFT_MM, canvas.y, true);
    canvas.y -= HEADING_GAP_MM;
    canvas.text_at("Recovery Score (%)", TICK_SIZE, LEFT_MM, canvas.y, false);
    canvas.y -= 2.0;

    let image_bottom = canvas.y - CHART_HEIGHT_MM;
    let image = Image::from_dynamic_image(&chart.decode()?);
    image.add_to_layer(
        canvas.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(CHART_LEFT_MM)),
            translate_y: Some(Mm(image_bottom)),
            dpi: Some(CHART_WIDTH_PX as f32 * 25.4 / CHART_WIDTH_MM),
            ..Default::default()
        },
    );

    // Score ticks, right-aligned against the image's left edge.
    let px_to_mm_y = CHART_HEIGHT_MM / CHART_HEIGHT_PX as f32;
    for score in (0..=Y_AXIS_MAX as u32).step_by(Y_GRID_STEP as usize) {
        let from_top = score_y_px(f64::from(score)) as f32 * px_to_mm_y;
        let label = score.to_string();
        let x = CHART_LEFT_MM + 4.0 - text_width_mm(&label, TICK_SIZE);
        canvas.text_at(&label, TICK_SIZE, x, canvas.y - from_top - 1.0, false);
    }

    // Day labels, centred under each point.
    let px_to_mm_x = CHART_WIDTH_MM / CHART_WIDTH_PX as f32;
    let count = summary.trajectory.len();
    for (i, label) in summary.trajectory.labels().iter().enumerate() {
        let label = label.to_string();
        let centre = CHART_LEFT_MM + point_x_px(i, count) as f32 * px_to_mm_x;
        let x = centre - text_width_mm(&label, TICK_SIZE) / 2.0;
        canvas.text_at(&label, TICK_SIZE, x, image_bottom + 1.5, false);
    }

    let caption = "Date / Day";
    let x = CHART_LEFT_MM + (CHART_WIDTH_MM - text_width_mm(caption, TICK_SIZE)) / 2.0;
    canvas.text_at(caption, TICK_SIZE, x, image_bottom - 3.0, false);

    canvas.y = image_bottom - CHART_FOOTER_MM;
    Ok(())
}

// ─── Metadata ─────────────────────────────────────────────────────────────────

/// First 32 hex digits of SHA-256 over `patient_id|prepared_on`.
fn document_id(summary: &DischargeSummary) -> String {
    let key = format!("{}|{}", summary.patient.patient_id, summary.prepared_on);
    let digest = Sha256::digest(key.as_bytes());
    digest.iter().take(16).map(|b| format!("{b:02x}")).collect()
}

/// Midnight UTC of the preparation date.
fn document_date(summary: &DischargeSummary) -> Result<OffsetDateTime, ReportError> {
    let date = summary.prepared_on;
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| ReportError::Pdf(format!("Invalid document date: {e}")))?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map_err(|e| ReportError::Pdf(format!("Invalid document date: {e}")))?;
    Ok(day.midnight().assume_utc())
}

/// Replaces the per-save random trailer `/ID` with the document id.
fn stamp_trailer_id(bytes: &[u8], document_id: &str) -> Result<Vec<u8>, ReportError> {
    let mut doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ReportError::Pdf(format!("PDF reload error: {e}")))?;
    let id = Object::String(document_id.as_bytes().to_vec(), StringFormat::Literal);
    doc.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let mut out = Vec::with_capacity(bytes.len());
    doc.save_to(&mut out)
        .map_err(|e| ReportError::Pdf(format!("PDF save error: {e}")))?;
    Ok(out)
}

// ─── Text helpers ─────────────────────────────────────────────────────────────

/// Word wrap on whitespace. Words longer than `max_chars` are split into
/// `max_chars` chunks so nothing runs past the right margin.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut width = 0;
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                if width > 0 && width + 1 + chunk.len() > max_chars {
                    lines.push(std::mem::take(&mut current));
                    width = 0;
                }
                if width > 0 {
                    current.push(' ');
                    width += 1;
                }
                current.extend(chunk);
                width += chunk.len();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Built-in fonts are WinAnsi encoded; anything outside Latin-1 becomes `?`.
fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { '?' })
        .collect()
}

fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM * PT_TO_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::render;
    use crate::report::tests::sample_summary;

    fn page_count(bytes: &[u8]) -> usize {
        lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn wrap_keeps_explicit_breaks() {
        assert_eq!(wrap_text("a\nb", 80), vec!["a", "b"]);
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }

    #[test]
    fn overlong_words_are_split_at_the_width() {
        assert_eq!(wrap_text("abcdefghij x", 4), vec!["abcd", "efgh", "ij x"]);

        let address = "Flat-12/".repeat(625);
        let lines = wrap_text(&format!("Address: {address}"), WRAP_CHARS);
        assert!(lines.iter().all(|l| l.chars().count() <= WRAP_CHARS));
        assert_eq!(lines.concat().replace("Address:", ""), address);
    }

    #[test]
    fn long_unbroken_value_renders() {
        let mut summary = sample_summary();
        summary
            .patient
            .set(crate::models::PatientField::Address, &"X".repeat(5000));
        let first = render(&summary).unwrap();
        assert_eq!(first, render(&summary).unwrap());
        assert!(page_count(first.bytes()) > 1);
    }

    #[test]
    fn non_latin_text_is_substituted() {
        assert_eq!(latin1("Café 東京"), "Café ??");
    }

    #[test]
    fn document_id_is_stable_and_summary_specific() {
        let summary = sample_summary();
        let id = document_id(&summary);
        assert_eq!(id.len(), 32);
        assert_eq!(id, document_id(&summary));

        let mut other = summary.clone();
        other.prepared_on = other.prepared_on.succ_opt().unwrap();
        assert_ne!(id, document_id(&other));
    }

    #[test]
    fn trailer_id_is_the_document_id() {
        let summary = sample_summary();
        let bytes = render(&summary).unwrap().into_bytes();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let ids = doc.trailer.get(b"ID").unwrap().as_array().unwrap();
        assert_eq!(ids[0].as_str().unwrap(), document_id(&summary).as_bytes());
    }

    #[test]
    fn short_report_fits_one_page() {
        let bytes = render(&sample_summary()).unwrap().into_bytes();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn long_narrative_continues_on_new_pages() {
        let mut summary = sample_summary();
        summary.set_narrative("Patient remained stable overnight. ".repeat(400));
        let bytes = render(&summary).unwrap().into_bytes();
        assert!(page_count(&bytes) > 1);
    }
}
