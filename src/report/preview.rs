//! Plain-text preview shown before the PDF is downloaded.
//!
//! Headings and field labels go through the injected translator. Patient
//! values, the narrative and plan entries are shown as entered.

use std::fmt::Write as _;

use crate::i18n::{translate_or_original, Locale, Translator};
use crate::models::{CarePlan, DischargeSummary, PlanEntry};

pub fn render_preview(
    summary: &DischargeSummary,
    translator: &dyn Translator,
    locale: Locale,
) -> String {
    let tr = |text: &str| translate_or_original(translator, text, locale);
    let mut out = String::new();

    let title = tr("Hospital Discharge Summary");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out, "{}: {}", tr("Prepared"), summary.prepared_on.format("%Y-%m-%d"));
    out.push('\n');

    for (label, value) in summary.patient.populated_fields() {
        let _ = writeln!(out, "{}: {}", tr(&label), value);
    }

    section(&mut out, &tr("Recovery Progress"));
    let (day, score) = (tr("Date / Day"), tr("Recovery Score (%)"));
    let width = summary
        .trajectory
        .labels()
        .iter()
        .map(|l| l.to_string().chars().count())
        .chain(std::iter::once(day.chars().count()))
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "{day:<width$}  {score}");
    for (label, value) in summary.trajectory.points() {
        let _ = writeln!(out, "{:<width$}  {value}", label.to_string());
    }

    section(&mut out, &tr("Doctor Summary"));
    let _ = writeln!(out, "{}", summary.narrative);

    plan_section(&mut out, &tr, &summary.medications);
    plan_section(&mut out, &tr, &summary.diet);

    out
}

fn section(out: &mut String, heading: &str) {
    let _ = write!(out, "\n{heading}\n{}\n", "-".repeat(heading.chars().count()));
}

fn plan_section<E: PlanEntry>(
    out: &mut String,
    tr: &dyn Fn(&str) -> String,
    plan: &CarePlan<E>,
) {
    section(out, &tr(E::HEADING));
    if plan.is_empty() {
        let _ = writeln!(out, "({})", tr("none"));
        return;
    }
    for line in plan.lines() {
        let _ = writeln!(out, "- {line}");
    }
}
