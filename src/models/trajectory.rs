use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FULL_RECOVERY_SCORE;

/// X-axis label of one trajectory point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLabel {
    /// Calendar day, shown as `10-Jan`.
    Date(NaiveDate),
    /// 1-based day index, used when no registration date is known.
    Day(u32),
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%d-%b")),
            Self::Day(index) => write!(f, "{index}"),
        }
    }
}

/// Recovery scores (0–100) with one label per score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryTrajectory {
    scores: Vec<u8>,
    labels: Vec<DayLabel>,
}

impl RecoveryTrajectory {
    /// Pairs scores with labels. Scores above 100 are clipped.
    /// Returns `None` when the two sequences differ in length.
    pub fn from_parts(scores: Vec<u32>, labels: Vec<DayLabel>) -> Option<Self> {
        if scores.len() != labels.len() {
            return None;
        }
        let scores = scores
            .into_iter()
            .map(|s| s.min(u32::from(FULL_RECOVERY_SCORE)) as u8)
            .collect();
        Some(Self { scores, labels })
    }

    /// Builds from `(label, score)` pairs, so lengths always agree.
    /// Scores above 100 are clipped.
    pub(crate) fn from_points(points: impl IntoIterator<Item = (DayLabel, u32)>) -> Self {
        let (labels, scores): (Vec<DayLabel>, Vec<u8>) = points
            .into_iter()
            .map(|(label, s)| (label, s.min(u32::from(FULL_RECOVERY_SCORE)) as u8))
            .unzip();
        Self { scores, labels }
    }

    /// Convenience for index-labelled trajectories (`1..=n`).
    pub fn with_day_labels(scores: Vec<u32>) -> Self {
        let labels = (1..=scores.len() as u32).map(DayLabel::Day).collect();
        let scores = scores
            .into_iter()
            .map(|s| s.min(u32::from(FULL_RECOVERY_SCORE)) as u8)
            .collect();
        Self { scores, labels }
    }

    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    pub fn labels(&self) -> &[DayLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn final_score(&self) -> Option<u8> {
        self.scores.last().copied()
    }

    /// `(label, score)` pairs in day order.
    pub fn points(&self) -> impl Iterator<Item = (&DayLabel, u8)> + '_ {
        self.labels.iter().zip(self.scores.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_label_formats_day_and_month() {
        let label = DayLabel::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(label.to_string(), "10-Jan");
        assert_eq!(DayLabel::Day(3).to_string(), "3");
    }

    #[test]
    fn from_parts_rejects_length_mismatch() {
        assert!(RecoveryTrajectory::from_parts(vec![1, 2], vec![DayLabel::Day(1)]).is_none());
    }

    #[test]
    fn from_points_pairs_labels_and_clips() {
        let t = RecoveryTrajectory::from_points(vec![
            (DayLabel::Day(1), 60),
            (DayLabel::Day(2), 120),
        ]);
        assert_eq!(t.scores(), &[60, 100]);
        assert_eq!(t.labels(), &[DayLabel::Day(1), DayLabel::Day(2)]);
        assert!(RecoveryTrajectory::from_points(Vec::new()).is_empty());
    }

    #[test]
    fn scores_are_clipped_to_full_recovery() {
        let t = RecoveryTrajectory::with_day_labels(vec![90, 105, 130]);
        assert_eq!(t.scores(), &[90, 100, 100]);
        assert_eq!(t.final_score(), Some(100));
        assert_eq!(t.labels(), &[DayLabel::Day(1), DayLabel::Day(2), DayLabel::Day(3)]);
    }
}
