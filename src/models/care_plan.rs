use serde::{Deserialize, Serialize};

/// A prescribed medication line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(alias = "Medicine", alias = "medicine")]
    pub name: String,
    #[serde(alias = "Dosage")]
    pub dosage: String,
    #[serde(alias = "Timing")]
    pub timing: String,
}

/// A diet plan line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietItem {
    #[serde(alias = "Meal")]
    pub meal: String,
    #[serde(alias = "Quantity")]
    pub quantity: String,
    #[serde(alias = "Timing")]
    pub timing: String,
}

impl Medication {
    pub fn new(name: &str, dosage: &str, timing: &str) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            timing: timing.into(),
        }
    }
}

impl DietItem {
    pub fn new(meal: &str, quantity: &str, timing: &str) -> Self {
        Self {
            meal: meal.into(),
            quantity: quantity.into(),
            timing: timing.into(),
        }
    }
}

/// Rendering contract shared by plan entries.
pub trait PlanEntry {
    /// Section heading for a plan of this entry kind.
    const HEADING: &'static str;

    /// One-line rendition, three fields joined by ` - `.
    fn line(&self) -> String;
}

impl PlanEntry for Medication {
    const HEADING: &'static str = "Medications";

    fn line(&self) -> String {
        format!("{} - {} - {}", self.name, self.dosage, self.timing)
    }
}

impl PlanEntry for DietItem {
    const HEADING: &'static str = "Diet Plan";

    fn line(&self) -> String {
        format!("{} - {} - {}", self.meal, self.quantity, self.timing)
    }
}

/// Ordered, freely editable list of entries of a single kind.
/// Serializes as a bare JSON array so an edit surface can hand it back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarePlan<E> {
    entries: Vec<E>,
}

pub type MedicationPlan = CarePlan<Medication>;
pub type DietPlan = CarePlan<DietItem>;

impl<E> Default for CarePlan<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> CarePlan<E> {
    pub fn new(entries: Vec<E>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: E) {
        self.entries.push(entry);
    }

    /// Removes the entry at `index`; `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<E> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }
}

impl<E: PlanEntry> CarePlan<E> {
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(PlanEntry::line).collect()
    }
}

impl<'a, E> IntoIterator for &'a CarePlan<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
