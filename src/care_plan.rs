//! Default care plans attached to a new discharge summary.
//!
//! Plans come from a `CarePlanProvider` so a real prescribing source can
//! replace the static templates without touching rendering.

use crate::models::{DietItem, DietPlan, Medication, MedicationPlan};

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Supplies the starting medication and diet plans. Callers edit freely afterwards.
pub trait CarePlanProvider: Send + Sync {
    fn default_medications(&self) -> MedicationPlan;
    fn default_diet(&self) -> DietPlan;
}

// ─── Static defaults ─────────────────────────────────────────────────────────

/// Fixed three-entry templates, independent of the patient.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCarePlan;

impl CarePlanProvider for StandardCarePlan {
    fn default_medications(&self) -> MedicationPlan {
        MedicationPlan::new(vec![
            Medication::new("Paracetamol", "500mg", "Twice a day"),
            Medication::new("Amoxicillin", "250mg", "Once a day"),
            Medication::new("Vitamin C", "500mg", "Once a day"),
        ])
    }

    fn default_diet(&self) -> DietPlan {
        DietPlan::new(vec![
            DietItem::new("Breakfast", "1 bowl oats", "8:00 AM"),
            DietItem::new("Lunch", "Rice + Veg", "1:00 PM"),
            DietItem::new("Dinner", "Soup + Bread", "7:00 PM"),
        ])
    }
}
