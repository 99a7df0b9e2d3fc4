use super::fields::{Branch, CasteCategory, DraftField, FieldUpdate};
use serde::{Deserialize, Serialize};

/// In-progress registration record. Never persisted; owned by the wizard
/// controller for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub branch: Option<Branch>,
    #[serde(default)]
    pub pin_number: String,
    #[serde(default)]
    pub caste_category: Option<CasteCategory>,
}

impl RegistrationDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FullName(value) => self.full_name = value,
            FieldUpdate::PhoneNumber(value) => self.phone_number = value,
            FieldUpdate::Branch(value) => self.branch = value,
            FieldUpdate::PinNumber(value) => self.pin_number = value,
            FieldUpdate::CasteCategory(value) => self.caste_category = value,
        }
    }

    /// Display text for a field; unset choices render as an empty string.
    pub fn value_text(&self, field: DraftField) -> String {
        match field {
            DraftField::FullName => self.full_name.clone(),
            DraftField::PhoneNumber => self.phone_number.clone(),
            DraftField::Branch => self
                .branch
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            DraftField::PinNumber => self.pin_number.clone(),
            DraftField::CasteCategory => self
                .caste_category
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn is_filled(&self, field: DraftField) -> bool {
        match field {
            DraftField::FullName => !self.full_name.is_empty(),
            DraftField::PhoneNumber => !self.phone_number.is_empty(),
            DraftField::Branch => self.branch.is_some(),
            DraftField::PinNumber => !self.pin_number.is_empty(),
            DraftField::CasteCategory => self.caste_category.is_some(),
        }
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| !self.is_filled(*field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        DraftField::ALL.iter().all(|field| self.is_filled(*field))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn missing_fields_as_text(missing: &[DraftField]) -> String {
    missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}
