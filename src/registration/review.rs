use super::draft::RegistrationDraft;
use super::fields::DraftField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub field: DraftField,
    pub label: String,
    pub value: String,
}

/// Label/value rows shown on the review and confirmation views. Values are
/// the draft's values unchanged.
pub fn review_rows(draft: &RegistrationDraft) -> Vec<ReviewRow> {
    DraftField::ALL
        .into_iter()
        .map(|field| ReviewRow {
            field,
            label: field.review_label().to_string(),
            value: draft.value_text(field),
        })
        .collect()
}
