pub mod draft;
pub mod fields;
pub mod review;

pub use draft::{missing_fields_as_text, RegistrationDraft};
pub use fields::{Branch, CasteCategory, DraftField, FieldUpdate};
pub use review::{review_rows, ReviewRow};
