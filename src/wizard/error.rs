use super::print::PrintError;
use super::step::WizardStep;
use crate::registration::{missing_fields_as_text, DraftField};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("registration is incomplete; missing: {}", missing_fields_as_text(.missing))]
    IncompleteDraft { missing: Vec<DraftField> },
    #[error("invalid wizard transition: {from} -> {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },
    #[error("another wizard transition is still in progress")]
    TransitionInFlight,
    #[error("printing is only available on the complete step (current step: {step})")]
    NotPrintable { step: WizardStep },
    #[error(transparent)]
    Print(#[from] PrintError),
}
