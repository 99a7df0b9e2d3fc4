pub mod controller;
pub mod error;
pub mod navigation;
pub mod print;
pub mod screens;
pub mod step;

pub use controller::{WizardController, WizardSnapshot};
pub use error::WizardError;
pub use print::{
    CapturePrintSink, FilePrintSink, PrintError, PrintOutcome, PrintSink, RegistrationReceipt,
};
pub use step::{is_sanctioned_transition, WizardStep, ALL_WIZARD_STEPS};
