#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Landing,
    Entry,
    Review,
    Complete,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 4] = [
    WizardStep::Landing,
    WizardStep::Entry,
    WizardStep::Review,
    WizardStep::Complete,
];

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Landing => "landing",
            WizardStep::Entry => "entry",
            WizardStep::Review => "review",
            WizardStep::Complete => "complete",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Landing => "Welcome",
            WizardStep::Entry => "Registration Form",
            WizardStep::Review => "Review Details",
            WizardStep::Complete => "Registration Complete",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five transitions the wizard's own controls issue. Everything else is
/// out of contract.
pub fn is_sanctioned_transition(from: WizardStep, to: WizardStep) -> bool {
    matches!(
        (from, to),
        (WizardStep::Landing, WizardStep::Entry)
            | (WizardStep::Entry, WizardStep::Review)
            | (WizardStep::Review, WizardStep::Entry)
            | (WizardStep::Review, WizardStep::Complete)
            | (WizardStep::Complete, WizardStep::Landing)
    )
}
