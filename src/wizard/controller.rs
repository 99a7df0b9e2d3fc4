use super::error::WizardError;
use super::print::{PrintOutcome, PrintSink, RegistrationReceipt};
use super::step::{is_sanctioned_transition, WizardStep};
use crate::config::DEFAULT_INSTITUTION_NAME;
use crate::registration::{review_rows, FieldUpdate, RegistrationDraft, ReviewRow};
use crate::shared::logging::append_wizard_log;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// What the presentation layer sees after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub busy: bool,
    pub draft: RegistrationDraft,
}

#[derive(Debug)]
struct ControllerState {
    step: WizardStep,
    draft: RegistrationDraft,
}

/// Owns the wizard's step, busy flag, and draft for one session.
///
/// The controller is shared across threads via `Arc` so a driver can run
/// [`WizardController::go_to`] off its render loop. Only one transition may be
/// in flight; a second request while busy is rejected with
/// [`WizardError::TransitionInFlight`].
#[derive(Debug)]
pub struct WizardController {
    state: Mutex<ControllerState>,
    busy: AtomicBool,
    transition_delay: Duration,
    institution_name: String,
    log_path: Option<PathBuf>,
    subscribers: Mutex<Vec<Sender<WizardSnapshot>>>,
}

impl WizardController {
    pub fn new(transition_delay: Duration) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                step: WizardStep::Landing,
                draft: RegistrationDraft::default(),
            }),
            busy: AtomicBool::new(false),
            transition_delay,
            institution_name: DEFAULT_INSTITUTION_NAME.to_string(),
            log_path: None,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_institution_name(mut self, name: &str) -> Self {
        self.institution_name = name.to_string();
        self
    }

    pub fn with_log_path(mut self, path: PathBuf) -> Self {
        self.log_path = Some(path);
        self
    }

    pub fn institution_name(&self) -> &str {
        &self.institution_name
    }

    pub fn transition_delay(&self) -> Duration {
        self.transition_delay
    }

    pub fn step(&self) -> WizardStep {
        self.lock_state().step
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn draft(&self) -> RegistrationDraft {
        self.lock_state().draft.clone()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let state = self.lock_state();
        WizardSnapshot {
            step: state.step,
            busy: self.is_busy(),
            draft: state.draft.clone(),
        }
    }

    /// Receives a snapshot after every subsequent change.
    pub fn subscribe(&self) -> Receiver<WizardSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.lock_subscribers().push(tx);
        rx
    }

    pub fn review(&self) -> Vec<ReviewRow> {
        review_rows(&self.lock_state().draft)
    }

    pub fn update_field(&self, update: FieldUpdate) {
        let field = update.field();
        self.lock_state().draft.apply(update);
        self.log("debug", "wizard.draft.updated", field.as_str());
        self.publish();
    }

    pub fn reset(&self) {
        self.lock_state().draft.clear();
        self.log("info", "wizard.draft.reset", "draft cleared");
        self.publish();
    }

    /// Requests a step change. The busy flag is raised for the configured
    /// delay, then the step is applied; `Complete -> Landing` also clears the
    /// draft. Returns the step now current.
    pub fn go_to(&self, target: WizardStep) -> Result<WizardStep, WizardError> {
        let from = {
            let state = self.lock_state();
            if self.busy.load(Ordering::Acquire) {
                drop(state);
                self.log(
                    "warn",
                    "wizard.transition.rejected",
                    &format!("{target}: transition in flight"),
                );
                return Err(WizardError::TransitionInFlight);
            }
            let from = state.step;
            if !is_sanctioned_transition(from, target) {
                drop(state);
                self.log(
                    "warn",
                    "wizard.transition.rejected",
                    &format!("{from} -> {target}: out of contract"),
                );
                return Err(WizardError::InvalidTransition { from, to: target });
            }
            if from == WizardStep::Entry && target == WizardStep::Review {
                let missing = state.draft.missing_fields();
                if !missing.is_empty() {
                    drop(state);
                    let err = WizardError::IncompleteDraft { missing };
                    self.log("warn", "wizard.transition.rejected", &err.to_string());
                    return Err(err);
                }
            }
            self.busy.store(true, Ordering::Release);
            from
        };

        self.log(
            "info",
            "wizard.transition.started",
            &format!("{from} -> {target}"),
        );
        self.publish();

        if !self.transition_delay.is_zero() {
            thread::sleep(self.transition_delay);
        }

        {
            let mut state = self.lock_state();
            state.step = target;
            if from == WizardStep::Complete && target == WizardStep::Landing {
                state.draft.clear();
            }
            self.busy.store(false, Ordering::Release);
        }
        self.log(
            "info",
            "wizard.transition.applied",
            &format!("{from} -> {target}"),
        );
        self.publish();
        Ok(target)
    }

    /// Hands the confirmation view to the host print capability.
    pub fn print(&self, sink: &dyn PrintSink) -> Result<PrintOutcome, WizardError> {
        let rows = {
            let state = self.lock_state();
            if state.step != WizardStep::Complete {
                return Err(WizardError::NotPrintable { step: state.step });
            }
            review_rows(&state.draft)
        };
        let receipt = RegistrationReceipt::new(&self.institution_name, rows);
        let outcome = sink.print(&receipt)?;
        self.log("info", "wizard.print", &outcome.to_string());
        Ok(outcome)
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<WizardSnapshot>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.lock_subscribers()
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    fn log(&self, level: &str, event: &str, message: &str) {
        if let Some(path) = &self.log_path {
            append_wizard_log(path, level, event, message);
        }
    }
}
