use super::step::WizardStep;
use crate::registration::{missing_fields_as_text, DraftField, RegistrationDraft};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const LANDING_STATUS_TEXT: &str = "Press Enter to start a new registration.";
const LANDING_HINT_TEXT: &str = "Up/Down move | Enter select | Esc quit";
const ENTRY_STATUS_TEXT: &str = "Fill in every field, then continue to review.";
const ENTRY_HINT_TEXT: &str = "Up/Down move | Enter edit/continue | Ctrl-C quit";
const REVIEW_STATUS_TEXT: &str = "Check your details before confirming.";
const REVIEW_HINT_TEXT: &str = "Up/Down move | Enter select | Esc edit | Ctrl-C quit";
const COMPLETE_STATUS_TEXT: &str = "Registration successful!";
const COMPLETE_HINT_TEXT: &str = "Up/Down move | Enter select | p print | r new registration";

pub const LANDING_ITEMS: [&str; 2] = ["Register Now", "Quit"];
pub const ENTRY_CONTINUE_ITEM: &str = "Continue to Review";
pub const REVIEW_ITEMS: [&str; 2] = ["Edit Details", "Confirm Registration"];
pub const COMPLETE_ITEMS: [&str; 2] = ["Print Details", "New Registration"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    MovePrev,
    MoveNext,
    Enter,
    Back,
    Print,
    Restart,
    Cancel,
}

impl WizardAction {
    fn as_str(self) -> &'static str {
        match self {
            WizardAction::MovePrev => "move_prev",
            WizardAction::MoveNext => "move_next",
            WizardAction::Enter => "enter",
            WizardAction::Back => "back",
            WizardAction::Print => "print",
            WizardAction::Restart => "restart",
            WizardAction::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub step: WizardStep,
    pub selected: usize,
    pub status_text: String,
    pub hint_text: String,
}

impl NavState {
    pub fn landing() -> Self {
        let mut state = Self {
            step: WizardStep::Landing,
            selected: 0,
            status_text: String::new(),
            hint_text: String::new(),
        };
        state.enter_step(WizardStep::Landing);
        state
    }

    /// Syncs the cursor and texts to a step the controller just applied.
    pub fn enter_step(&mut self, step: WizardStep) {
        self.step = step;
        self.selected = 0;
        let (status, hint) = match step {
            WizardStep::Landing => (LANDING_STATUS_TEXT, LANDING_HINT_TEXT),
            WizardStep::Entry => (ENTRY_STATUS_TEXT, ENTRY_HINT_TEXT),
            WizardStep::Review => (REVIEW_STATUS_TEXT, REVIEW_HINT_TEXT),
            WizardStep::Complete => (COMPLETE_STATUS_TEXT, COMPLETE_HINT_TEXT),
        };
        self.status_text = status.to_string();
        self.hint_text = hint.to_string();
    }

    pub fn clamp_selection(&mut self) {
        self.selected = clamp_selection(self.selected, wizard_item_count(self.step));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNavEffect {
    None,
    EditField(DraftField),
    GoTo(WizardStep),
    Print,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub effect: WizardNavEffect,
    pub feedback: Option<String>,
}

impl WizardTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: WizardNavEffect::None,
            feedback,
        }
    }

    fn effect(effect: WizardNavEffect) -> Self {
        Self {
            effect,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNavError {
    InvalidAction {
        step: WizardStep,
        action: WizardAction,
    },
}

impl std::fmt::Display for WizardNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardNavError::InvalidAction { step, action } => {
                write!(
                    f,
                    "action not available: step={} action={}",
                    step.as_str(),
                    action.as_str()
                )
            }
        }
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

pub fn wizard_item_count(step: WizardStep) -> usize {
    match step {
        WizardStep::Landing => LANDING_ITEMS.len(),
        WizardStep::Entry => DraftField::ALL.len() + 1,
        WizardStep::Review => REVIEW_ITEMS.len(),
        WizardStep::Complete => COMPLETE_ITEMS.len(),
    }
}

pub fn wizard_action_from_key(step: WizardStep, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(WizardAction::Cancel);
    }
    match key.code {
        KeyCode::Up => Some(WizardAction::MovePrev),
        KeyCode::Down | KeyCode::Tab => Some(WizardAction::MoveNext),
        KeyCode::Esc => Some(if step == WizardStep::Landing {
            WizardAction::Cancel
        } else {
            WizardAction::Back
        }),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(WizardAction::Enter),
        KeyCode::Char('p') => Some(WizardAction::Print),
        KeyCode::Char('r') => Some(WizardAction::Restart),
        _ => None,
    }
}

/// One token of a scripted session: a key press, or the answer to the
/// field prompt the previous key opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    Key(KeyEvent),
    Text(String),
}

pub fn parse_scripted_keys(raw: &str) -> Result<Vec<ScriptedInput>, String> {
    let mut inputs = Vec::new();
    for token in raw.split(',') {
        if let Some(text) = token.trim_start().strip_prefix("set:") {
            inputs.push(ScriptedInput::Text(text.to_string()));
            continue;
        }
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "p" => KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            "r" => KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid POLYREG_SCRIPT_KEYS token `{other}`; valid tokens: up,down,enter,esc,ctrl-c,p,r,set:<value>"
                ));
            }
        };
        inputs.push(ScriptedInput::Key(key));
    }
    Ok(inputs)
}

pub fn wizard_transition(
    state: &mut NavState,
    action: WizardAction,
    draft: &RegistrationDraft,
) -> Result<WizardTransition, WizardNavError> {
    state.clamp_selection();
    match action {
        WizardAction::MovePrev => {
            state.selected = state.selected.saturating_sub(1);
            return Ok(WizardTransition::no_op(None));
        }
        WizardAction::MoveNext => {
            let max_index = wizard_item_count(state.step).saturating_sub(1);
            state.selected = std::cmp::min(state.selected + 1, max_index);
            return Ok(WizardTransition::no_op(None));
        }
        WizardAction::Cancel => return Ok(WizardTransition::effect(WizardNavEffect::Exit)),
        _ => {}
    }

    match state.step {
        WizardStep::Landing => match action {
            WizardAction::Enter if state.selected == 0 => {
                Ok(WizardTransition::effect(WizardNavEffect::GoTo(WizardStep::Entry)))
            }
            WizardAction::Enter | WizardAction::Back => {
                Ok(WizardTransition::effect(WizardNavEffect::Exit))
            }
            _ => Err(WizardNavError::InvalidAction {
                step: state.step,
                action,
            }),
        },
        WizardStep::Entry => match action {
            WizardAction::Enter => {
                if let Some(field) = DraftField::ALL.get(state.selected) {
                    return Ok(WizardTransition::effect(WizardNavEffect::EditField(*field)));
                }
                let missing = draft.missing_fields();
                if missing.is_empty() {
                    Ok(WizardTransition::effect(WizardNavEffect::GoTo(
                        WizardStep::Review,
                    )))
                } else {
                    Ok(WizardTransition::no_op(Some(format!(
                        "Complete required fields: {}",
                        missing_fields_as_text(&missing)
                    ))))
                }
            }
            WizardAction::Back => Ok(WizardTransition::no_op(Some(
                "The registration form has no previous step.".to_string(),
            ))),
            _ => Err(WizardNavError::InvalidAction {
                step: state.step,
                action,
            }),
        },
        WizardStep::Review => match action {
            WizardAction::Enter if state.selected == 1 => Ok(WizardTransition::effect(
                WizardNavEffect::GoTo(WizardStep::Complete),
            )),
            WizardAction::Enter | WizardAction::Back => {
                Ok(WizardTransition::effect(WizardNavEffect::GoTo(WizardStep::Entry)))
            }
            _ => Err(WizardNavError::InvalidAction {
                step: state.step,
                action,
            }),
        },
        WizardStep::Complete => match action {
            WizardAction::Enter if state.selected == 0 => {
                Ok(WizardTransition::effect(WizardNavEffect::Print))
            }
            WizardAction::Print => Ok(WizardTransition::effect(WizardNavEffect::Print)),
            WizardAction::Enter | WizardAction::Restart => Ok(WizardTransition::effect(
                WizardNavEffect::GoTo(WizardStep::Landing),
            )),
            WizardAction::Back => Ok(WizardTransition::no_op(Some(
                "Registration is confirmed; choose New Registration to start over.".to_string(),
            ))),
            _ => Err(WizardNavError::InvalidAction {
                step: state.step,
                action,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_next_stops_at_last_item() {
        let mut nav = NavState::landing();
        let draft = RegistrationDraft::default();
        for _ in 0..5 {
            wizard_transition(&mut nav, WizardAction::MoveNext, &draft).expect("move");
        }
        assert_eq!(nav.selected, LANDING_ITEMS.len() - 1);
    }

    #[test]
    fn enter_step_resets_selection_and_texts() {
        let mut nav = NavState::landing();
        nav.selected = 1;
        nav.enter_step(WizardStep::Complete);
        assert_eq!(nav.selected, 0);
        assert_eq!(nav.status_text, COMPLETE_STATUS_TEXT);
        assert_eq!(nav.hint_text, COMPLETE_HINT_TEXT);
    }

    #[test]
    fn scripted_set_token_preserves_trailing_spaces() {
        let inputs = parse_scripted_keys("enter,set:A. Rao ,down").expect("parse");
        assert_eq!(inputs[1], ScriptedInput::Text("A. Rao ".to_string()));
        assert_eq!(inputs.len(), 3);
    }
}
