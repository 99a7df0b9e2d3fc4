use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use polyreg::registration::{Branch, CasteCategory, DraftField, FieldUpdate, RegistrationDraft};
use polyreg::wizard::navigation::{
    parse_scripted_keys, wizard_action_from_key, wizard_transition, NavState, ScriptedInput,
    WizardAction, WizardNavEffect,
};
use polyreg::wizard::WizardStep;

fn complete_draft() -> RegistrationDraft {
    let mut draft = RegistrationDraft::default();
    draft.apply(FieldUpdate::FullName("A. Rao".to_string()));
    draft.apply(FieldUpdate::PhoneNumber("9876543210".to_string()));
    draft.apply(FieldUpdate::Branch(Some(Branch::Mechanical)));
    draft.apply(FieldUpdate::PinNumber("123456".to_string()));
    draft.apply(FieldUpdate::CasteCategory(Some(CasteCategory::Obc)));
    draft
}

fn nav_at(step: WizardStep, selected: usize) -> NavState {
    let mut nav = NavState::landing();
    nav.enter_step(step);
    nav.selected = selected;
    nav
}

#[test]
fn wizard_navigation_module_landing_register_now_goes_to_entry() {
    let mut nav = NavState::landing();
    let transition = wizard_transition(&mut nav, WizardAction::Enter, &RegistrationDraft::default())
        .expect("transition");
    assert_eq!(transition.effect, WizardNavEffect::GoTo(WizardStep::Entry));
}

#[test]
fn wizard_navigation_module_landing_quit_and_esc_exit() {
    let draft = RegistrationDraft::default();
    let mut nav = nav_at(WizardStep::Landing, 1);
    let transition = wizard_transition(&mut nav, WizardAction::Enter, &draft).expect("quit");
    assert_eq!(transition.effect, WizardNavEffect::Exit);

    let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(
        wizard_action_from_key(WizardStep::Landing, esc),
        Some(WizardAction::Cancel)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::Review, esc),
        Some(WizardAction::Back)
    );
}

#[test]
fn wizard_navigation_module_entry_items_open_field_editors() {
    let draft = RegistrationDraft::default();
    for (index, field) in DraftField::ALL.iter().enumerate() {
        let mut nav = nav_at(WizardStep::Entry, index);
        let transition = wizard_transition(&mut nav, WizardAction::Enter, &draft).expect("edit");
        assert_eq!(transition.effect, WizardNavEffect::EditField(*field));
    }
}

#[test]
fn wizard_navigation_module_continue_requires_complete_draft() {
    let mut draft = complete_draft();
    draft.apply(FieldUpdate::PhoneNumber(String::new()));
    let mut nav = nav_at(WizardStep::Entry, DraftField::ALL.len());

    let blocked = wizard_transition(&mut nav, WizardAction::Enter, &draft).expect("continue");
    assert_eq!(blocked.effect, WizardNavEffect::None);
    assert_eq!(
        blocked.feedback.as_deref(),
        Some("Complete required fields: Phone Number")
    );

    let allowed =
        wizard_transition(&mut nav, WizardAction::Enter, &complete_draft()).expect("continue");
    assert_eq!(allowed.effect, WizardNavEffect::GoTo(WizardStep::Review));
}

#[test]
fn wizard_navigation_module_review_actions() {
    let draft = complete_draft();
    let mut edit = nav_at(WizardStep::Review, 0);
    assert_eq!(
        wizard_transition(&mut edit, WizardAction::Enter, &draft)
            .expect("edit")
            .effect,
        WizardNavEffect::GoTo(WizardStep::Entry)
    );

    let mut confirm = nav_at(WizardStep::Review, 1);
    assert_eq!(
        wizard_transition(&mut confirm, WizardAction::Enter, &draft)
            .expect("confirm")
            .effect,
        WizardNavEffect::GoTo(WizardStep::Complete)
    );

    let mut back = nav_at(WizardStep::Review, 1);
    assert_eq!(
        wizard_transition(&mut back, WizardAction::Back, &draft)
            .expect("back")
            .effect,
        WizardNavEffect::GoTo(WizardStep::Entry)
    );
}

#[test]
fn wizard_navigation_module_complete_actions() {
    let draft = complete_draft();
    let mut nav = nav_at(WizardStep::Complete, 0);
    assert_eq!(
        wizard_transition(&mut nav, WizardAction::Enter, &draft)
            .expect("print")
            .effect,
        WizardNavEffect::Print
    );
    assert_eq!(
        wizard_transition(&mut nav, WizardAction::Restart, &draft)
            .expect("restart")
            .effect,
        WizardNavEffect::GoTo(WizardStep::Landing)
    );

    let mut nav = nav_at(WizardStep::Complete, 1);
    assert_eq!(
        wizard_transition(&mut nav, WizardAction::Enter, &draft)
            .expect("new registration")
            .effect,
        WizardNavEffect::GoTo(WizardStep::Landing)
    );
    let back = wizard_transition(&mut nav, WizardAction::Back, &draft).expect("back");
    assert_eq!(back.effect, WizardNavEffect::None);
    assert!(back.feedback.is_some());
}

#[test]
fn wizard_navigation_module_rejects_actions_outside_their_step() {
    let draft = RegistrationDraft::default();
    let mut nav = NavState::landing();
    let err = wizard_transition(&mut nav, WizardAction::Print, &draft).expect_err("no print");
    assert_eq!(
        err.to_string(),
        "action not available: step=landing action=print"
    );

    let mut nav = nav_at(WizardStep::Review, 0);
    assert!(wizard_transition(&mut nav, WizardAction::Restart, &draft).is_err());
}

#[test]
fn wizard_navigation_module_ctrl_c_cancels_everywhere() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    for step in [
        WizardStep::Landing,
        WizardStep::Entry,
        WizardStep::Review,
        WizardStep::Complete,
    ] {
        assert_eq!(
            wizard_action_from_key(step, ctrl_c),
            Some(WizardAction::Cancel)
        );
        let mut nav = nav_at(step, 0);
        let transition = wizard_transition(&mut nav, WizardAction::Cancel, &complete_draft())
            .expect("cancel");
        assert_eq!(transition.effect, WizardNavEffect::Exit);
    }
}

#[test]
fn wizard_navigation_module_parses_scripted_keys() {
    let inputs = parse_scripted_keys("enter, down ,set:MEC,ctrl-c,,p").expect("parse");
    assert_eq!(
        inputs,
        vec![
            ScriptedInput::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            ScriptedInput::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            ScriptedInput::Text("MEC".to_string()),
            ScriptedInput::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ScriptedInput::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)),
        ]
    );

    let err = parse_scripted_keys("enter,left").expect_err("unknown token");
    assert!(err.contains("invalid POLYREG_SCRIPT_KEYS token `left`"));
}
