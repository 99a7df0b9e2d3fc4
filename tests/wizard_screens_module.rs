use polyreg::registration::{Branch, FieldUpdate, RegistrationDraft};
use polyreg::wizard::navigation::NavState;
use polyreg::wizard::screens::{
    field_row, project_wizard_view_model, spinner_frame, tail_for_display,
};
use polyreg::wizard::{WizardSnapshot, WizardStep};

const INSTITUTION: &str = "Government Polytechnic College Chegunta 519";

fn snapshot(step: WizardStep, draft: RegistrationDraft) -> WizardSnapshot {
    WizardSnapshot {
        step,
        busy: false,
        draft,
    }
}

#[test]
fn wizard_screens_module_landing_shows_register_action() {
    let nav = NavState::landing();
    let vm = project_wizard_view_model(
        INSTITUTION,
        &nav,
        &snapshot(WizardStep::Landing, RegistrationDraft::default()),
    );
    assert_eq!(vm.institution, INSTITUTION);
    assert_eq!(vm.title, "Welcome");
    assert_eq!(vm.items, vec!["Register Now", "Quit"]);
    assert!(vm.rows.is_empty());
    assert!(!vm.busy);
}

#[test]
fn wizard_screens_module_entry_shows_placeholders_until_filled() {
    let mut nav = NavState::landing();
    nav.enter_step(WizardStep::Entry);
    let mut draft = RegistrationDraft::default();
    draft.apply(FieldUpdate::FullName("A. Rao".to_string()));
    draft.apply(FieldUpdate::Branch(Some(Branch::ElectricalElectronics)));

    let vm = project_wizard_view_model(INSTITUTION, &nav, &snapshot(WizardStep::Entry, draft));
    assert_eq!(vm.title, "Registration Form");
    assert_eq!(
        vm.items,
        vec![
            "Full Name: A. Rao",
            "Phone Number: <Enter your phone number>",
            "Branch: EEE",
            "PIN Number: <Enter PIN number>",
            "Caste Category: <Select your caste category>",
            "Continue to Review",
        ]
    );
}

#[test]
fn wizard_screens_module_review_rows_follow_draft() {
    let mut nav = NavState::landing();
    nav.enter_step(WizardStep::Review);
    let mut draft = RegistrationDraft::default();
    draft.apply(FieldUpdate::PinNumber("123456".to_string()));

    let vm = project_wizard_view_model(INSTITUTION, &nav, &snapshot(WizardStep::Review, draft));
    assert_eq!(vm.title, "Review Details");
    assert_eq!(vm.items, vec!["Edit Details", "Confirm Registration"]);
    assert_eq!(vm.rows.len(), 5);
    assert_eq!(vm.rows[3], field_row("PIN", Some("123456".to_string())));
    assert_eq!(vm.rows[0], field_row("Name", Some(String::new())));
}

#[test]
fn wizard_screens_module_stale_cursor_resets_and_busy_passes_through() {
    let mut nav = NavState::landing();
    nav.selected = 1;
    let mut busy = snapshot(WizardStep::Complete, RegistrationDraft::default());
    busy.busy = true;

    let vm = project_wizard_view_model(INSTITUTION, &nav, &busy);
    assert_eq!(vm.title, "Registration Complete");
    assert_eq!(vm.items, vec!["Print Details", "New Registration"]);
    assert_eq!(vm.selected, 0);
    assert!(vm.busy);
}

#[test]
fn wizard_screens_module_spinner_and_tail_helpers() {
    let frames: String = (0..5).map(spinner_frame).collect();
    assert_eq!(frames, "|/-\\|");
    assert_eq!(tail_for_display("9876543210", 4), "3210");
    assert_eq!(tail_for_display("abc", 10), "abc");
    assert_eq!(tail_for_display("abc", 0), "");
}
