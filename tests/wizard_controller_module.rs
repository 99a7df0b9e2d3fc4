use polyreg::registration::{Branch, CasteCategory, DraftField, FieldUpdate, RegistrationDraft};
use polyreg::wizard::{CapturePrintSink, WizardController, WizardError, WizardStep};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn fill_scenario_draft(controller: &WizardController) {
    controller.update_field(FieldUpdate::FullName("A. Rao".to_string()));
    controller.update_field(FieldUpdate::PhoneNumber("9876543210".to_string()));
    controller.update_field(FieldUpdate::Branch(Some(Branch::Mechanical)));
    controller.update_field(FieldUpdate::PinNumber("123456".to_string()));
    controller.update_field(FieldUpdate::CasteCategory(Some(CasteCategory::Obc)));
}

fn controller_at(step: WizardStep) -> WizardController {
    let controller = WizardController::new(Duration::ZERO);
    if step == WizardStep::Landing {
        return controller;
    }
    controller.go_to(WizardStep::Entry).expect("landing -> entry");
    if step == WizardStep::Entry {
        return controller;
    }
    fill_scenario_draft(&controller);
    controller.go_to(WizardStep::Review).expect("entry -> review");
    if step == WizardStep::Review {
        return controller;
    }
    controller.go_to(WizardStep::Complete).expect("review -> complete");
    controller
}

#[test]
fn wizard_controller_module_starts_at_landing_idle_and_empty() {
    let controller = WizardController::new(Duration::ZERO);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.step, WizardStep::Landing);
    assert!(!snapshot.busy);
    assert_eq!(snapshot.draft, RegistrationDraft::default());
}

#[test]
fn wizard_controller_module_review_projection_matches_scenario() {
    let controller = controller_at(WizardStep::Entry);
    fill_scenario_draft(&controller);

    assert_eq!(controller.go_to(WizardStep::Review).expect("review"), WizardStep::Review);
    assert_eq!(controller.step(), WizardStep::Review);

    let values: Vec<String> = controller.review().into_iter().map(|row| row.value).collect();
    assert_eq!(values, vec!["A. Rao", "9876543210", "MEC", "123456", "OBC"]);
}

#[test]
fn wizard_controller_module_rejects_review_with_missing_phone() {
    let controller = controller_at(WizardStep::Entry);
    fill_scenario_draft(&controller);
    controller.update_field(FieldUpdate::PhoneNumber(String::new()));

    let err = controller
        .go_to(WizardStep::Review)
        .expect_err("phone number is required");
    match err {
        WizardError::IncompleteDraft { missing } => {
            assert_eq!(missing, vec![DraftField::PhoneNumber]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(controller.step(), WizardStep::Entry);
    assert!(!controller.is_busy());
}

#[test]
fn wizard_controller_module_incomplete_draft_message_names_fields() {
    let controller = controller_at(WizardStep::Entry);
    let err = controller.go_to(WizardStep::Review).expect_err("empty draft");
    assert_eq!(
        err.to_string(),
        "registration is incomplete; missing: Full Name, Phone Number, Branch, PIN Number, Caste Category"
    );
}

#[test]
fn wizard_controller_module_accepts_any_non_empty_content() {
    let controller = controller_at(WizardStep::Entry);
    controller.update_field(FieldUpdate::FullName(" ".to_string()));
    controller.update_field(FieldUpdate::PhoneNumber("call me".to_string()));
    controller.update_field(FieldUpdate::Branch(Some(Branch::ElectricalElectronics)));
    controller.update_field(FieldUpdate::PinNumber("x".to_string()));
    controller.update_field(FieldUpdate::CasteCategory(Some(CasteCategory::Others)));

    assert_eq!(controller.go_to(WizardStep::Review).expect("review"), WizardStep::Review);
}

#[test]
fn wizard_controller_module_rejects_out_of_contract_transitions() {
    let controller = WizardController::new(Duration::ZERO);
    for target in [WizardStep::Landing, WizardStep::Review, WizardStep::Complete] {
        let err = controller.go_to(target).expect_err("out of contract");
        assert!(matches!(
            err,
            WizardError::InvalidTransition {
                from: WizardStep::Landing,
                ..
            }
        ));
        assert_eq!(controller.step(), WizardStep::Landing);
    }

    let controller = controller_at(WizardStep::Entry);
    let err = controller
        .go_to(WizardStep::Landing)
        .expect_err("entry has no back step");
    assert_eq!(err.to_string(), "invalid wizard transition: entry -> landing");
}

#[test]
fn wizard_controller_module_review_edit_keeps_draft() {
    let controller = controller_at(WizardStep::Review);
    controller.go_to(WizardStep::Entry).expect("review -> entry");
    assert_eq!(controller.draft().full_name, "A. Rao");
    controller.update_field(FieldUpdate::FullName("A. Rao Jr".to_string()));
    controller.go_to(WizardStep::Review).expect("entry -> review");
    assert_eq!(controller.review()[0].value, "A. Rao Jr");
}

#[test]
fn wizard_controller_module_restart_clears_draft() {
    let controller = controller_at(WizardStep::Complete);
    assert!(controller.draft().is_complete());

    controller.go_to(WizardStep::Landing).expect("complete -> landing");
    assert_eq!(controller.step(), WizardStep::Landing);
    assert_eq!(controller.draft(), RegistrationDraft::default());
}

#[test]
fn wizard_controller_module_reset_clears_draft_without_moving() {
    let controller = controller_at(WizardStep::Complete);
    controller.reset();
    let draft = controller.draft();
    for field in DraftField::ALL {
        assert_eq!(draft.value_text(field), "");
    }
    assert_eq!(controller.step(), WizardStep::Complete);
}

#[test]
fn wizard_controller_module_busy_only_during_transition() {
    let controller = Arc::new(WizardController::new(Duration::from_millis(300)));
    assert!(!controller.is_busy());

    let worker = Arc::clone(&controller);
    let handle = thread::spawn(move || worker.go_to(WizardStep::Entry));
    thread::sleep(Duration::from_millis(100));
    assert!(controller.is_busy());
    assert_eq!(controller.step(), WizardStep::Landing);

    let result = handle.join().expect("join transition");
    assert_eq!(result.expect("landing -> entry"), WizardStep::Entry);
    assert!(!controller.is_busy());
    assert_eq!(controller.step(), WizardStep::Entry);
}

#[test]
fn wizard_controller_module_second_transition_while_busy_is_rejected() {
    let controller = Arc::new(WizardController::new(Duration::from_millis(300)));
    let worker = Arc::clone(&controller);
    let handle = thread::spawn(move || worker.go_to(WizardStep::Entry));
    thread::sleep(Duration::from_millis(100));

    let err = controller
        .go_to(WizardStep::Entry)
        .expect_err("transition already in flight");
    assert!(matches!(err, WizardError::TransitionInFlight));
    assert_eq!(controller.step(), WizardStep::Landing);

    handle
        .join()
        .expect("join transition")
        .expect("first transition completes");
    assert_eq!(controller.step(), WizardStep::Entry);
}

#[test]
fn wizard_controller_module_print_requires_complete_step() {
    let sink = CapturePrintSink::new();
    let controller = controller_at(WizardStep::Review);
    let err = controller.print(&sink).expect_err("review is not printable");
    assert!(matches!(
        err,
        WizardError::NotPrintable {
            step: WizardStep::Review
        }
    ));
    assert!(sink.receipts().is_empty());

    controller.go_to(WizardStep::Complete).expect("complete");
    controller.print(&sink).expect("print receipt");
    let receipts = sink.receipts();
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].starts_with("Government Polytechnic College Chegunta 519\n"));
    assert!(receipts[0].contains("Name:    A. Rao"));
    assert!(receipts[0].contains("Caste:   OBC"));
}

#[test]
fn wizard_controller_module_writes_transition_log_lines() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("logs/wizard.log");
    let controller = WizardController::new(Duration::ZERO).with_log_path(log_path.clone());
    controller.go_to(WizardStep::Entry).expect("landing -> entry");
    let _ = controller.go_to(WizardStep::Review);

    let raw = std::fs::read_to_string(&log_path).expect("read log");
    let events: Vec<String> = raw
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            value["event"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(
        events,
        vec![
            "wizard.transition.started",
            "wizard.transition.applied",
            "wizard.transition.rejected",
        ]
    );
}
