use crate::config::{default_state_root, load_global_settings, Settings};
use crate::registration::DraftField;
use crate::shared::logging::{append_wizard_log, wizard_log_path};
use crate::wizard::navigation::{
    parse_scripted_keys, wizard_action_from_key, wizard_transition, NavState, ScriptedInput,
    WizardNavEffect,
};
use crate::wizard::screens::{
    draw_choice_prompt, draw_line_prompt, draw_wizard_ui, project_wizard_view_model,
};
use crate::wizard::{
    FilePrintSink, PrintOutcome, PrintSink, WizardController, WizardError, WizardSnapshot, WizardStep,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const SCRIPT_KEYS_ENV: &str = "POLYREG_SCRIPT_KEYS";

type WizardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn cmd_register() -> Result<String, String> {
    let settings = load_global_settings().map_err(|err| err.to_string())?;
    let state_root = default_state_root().map_err(|err| err.to_string())?;
    let controller = build_controller(&settings, &state_root);
    let sink = FilePrintSink::new(settings.resolve_print_dir(&state_root));

    let session = if let Some(inputs) = load_scripted_inputs()? {
        run_wizard_scripted(&controller, &sink, inputs)?
    } else if is_interactive_terminal() {
        run_wizard_tui(Arc::new(controller), &sink)?
    } else {
        return Err(format!(
            "register requires an interactive terminal; set {SCRIPT_KEYS_ENV} for scripted runs"
        ));
    };
    Ok(session.render())
}

fn build_controller(settings: &Settings, state_root: &std::path::Path) -> WizardController {
    let controller = WizardController::new(settings.transition_delay())
        .with_institution_name(&settings.institution_name);
    if settings.log_enabled {
        let log_path = wizard_log_path(state_root);
        append_wizard_log(&log_path, "info", "register.start", "wizard session opened");
        controller.with_log_path(log_path)
    } else {
        controller
    }
}

fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_inputs() -> Result<Option<Vec<ScriptedInput>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

/// Summary printed when the wizard closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    pub final_snapshot: WizardSnapshot,
    pub completed_registrations: usize,
    pub receipts: Vec<String>,
}

impl WizardSession {
    fn new(final_snapshot: WizardSnapshot) -> Self {
        Self {
            final_snapshot,
            completed_registrations: 0,
            receipts: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            "registration wizard closed".to_string(),
            format!("step={}", self.final_snapshot.step),
            format!("completed_registrations={}", self.completed_registrations),
        ];
        for field in DraftField::ALL {
            lines.push(format!(
                "{}={}",
                field.as_str(),
                self.final_snapshot.draft.value_text(field)
            ));
        }
        for receipt in &self.receipts {
            lines.push(format!("receipt={receipt}"));
        }
        lines.join("\n")
    }
}

fn run_wizard_scripted(
    controller: &WizardController,
    sink: &dyn PrintSink,
    inputs: Vec<ScriptedInput>,
) -> Result<WizardSession, String> {
    let mut nav = NavState::landing();
    let mut session = WizardSession::new(controller.snapshot());
    let mut pending_field: Option<DraftField> = None;

    for input in inputs {
        let key = match input {
            ScriptedInput::Text(value) => {
                let Some(field) = pending_field.take() else {
                    return Err(format!(
                        "scripted value `{value}` has no open field prompt; press enter on a field first"
                    ));
                };
                nav.status_text = apply_field_value(controller, field, &value);
                continue;
            }
            ScriptedInput::Key(key) => key,
        };
        if let Some(field) = pending_field {
            return Err(format!(
                "scripted prompt for `{}` expects a set:<value> token",
                field.as_str()
            ));
        }
        let Some(action) = wizard_action_from_key(nav.step, key) else {
            continue;
        };
        let transition = wizard_transition(&mut nav, action, &controller.draft())
            .map_err(|err| err.to_string())?;
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        match transition.effect {
            WizardNavEffect::None => {}
            WizardNavEffect::EditField(field) => pending_field = Some(field),
            WizardNavEffect::GoTo(target) => {
                let result = controller.go_to(target);
                apply_transition_result(&mut nav, &mut session, result);
            }
            WizardNavEffect::Print => {
                nav.status_text = print_receipt(controller, sink, &mut session);
            }
            WizardNavEffect::Exit => {
                session.final_snapshot = controller.snapshot();
                return Ok(session);
            }
        }
    }
    Err("scripted registration did not terminate; include esc on the landing page or ctrl-c"
        .to_string())
}

fn apply_field_value(controller: &WizardController, field: DraftField, raw: &str) -> String {
    match field.parse_update(raw) {
        Ok(update) => {
            controller.update_field(update);
            format!("{} updated", field.label())
        }
        Err(err) => err,
    }
}

fn apply_transition_result(
    nav: &mut NavState,
    session: &mut WizardSession,
    result: Result<WizardStep, WizardError>,
) {
    match result {
        Ok(step) => {
            if step == WizardStep::Complete {
                session.completed_registrations += 1;
            }
            nav.enter_step(step);
        }
        Err(err) => nav.status_text = err.to_string(),
    }
}

fn print_receipt(
    controller: &WizardController,
    sink: &dyn PrintSink,
    session: &mut WizardSession,
) -> String {
    match controller.print(sink) {
        Ok(outcome) => {
            if let PrintOutcome::File(path) = &outcome {
                session.receipts.push(path.display().to_string());
            }
            outcome.to_string()
        }
        Err(err) => err.to_string(),
    }
}

fn run_wizard_tui(
    controller: Arc<WizardController>,
    sink: &dyn PrintSink,
) -> Result<WizardSession, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let result = run_wizard_tui_loop(&controller, sink, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    result
}

fn run_wizard_tui_loop(
    controller: &Arc<WizardController>,
    sink: &dyn PrintSink,
    terminal: &mut WizardTerminal,
) -> Result<WizardSession, String> {
    let updates: Receiver<WizardSnapshot> = controller.subscribe();
    let mut nav = NavState::landing();
    let mut session = WizardSession::new(controller.snapshot());
    let mut snapshot = controller.snapshot();
    let mut pending: Option<JoinHandle<Result<WizardStep, WizardError>>> = None;
    let mut tick = 0usize;

    loop {
        if let Some(latest) = updates.try_iter().last() {
            snapshot = latest;
        }
        if pending.as_ref().is_some_and(|handle| handle.is_finished()) {
            if let Some(handle) = pending.take() {
                let result = handle
                    .join()
                    .map_err(|_| "wizard transition worker panicked".to_string())?;
                apply_transition_result(&mut nav, &mut session, result);
                snapshot = controller.snapshot();
            }
        }

        let view_model = project_wizard_view_model(controller.institution_name(), &nav, &snapshot);
        terminal
            .draw(|frame| draw_wizard_ui(frame, &view_model, tick))
            .map_err(|e| format!("failed to render wizard ui: {e}"))?;
        tick = tick.wrapping_add(1);

        if !event::poll(Duration::from_millis(100))
            .map_err(|e| format!("failed to poll wizard input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if pending.is_some() || snapshot.busy {
            continue;
        }
        let Some(action) = wizard_action_from_key(nav.step, key) else {
            continue;
        };
        let transition = match wizard_transition(&mut nav, action, &controller.draft()) {
            Ok(transition) => transition,
            Err(err) => {
                nav.status_text = err.to_string();
                continue;
            }
        };
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        match transition.effect {
            WizardNavEffect::None => {}
            WizardNavEffect::EditField(field) => {
                nav.status_text = edit_field_tui(terminal, controller, field)?;
            }
            WizardNavEffect::GoTo(target) => {
                let worker = Arc::clone(controller);
                pending = Some(thread::spawn(move || worker.go_to(target)));
            }
            WizardNavEffect::Print => {
                nav.status_text = print_receipt(controller, sink, &mut session);
            }
            WizardNavEffect::Exit => {
                if let Some(handle) = pending.take() {
                    let _ = handle.join();
                }
                session.final_snapshot = controller.snapshot();
                return Ok(session);
            }
        }
    }
}

fn edit_field_tui(
    terminal: &mut WizardTerminal,
    controller: &WizardController,
    field: DraftField,
) -> Result<String, String> {
    let current = controller.draft().value_text(field);
    if field.is_choice() {
        let options = field.choice_options();
        let codes = field.choice_codes();
        let initial = codes
            .iter()
            .position(|code| *code == current)
            .unwrap_or(0);
        let Some(index) = prompt_select_index_tui(terminal, field.label(), &options, initial)?
        else {
            return Ok(format!("{} unchanged", field.label()));
        };
        let code = codes.get(index).copied().unwrap_or("");
        return Ok(apply_field_value(controller, field, code));
    }
    match prompt_line_tui(terminal, field.label(), field.placeholder(), &current)? {
        Some(value) => Ok(apply_field_value(controller, field, &value)),
        None => Ok(format!("{} unchanged", field.label())),
    }
}

fn prompt_line_tui(
    terminal: &mut WizardTerminal,
    title: &str,
    prompt: &str,
    initial: &str,
) -> Result<Option<String>, String> {
    let mut value = initial.to_string();
    loop {
        terminal
            .draw(|frame| draw_line_prompt(frame, title, prompt, &value))
            .map_err(|e| format!("failed to render prompt: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read prompt input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => return Ok(Some(value)),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            _ => {}
        }
    }
}

fn prompt_select_index_tui(
    terminal: &mut WizardTerminal,
    title: &str,
    options: &[String],
    initial_selected: usize,
) -> Result<Option<usize>, String> {
    let mut selected = initial_selected.min(options.len().saturating_sub(1));
    loop {
        terminal
            .draw(|frame| draw_choice_prompt(frame, title, options, selected))
            .map_err(|e| format!("failed to render selection prompt: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read selection input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => {
                selected = std::cmp::min(selected + 1, options.len().saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
                return Ok(Some(selected))
            }
            _ => {}
        }
    }
}
