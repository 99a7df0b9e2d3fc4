use super::controller::WizardSnapshot;
use super::navigation::{
    clamp_selection, wizard_item_count, NavState, COMPLETE_ITEMS, ENTRY_CONTINUE_ITEM,
    LANDING_ITEMS, REVIEW_ITEMS,
};
use super::step::WizardStep;
use crate::registration::{review_rows, DraftField};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Padding, Paragraph, Row, Table};
use ratatui::Frame;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardFieldRow {
    pub field: String,
    pub value: Option<String>,
}

pub fn field_row(field: &str, value: Option<String>) -> WizardFieldRow {
    WizardFieldRow {
        field: field.to_string(),
        value,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub institution: String,
    pub title: String,
    pub rows: Vec<WizardFieldRow>,
    pub items: Vec<String>,
    pub selected: usize,
    pub status_text: String,
    pub hint_text: String,
    pub busy: bool,
}

/// Projects controller state and cursor into what the current step renders.
/// Entry lists one item per field plus the continue action; review and
/// complete show the draft as read-only rows above their actions.
pub fn project_wizard_view_model(
    institution: &str,
    nav: &NavState,
    snapshot: &WizardSnapshot,
) -> WizardViewModel {
    let step = snapshot.step;
    let (rows, items) = match step {
        WizardStep::Landing => (Vec::new(), to_strings(&LANDING_ITEMS)),
        WizardStep::Entry => {
            let mut items: Vec<String> = DraftField::ALL
                .iter()
                .map(|field| entry_item(*field, &snapshot.draft.value_text(*field)))
                .collect();
            items.push(ENTRY_CONTINUE_ITEM.to_string());
            (Vec::new(), items)
        }
        WizardStep::Review => (draft_rows(snapshot), to_strings(&REVIEW_ITEMS)),
        WizardStep::Complete => (draft_rows(snapshot), to_strings(&COMPLETE_ITEMS)),
    };
    let selected = if nav.step == step {
        nav.selected
    } else {
        0
    };
    WizardViewModel {
        institution: institution.to_string(),
        title: step.title().to_string(),
        rows,
        items,
        selected: clamp_selection(selected, wizard_item_count(step)),
        status_text: nav.status_text.clone(),
        hint_text: nav.hint_text.clone(),
        busy: snapshot.busy,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn entry_item(field: DraftField, value: &str) -> String {
    if value.is_empty() {
        format!("{}: <{}>", field.label(), field.placeholder())
    } else {
        format!("{}: {value}", field.label())
    }
}

fn draft_rows(snapshot: &WizardSnapshot) -> Vec<WizardFieldRow> {
    review_rows(&snapshot.draft)
        .into_iter()
        .map(|row| field_row(&row.label, Some(row.value)))
        .collect()
}

pub fn spinner_frame(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn draw_wizard_ui(frame: &mut Frame<'_>, view_model: &WizardViewModel, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.institution.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(view_model.title.clone()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let body = main_panel_block();
    let inner = body.inner(chunks[1]);
    frame.render_widget(body, chunks[1]);
    let list_area = if view_model.rows.is_empty() {
        inner
    } else {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(view_model.rows.len() as u16 + 1),
                Constraint::Min(2),
            ])
            .split(inner);
        let table_rows = view_model.rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(format!("{}:", row.field)),
                Cell::from(row.value.clone().unwrap_or_default()),
            ])
        });
        let table = Table::new(
            table_rows,
            [Constraint::Percentage(30), Constraint::Percentage(70)],
        )
        .column_spacing(2);
        frame.render_widget(table, split[0]);
        split[1]
    };

    let mut items = Vec::with_capacity(view_model.items.len());
    for (idx, label) in view_model.items.iter().enumerate() {
        let mut item = ListItem::new(Line::from(Span::raw(label.clone())));
        if idx == view_model.selected {
            item = item.style(selected_style());
        }
        items.push(item);
    }
    frame.render_widget(List::new(items), list_area);

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(format!("Status: {}", view_model.status_text)),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    if view_model.busy {
        draw_busy_overlay(frame, tick);
    }
}

fn draw_busy_overlay(frame: &mut Frame<'_>, tick: usize) {
    let area = centered_rect(30, 20, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(Line::from(format!("{} Processing...", spinner_frame(tick))))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::new(1, 1, 1, 1)),
        );
    frame.render_widget(popup, area);
}

pub(crate) fn draw_line_prompt(frame: &mut Frame<'_>, title: &str, prompt: &str, value: &str) {
    let area = centered_rect(70, 30, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);
    let max_input_width = rows[3].width.saturating_sub(2) as usize;
    let display_value = tail_for_display(value, max_input_width);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(Paragraph::new(prompt.to_string()), rows[2]);
    frame.render_widget(
        Paragraph::new(Line::from(format!("> {display_value}"))),
        rows[3],
    );
    frame.render_widget(Paragraph::new("Enter apply, Esc cancel"), rows[4]);
    frame.set_cursor_position((
        rows[3].x + 2 + display_value.chars().count() as u16,
        rows[3].y,
    ));
}

pub(crate) fn draw_choice_prompt(
    frame: &mut Frame<'_>,
    title: &str,
    options: &[String],
    selected: usize,
) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let mut items = Vec::with_capacity(options.len());
    for (idx, option) in options.iter().enumerate() {
        let mut item = ListItem::new(Line::from(Span::raw(option.clone())));
        if idx == selected {
            item = item.style(selected_style());
        }
        items.push(item);
    }
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{title} (Enter select, Esc cancel)"))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(list, area);
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 1, 1))
}
