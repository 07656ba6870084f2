//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, FormField, Tab};
use crate::team::{Experience, MAX_AVAILABILITY};

/// Handle a key event, dispatching on the active tab.
pub fn handle_events(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global bindings first.
    match (key.code, key.modifiers) {
        (KeyCode::Char('c' | 'q'), KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        (KeyCode::Tab, _) => {
            app.next_tab();
            return;
        }
        (KeyCode::BackTab, _) => {
            app.previous_tab();
            return;
        }
        (KeyCode::Esc, _) => {
            // First Esc clears the status line, second quits.
            if app.status.is_some() {
                app.clear_status();
            } else {
                app.quit();
            }
            return;
        }
        (KeyCode::PageUp, _) => {
            app.scroll_up(10);
            return;
        }
        (KeyCode::PageDown, _) => {
            app.scroll_down(10);
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Analyze => handle_analyze_tab(key, app),
        Tab::Tasks => handle_tasks_tab(key, app),
        Tab::Assign => handle_assign_tab(key, app),
        Tab::Overview => handle_overview_tab(key, app),
        Tab::Team => handle_team_tab(key, app),
    }
}

/// Analyze tab: edit the project description, Ctrl+R runs the stage.
fn handle_analyze_tab(key: KeyEvent, app: &mut App) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => app.run_analyze(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.clear_description(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => app.enter_char(c),
        (KeyCode::Enter, _) => app.enter_char('\n'),
        (KeyCode::Backspace, _) => app.delete_char(),
        (KeyCode::Left, _) => app.move_cursor_left(),
        (KeyCode::Right, _) => app.move_cursor_right(),
        (KeyCode::Up, _) => app.scroll_up(1),
        (KeyCode::Down, _) => app.scroll_down(1),
        _ => {}
    }
}

/// Tasks tab: Ctrl+R or Enter generates tasks from the analysis.
fn handle_tasks_tab(key: KeyEvent, app: &mut App) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('r'), KeyModifiers::CONTROL) | (KeyCode::Enter, _) => {
            app.run_generate_tasks();
        }
        (KeyCode::Up, _) => app.scroll_up(1),
        (KeyCode::Down, _) => app.scroll_down(1),
        _ => {}
    }
}

/// Assign tab: Ctrl+R or Enter matches tasks to the team.
fn handle_assign_tab(key: KeyEvent, app: &mut App) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('r'), KeyModifiers::CONTROL) | (KeyCode::Enter, _) => app.run_assign(),
        (KeyCode::Up, _) => app.scroll_up(1),
        (KeyCode::Down, _) => app.scroll_down(1),
        _ => {}
    }
}

/// Overview tab: read-only, scrolling only.
fn handle_overview_tab(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        _ => {}
    }
}

/// Team tab: navigate the add-member form, Enter submits, Ctrl+D removes
/// the member named in the Name field.
fn handle_team_tab(key: KeyEvent, app: &mut App) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.remove_member_from_form(),
        (KeyCode::Enter, _) => app.add_member_from_form(),
        (KeyCode::Up, _) => app.form.field = app.form.field.previous(),
        (KeyCode::Down, _) => app.form.field = app.form.field.next(),
        (KeyCode::Left, _) => adjust_selector(app, false),
        (KeyCode::Right, _) => adjust_selector(app, true),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            if let Some(text) = app.form.focused_text_mut() {
                text.push(c);
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(text) = app.form.focused_text_mut() {
                text.pop();
            }
        }
        _ => {}
    }
}

/// Left/Right on the selector fields: cycle experience, step availability.
fn adjust_selector(app: &mut App, forward: bool) {
    match app.form.field {
        FormField::Experience => {
            let len = Experience::ALL.len();
            app.form.experience = if forward {
                (app.form.experience + 1) % len
            } else {
                (app.form.experience + len - 1) % len
            };
        }
        FormField::Availability => {
            app.form.availability = if forward {
                (app.form.availability + 1).min(MAX_AVAILABILITY)
            } else {
                app.form.availability.saturating_sub(1)
            };
        }
        _ => {}
    }
}
