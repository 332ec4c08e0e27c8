//! Keyboard dispatch.
//!
//! Order matters: an open overlay captures everything, then the Ask
//! panel captures printable keys for its input line, then panel-local
//! bindings, then the global bindings (quit, panel switching, help).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Overlay, Panel};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != crossterm::event::KeyEventKind::Press {
        return;
    }

    match app.overlay {
        Overlay::Help => handle_help_overlay(app, key),
        Overlay::Search => handle_search_overlay(app, key),
        Overlay::Filter => handle_filter_overlay(app, key),
        Overlay::ErrorHistory => handle_error_overlay(app, key),
        Overlay::None => handle_main(app, key),
    }
}

fn handle_main(app: &mut App, key: KeyEvent) {
    // Ctrl-C always quits, even while typing a query.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    if app.active_panel == Panel::Ask && handle_ask_input(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('!') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Tab => app.active_panel = app.active_panel.next(),
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),
        KeyCode::Char('1') => app.active_panel = Panel::Overview,
        KeyCode::Char('2') => app.active_panel = Panel::Table,
        KeyCode::Char('3') => app.active_panel = Panel::Drilldown,
        KeyCode::Char('4') => app.active_panel = Panel::TopPicks,
        KeyCode::Char('5') => app.active_panel = Panel::Ask,
        _ => handle_panel(app, key),
    }
}

fn handle_panel(app: &mut App, key: KeyEvent) {
    match app.active_panel {
        Panel::Table => handle_table(app, key),
        Panel::Drilldown => handle_drilldown(app, key),
        // Overview and Top Picks are display-only.
        Panel::Overview | Panel::TopPicks | Panel::Ask => {}
    }
}

fn handle_table(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_table_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_table_cursor(-1),
        KeyCode::PageDown => app.move_table_cursor(10),
        KeyCode::PageUp => app.move_table_cursor(-10),
        KeyCode::Char('s') => app.cycle_sort_key(),
        KeyCode::Char('r') => app.toggle_sort_direction(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('f') => {
            app.filter_cursor = 0;
            app.overlay = Overlay::Filter;
        }
        KeyCode::Char('e') => app.export_filtered(),
        KeyCode::Char('E') => app.export_full(),
        KeyCode::Enter => app.drill_into_selection(),
        _ => {}
    }
}

fn handle_drilldown(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_drill_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_drill_cursor(-1),
        _ => {}
    }
}

/// Returns true when the key was consumed by the query input line.
/// Tab, Shift-Tab and Ctrl-C stay global so the panel can be left.
fn handle_ask_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ask_input.push(c);
            true
        }
        KeyCode::Backspace => {
            app.ask_input.pop();
            true
        }
        KeyCode::Enter => {
            app.run_query();
            true
        }
        KeyCode::Esc => {
            app.ask_input.clear();
            app.ask_result = None;
            true
        }
        _ => false,
    }
}

fn handle_help_overlay(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_search_overlay(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => app.apply_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

fn handle_filter_overlay(app: &mut App, key: KeyEvent) {
    let item_count = app.filter_items().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => app.overlay = Overlay::None,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.filter_cursor + 1 < item_count {
                app.filter_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.filter_cursor = app.filter_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_filter_item(),
        KeyCode::Char('a') => app.reset_filters(),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('!') => app.overlay = Overlay::None,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
