//! TUI rendering.
//!
//! One draw function per tab, plus the shared header and status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use crate::app::{App, FormField, StatusKind, Tab};
use crate::team::MAX_AVAILABILITY;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    match app.tab {
        Tab::Analyze => draw_analyze_tab(frame, app, chunks[1]),
        Tab::Tasks => draw_tasks_tab(frame, app, chunks[1]),
        Tab::Assign => draw_assign_tab(frame, app, chunks[1]),
        Tab::Overview => draw_overview_tab(frame, app, chunks[1]),
        Tab::Team => draw_team_tab(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);
}

/// Draw the header with the tab bar.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(Span::styled(
                    " crewplan ",
                    Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Analyze tab: description input on top, analysis text below.
fn draw_analyze_tab(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(area);

    let input = Paragraph::new(app.description.as_str())
        .style(Style::default().fg(app.theme.text))
        .block(titled_block(app, "Project Description"));
    frame.render_widget(input, chunks[0]);
    set_description_cursor(frame, app, chunks[0]);

    let body = match app.session.project_analysis.as_deref() {
        Some(analysis) => Paragraph::new(analysis).style(Style::default().fg(app.theme.text)),
        None => Paragraph::new("Describe your project above, then press Ctrl+R to analyze it.")
            .style(Style::default().fg(app.theme.text_dim)),
    };
    frame.render_widget(
        body.wrap(Wrap { trim: false })
            .scroll((app.result_scroll, 0))
            .block(titled_block(app, "Analysis")),
        chunks[1],
    );
}

/// Place the terminal cursor inside the description input.
fn set_description_cursor(frame: &mut Frame, app: &App, area: Rect) {
    let before = &app.description[..app.cursor_position];
    let line = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().unwrap_or("").chars().count() as u16;

    let x = area.x + 1 + col;
    let y = area.y + 1 + line;
    if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
        frame.set_cursor_position((x, y));
    }
}

/// Tasks tab: generated task list, or guidance toward the earlier stage.
fn draw_tasks_tab(frame: &mut Frame, app: &App, area: Rect) {
    let body = match (app.session.tasks.as_deref(), app.session.project_analysis.as_deref()) {
        (Some(tasks), _) => Paragraph::new(tasks).style(Style::default().fg(app.theme.text)),
        (None, Some(_)) => Paragraph::new("Press Enter to generate tasks from the analysis.")
            .style(Style::default().fg(app.theme.text_dim)),
        (None, None) => {
            Paragraph::new("Please analyze the project first (Project Analysis tab).")
                .style(Style::default().fg(app.theme.warning))
        }
    };
    frame.render_widget(
        body.wrap(Wrap { trim: false })
            .scroll((app.result_scroll, 0))
            .block(titled_block(app, "Tasks")),
        area,
    );
}

/// Assign tab: assignments beside a per-member workload panel.
fn draw_assign_tab(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(area);

    let body = match app.session.assignments.as_deref() {
        Some(assignments) => {
            Paragraph::new(assignments).style(Style::default().fg(app.theme.text))
        }
        None if app.session.tasks.is_none() => {
            Paragraph::new("Please generate tasks first (Tasks tab).")
                .style(Style::default().fg(app.theme.warning))
        }
        None if app.store.is_empty() => {
            Paragraph::new("Please add team members first (Team tab).")
                .style(Style::default().fg(app.theme.warning))
        }
        None => Paragraph::new("Press Enter to match tasks to your team.")
            .style(Style::default().fg(app.theme.text_dim)),
    };
    frame.render_widget(
        body.wrap(Wrap { trim: false })
            .scroll((app.result_scroll, 0))
            .block(titled_block(app, "Task Assignments")),
        chunks[0],
    );

    draw_workload_panel(frame, app, chunks[1]);
}

/// Per-member availability bars.
fn draw_workload_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (name, profile) in app.store.roster() {
        let hours = profile.availability();
        let filled = ((hours * 10 / MAX_AVAILABILITY) as usize).min(10);
        lines.push(Line::from(vec![
            Span::styled(format!("{name:<14.14}"), Style::default().fg(app.theme.text)),
            Span::styled("█".repeat(filled), Style::default().fg(app.theme.secondary)),
            Span::styled("░".repeat(10 - filled), Style::default().fg(app.theme.border)),
            Span::styled(format!(" {hours}h/week"), Style::default().fg(app.theme.text_dim)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::styled("No team members yet", Style::default().fg(app.theme.text_dim)));
    }

    frame.render_widget(Paragraph::new(lines).block(titled_block(app, "Team Workload")), area);
}

/// Overview tab: aggregate metrics and the skills matrix.
fn draw_overview_tab(frame: &mut Frame, app: &App, area: Rect) {
    let overview = app.overview();

    if overview.member_count == 0 {
        let empty = Paragraph::new("No team members added yet (Team tab).")
            .style(Style::default().fg(app.theme.text_dim))
            .block(titled_block(app, "Team Overview"));
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let metrics = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[0]);

    draw_metric(frame, app, metrics[0], "Team Size", overview.member_count);
    draw_metric(frame, app, metrics[1], "Total Skills", overview.distinct_skill_count());
    draw_metric(frame, app, metrics[2], "Senior Members", overview.senior_count);

    let mut widths = vec![Constraint::Length(16)];
    let header_cells: Vec<Cell> = std::iter::once(Cell::from("Member"))
        .chain(overview.skills.iter().map(|s| {
            widths.push(Constraint::Length((s.chars().count() as u16).max(3)));
            Cell::from(s.as_str())
        }))
        .collect();
    let header = Row::new(header_cells)
        .style(Style::default().fg(app.theme.secondary).add_modifier(Modifier::BOLD));

    let rows = overview.matrix.iter().map(|row| {
        let cells: Vec<Cell> = std::iter::once(Cell::from(row.name.as_str()))
            .chain(row.has_skill.iter().map(|has| Cell::from(if *has { "✓" } else { "" })))
            .collect();
        Row::new(cells).style(Style::default().fg(app.theme.text))
    });

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(app, "Team Skills Matrix"));
    frame.render_widget(table, chunks[1]);
}

/// One metric box with a big number and a label.
fn draw_metric(frame: &mut Frame, app: &App, area: Rect, label: &str, value: usize) {
    let line = Line::from(vec![
        Span::styled(
            value.to_string(),
            Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {label}"), Style::default().fg(app.theme.text_dim)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        ),
        area,
    );
}

/// Team tab: add-member form beside the member list.
fn draw_team_tab(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(20)])
        .split(area);

    draw_member_form(frame, app, chunks[0]);
    draw_member_list(frame, app, chunks[1]);
}

fn draw_member_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let experience = form.experience_level();

    let field_line = |field: FormField, label: &str, value: String| {
        let focused = form.field == field;
        let label_style = if focused {
            Style::default().fg(app.theme.secondary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        let marker = if focused { "› " } else { "  " };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<13}"), label_style),
            Span::styled(value, Style::default().fg(app.theme.text)),
        ])
    };

    let lines = vec![
        field_line(FormField::Name, "Name", form.name.clone()),
        field_line(FormField::Skills, "Skills", form.skills.clone()),
        field_line(FormField::Experience, "Experience", format!("‹ {experience} ›")),
        field_line(FormField::Role, "Role", form.role.clone()),
        field_line(
            FormField::Availability,
            "Availability",
            format!("‹ {} h/week ›", form.availability),
        ),
        Line::default(),
        Line::styled(
            "Enter: add member   Ctrl+D: remove by name",
            Style::default().fg(app.theme.text_dim),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(app, "Add Team Member")),
        area,
    );
}

fn draw_member_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (name, profile) in app.store.roster() {
        lines.push(Line::from(vec![
            Span::styled(
                name.clone(),
                Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} ({}, {}h/week)",
                    profile.role(),
                    profile.experience,
                    profile.availability()
                ),
                Style::default().fg(app.theme.text_dim),
            ),
        ]));
        lines.push(Line::styled(
            format!("    {}", profile.skills.join(", ")),
            Style::default().fg(app.theme.text_dim),
        ));
    }
    if lines.is_empty() {
        lines.push(Line::styled(
            "No team members yet - fill in the form to add one",
            Style::default().fg(app.theme.text_dim),
        ));
    }

    let title = format!("Team Members ({})", app.store.len());
    frame.render_widget(
        Paragraph::new(lines)
            .scroll((app.result_scroll, 0))
            .block(titled_block(app, &title)),
        area,
    );
}

/// Draw the status bar: active status message, or key hints for the tab.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => app.theme.text,
            StatusKind::Success => app.theme.success,
            StatusKind::Warning => app.theme.warning,
            StatusKind::Error => app.theme.error,
        };
        Line::styled(format!(" {}", status.text), Style::default().fg(color))
    } else {
        let hints = match app.tab {
            Tab::Analyze => "Type a description · Ctrl+R: analyze · Tab: next tab · Esc: quit",
            Tab::Tasks => "Enter: generate tasks · Tab: next tab · Esc: quit",
            Tab::Assign => "Enter: assign tasks · Tab: next tab · Esc: quit",
            Tab::Overview => "Tab: next tab · Esc: quit",
            Tab::Team => "Up/Down: field · Enter: add · Ctrl+D: remove · Tab: next tab",
        };
        Line::styled(format!(" {hints}"), Style::default().fg(app.theme.text_dim))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Standard bordered block with a themed title.
fn titled_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(title, Style::default().fg(app.theme.secondary)))
}
