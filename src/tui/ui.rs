//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::Mode;
use crate::tui::app::{App, HELP};

const fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Cyan,
        Mode::Break => Color::Green,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, countdown, progress, stats, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(4),    // Countdown
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Stats
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_countdown(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_stats(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

/// Render the mode header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();
    let color = mode_color(snap.mode);
    let state = if snap.running { "running" } else { "paused" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", snap.mode.display_name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({state})"), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

/// Render the remaining time and session number.
fn render_countdown(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();

    let lines = vec![
        Line::from(Span::styled(
            snap.format_remaining(),
            Style::default()
                .fg(mode_color(snap.mode))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Session {}", snap.session_number()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(countdown, area);
}

/// Render elapsed fraction of the loaded interval.
fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mode = app.snapshot().mode;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(mode_color(mode)))
        .ratio(app.scheduler.progress().clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

/// Render session totals.
fn render_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();
    let mut spans = vec![
        Span::styled("Sessions: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            snap.completed_sessions.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Minutes Focused: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.scheduler.minutes_focused().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some((mode, at)) = app.last_completion {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Last: {mode} ended {}", at.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let stats = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(stats, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, area);
}
