use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::MonitorApp;

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &MonitorApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Metrics
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_metrics(frame, chunks[0], app);
    render_status(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);
}

/// Lines are shown exactly as the aggregators produced them
fn render_metrics(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let (title, lines): (&str, Vec<Line>) = if app.compact {
        let lines = app
            .summary
            .as_ref()
            .map(|s| s.lines().iter().map(|l| Line::from(*l)).collect())
            .unwrap_or_default();
        (" System Monitor (compact) ", lines)
    } else {
        let lines = app
            .lines
            .iter()
            .map(|l| Line::from(l.text.as_str()))
            .collect();
        (" System Monitor ", lines)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let mut spans = Vec::new();
    if app.is_recording() {
        spans.push(Span::styled(
            " ● REC ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(status) = &app.status {
        spans.push(Span::raw(format!(" {}", status)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let view = if app.compact { "Show More" } else { "Show Less" };
    let help = format!(
        " q: Quit │ m: {} │ r: Record │ s: Screenshot ",
        view
    );
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
