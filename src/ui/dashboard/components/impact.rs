//! Impact panels
//!
//! Renders community stats from the global feed and the user's own impact

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_impact_section(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_community_stats(f, chunks[0], state);
    render_user_impact(f, chunks[1], state);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_community_stats(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines = if state.global_feed.loading {
        vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        let stats = state.community_stats();
        vec![
            stat_line("Listed", stats.listed.to_string(), Color::White),
            stat_line("Available", stats.available.to_string(), Color::LightGreen),
            stat_line("Food listed", format!("{:.1} kg", stats.total_kg), Color::LightYellow),
        ]
    };
    f.render_widget(
        Paragraph::new(lines).block(panel("LIVE COMMUNITY IMPACT")),
        area,
    );
}

fn render_user_impact(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let impact = state.impact();
    let lines = vec![
        stat_line("Food donated", impact.format_total(), Color::LightYellow),
        stat_line("Meals provided", impact.meals_provided.to_string(), Color::LightGreen),
        stat_line("CO₂ saved", format!("{} kg", impact.co2_saved_kg), Color::LightBlue),
    ];
    f.render_widget(
        Paragraph::new(lines).block(panel("YOUR REAL-TIME IMPACT")),
        area,
    );
}
