//! Dashboard header component
//!
//! Renders the greeting, LIVE badge and tagline

use super::super::state::DashboardState;
use crate::auth::UserSession;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const DONOR_TAGLINE: &str = "Every kilo you share is a meal that reaches someone nearby.";
const RECIPIENT_TAGLINE: &str = "Find surplus food near you and claim it before it goes to waste.";

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    // Blink the badge dot every 5 ticks
    let dot = if (state.tick / 5) % 2 == 0 { "●" } else { "○" };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Welcome back, {}!", UserSession::greeting_name(state.user.as_ref())),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} LIVE ", dot),
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let tagline = if state.shows_my_feed() {
        DONOR_TAGLINE
    } else {
        RECIPIENT_TAGLINE
    };
    let subtitle = Paragraph::new(format!(
        "{}  |  FOODSHARE v{} ({})",
        tagline,
        env!("CARGO_PKG_VERSION"),
        state.environment
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(subtitle, header_chunks[1]);
}
