//! Donation feed sections
//!
//! Each section renders exactly one branch of its reconciled feed.

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_age, get_status_color};
use crate::feed::{DonationCard, FeedId, FeedView};
use chrono::Utc;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_feed_section(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    feed: FeedId,
) {
    let focused = state.focus == feed && state.editor.is_none();
    let lines = match state.view(feed) {
        FeedView::Error { message } => error_lines(message),
        FeedView::Loading { placeholders } => skeleton_lines(placeholders, state.tick),
        FeedView::Empty => empty_lines(feed),
        FeedView::Populated(cards) => card_lines(&cards, focused.then(|| state.selected_index(feed))),
    };

    let border_color = if focused { Color::LightCyan } else { Color::Cyan };
    let block = Block::default()
        .title(feed.to_string().to_uppercase())
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("Could not load donations: {}", clean_http_error_message(message)),
            Style::default().fg(Color::LightRed),
        )),
        Line::from(Span::styled(
            "Press [r] to retry",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}

fn skeleton_lines(placeholders: usize, tick: usize) -> Vec<Line<'static>> {
    // Shimmer moves down the placeholders
    let highlighted = (tick / 3) % placeholders.max(1);
    (0..placeholders)
        .map(|i| {
            let color = if i == highlighted {
                Color::Gray
            } else {
                Color::DarkGray
            };
            Line::from(Span::styled(
                "░░░░░░░░░░░░░░░░░░░░  ░░░░░░  ░░░░░░░░",
                Style::default().fg(color),
            ))
        })
        .collect()
}

fn empty_lines(feed: FeedId) -> Vec<Line<'static>> {
    let message = match feed {
        FeedId::Global => "No donations available right now.",
        FeedId::Mine => "You have not donated anything yet.",
    };
    vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            "Press [n] to create a donation",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}

fn card_lines(cards: &[DonationCard<'_>], selected: Option<usize>) -> Vec<Line<'static>> {
    let now = Utc::now();
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let donation = card.donation;
            let is_selected = selected == Some(i);
            let marker = if is_selected { "▶ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::raw(marker),
                Span::styled(donation.title.clone(), title_style),
                Span::styled(
                    format!("  {} kg", donation.quantity),
                    Style::default().fg(Color::LightYellow),
                ),
                Span::styled(
                    format!("  {}", donation.status),
                    Style::default().fg(get_status_color(donation.status)),
                ),
            ];
            if let Some(location) = &donation.location {
                spans.push(Span::styled(
                    format!("  @ {}", location),
                    Style::default().fg(Color::Gray),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", format_age(donation.created_at, now)),
                Style::default().fg(Color::DarkGray),
            ));
            if card.can_claim {
                spans.push(Span::styled(
                    "  [c] Claim",
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        })
        .collect()
}
