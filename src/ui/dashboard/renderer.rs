//! Dashboard main renderer

use super::components::{editor, feed, footer, header, impact, logs};
use super::state::DashboardState;
use crate::feed::FeedId;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    impact::render_impact_section(f, main_chunks[1], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[2]);

    if state.shows_my_feed() {
        let feed_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FeedId::Mine.page_size() as u16 + 2),
                Constraint::Fill(1),
            ])
            .split(content_chunks[0]);
        feed::render_feed_section(f, feed_chunks[0], state, FeedId::Mine);
        feed::render_feed_section(f, feed_chunks[1], state, FeedId::Global);
    } else {
        feed::render_feed_section(f, content_chunks[0], state, FeedId::Global);
    }

    logs::render_logs_panel(f, content_chunks[1], state);
    footer::render_footer(f, main_chunks[3], state);

    if let Some(donation_editor) = &state.editor {
        editor::render_editor(f, f.area(), donation_editor);
    }
}
