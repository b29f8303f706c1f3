//! Create-donation popup

use crate::ui::editor::{DonationEditor, EditorField};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

pub fn render_editor(f: &mut Frame, area: Rect, editor: &DonationEditor) {
    let popup = centered_rect(60, 12, area);
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for field in EditorField::ALL {
        let focused = editor.focused() == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused && !editor.submitting { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", format!("{}:", field)), label_style),
            Span::styled(
                format!("{}{}", editor.value(field), cursor),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    lines.push(Line::from(""));

    let status = if editor.submitting {
        Span::styled("Submitting...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &editor.validation_error {
        Span::styled(error.clone(), Style::default().fg(Color::LightRed))
    } else {
        Span::styled(
            "[Enter] Submit  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(status));

    let block = Block::default()
        .title("NEW DONATION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightGreen))
        .padding(Padding::uniform(1));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rect of `percent_x` width and `height` rows centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
