use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::Popup;
use crate::ui::{centered_rect, key_hints};

pub fn draw_popup(f: &mut Frame, popup: &Popup) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            popup.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let lines: Vec<Line> = popup.body.lines().map(|l| Line::from(l.to_string())).collect();
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(body, chunks[0]);

    let help = Paragraph::new(key_hints(&[("Esc/Enter", "Close")]))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(help, chunks[1]);
}
