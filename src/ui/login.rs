use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, LoginField};
use crate::ui::{draw_footer, draw_title};

fn field_block(title: &'static str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

pub fn draw_login(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], "Vocabulary Quiz - Log in");

    let form = &app.login;
    let username_focused = form.focus == LoginField::Username;

    let username = Paragraph::new(form.username.clone())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(field_block("Username", username_focused));
    f.render_widget(username, chunks[2]);

    let masked = "*".repeat(form.password.chars().count());
    let password = Paragraph::new(masked.clone()).block(field_block("Password", !username_focused));
    f.render_widget(password, chunks[3]);

    let (area, text_width) = if username_focused {
        (chunks[2], form.username.width())
    } else {
        (chunks[3], masked.len())
    };
    f.set_cursor_position(Position::new(area.x + 1 + text_width as u16, area.y + 1));

    draw_footer(
        f,
        chunks[5],
        app.status.as_ref(),
        &[
            ("Tab", "Switch field"),
            ("Enter", "Log in"),
            ("F2/Ctrl+R", "Register"),
            ("Esc", "Quit"),
        ],
    );
}
