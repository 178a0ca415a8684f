pub mod layout;
mod login;
mod menu;
mod popup;
mod quiz;
mod ranking;
mod summary;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, StatusMessage};
use crate::models::AppState;

pub use layout::{calculate_page_chunks, calculate_quiz_chunks, centered_rect};
pub use login::draw_login;
pub use menu::draw_menu;
pub use popup::draw_popup;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use ranking::draw_ranking;
pub use summary::draw_summary;

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Login => draw_login(f, app),
        AppState::Menu => draw_menu(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Summary => draw_summary(f, app),
        AppState::Ranking => draw_ranking(f, app),
    }

    if let Some(popup) = &app.popup {
        draw_popup(f, popup);
    }
}

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// `key description` pairs rendered as one help line.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, description)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::from("  "));
        }
        spans.push(Span::styled(*key, key_style()));
        spans.push(Span::from(format!(" {}", description)));
    }
    Line::from(spans)
}

pub(crate) fn draw_title(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Help line, replaced by the status message when there is one.
pub(crate) fn draw_footer(
    f: &mut Frame,
    area: Rect,
    status: Option<&StatusMessage>,
    hints: &[(&'static str, &'static str)],
) {
    let line = match status {
        Some(status) => Line::from(Span::styled(
            status.text.clone(),
            Style::default()
                .fg(if status.is_error {
                    Color::Red
                } else {
                    Color::Green
                })
                .add_modifier(Modifier::BOLD),
        )),
        None => key_hints(hints),
    };
    let help = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
