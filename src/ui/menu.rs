use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

use crate::app::{App, MENU_ITEMS};
use crate::ui::{calculate_page_chunks, draw_footer, draw_title};

pub fn draw_menu(f: &mut Frame, app: &App) {
    let (header, body, footer) = calculate_page_chunks(f.area());

    let title = format!(
        "Vocabulary Quiz - Welcome back, {}!",
        app.user.username().unwrap_or("-")
    );
    draw_title(f, header, &title);

    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.menu_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == app.menu_index { ">" } else { " " };
            ListItem::new(Line::from(format!("{} {}. {}", marker, i + 1, item.label()))).style(style)
        })
        .collect();

    let subtitle = format!(
        "Choose a mode ({} words, {} questions per quiz)",
        app.bank.len(),
        app.questions
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(subtitle)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, body);

    draw_footer(
        f,
        footer,
        app.status.as_ref(),
        &[
            ("↑/↓", "Navigate"),
            ("Enter/1-5", "Select"),
            ("q", "Quit"),
        ],
    );
}
