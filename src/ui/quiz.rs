use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Column, QuizInput};
use crate::models::QuizMode;
use crate::session::QuizSession;
use crate::ui::layout::{QuizLayout, calculate_quiz_chunks};
use crate::ui::{draw_footer, draw_title};

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let Some(session) = &app.session else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());

    let progress = match session.mode() {
        QuizMode::Match => format!(
            "{} - Matched {} / {} - {}",
            session.mode().label(),
            session.matched_count(),
            session.total(),
            app.player_label()
        ),
        mode => format!(
            "{} - Question {} / {} - Score {} - {}",
            mode.label(),
            (session.current_index() + 1).min(session.total() as usize),
            session.total(),
            session.score(),
            app.player_label()
        ),
    };
    draw_title(f, layout.header_area, &progress);

    match session.mode() {
        QuizMode::Fill => draw_fill(f, &layout, session, &app.input),
        QuizMode::Choice => draw_choice(f, &layout, session, &app.input),
        QuizMode::Match => draw_match(f, &layout, session, &app.input),
    }

    let feedback = match &app.input.feedback {
        Some(feedback) => Paragraph::new(feedback.text.clone()).style(
            Style::default()
                .fg(if feedback.correct {
                    Color::Green
                } else {
                    Color::Red
                })
                .add_modifier(Modifier::BOLD),
        ),
        None => Paragraph::new(""),
    };
    f.render_widget(
        feedback
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout.feedback_area,
    );

    let answered = session.current_response().is_some();
    let hints: &[(&'static str, &'static str)] = match session.mode() {
        QuizMode::Fill if answered => &[("Enter", "Next"), ("F1", "Explain"), ("Esc", "Quit")],
        QuizMode::Fill => &[
            ("Enter", "Submit"),
            ("Tab", "Skip"),
            ("F1", "Explain"),
            ("Esc", "Quit"),
        ],
        QuizMode::Choice if answered => &[("Enter", "Next"), ("F1", "Explain"), ("Esc", "Quit")],
        QuizMode::Choice => &[
            ("↑/↓", "Move"),
            ("Enter/1-4", "Choose"),
            ("Tab", "Skip"),
            ("F1", "Explain"),
            ("Esc", "Quit"),
        ],
        QuizMode::Match => &[
            ("←/→", "Column"),
            ("↑/↓", "Move"),
            ("Enter", "Select"),
            ("Ctrl+R", "Restart"),
            ("F1", "Explain"),
            ("Esc", "Quit"),
        ],
    };
    draw_footer(f, layout.help_area, app.status.as_ref(), hints);
}

fn draw_prompt(f: &mut Frame, area: Rect, prompt: &str) {
    let question = Paragraph::new(Text::from(prompt.to_string()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Translate into English"),
        );
    f.render_widget(question, area);
}

fn draw_fill(f: &mut Frame, layout: &QuizLayout, session: &QuizSession, input: &QuizInput) {
    let Some(question) = session.current_fill() else {
        return;
    };
    draw_prompt(f, layout.question_area, &question.translation);

    if let Some(response) = session.current_response() {
        let mut text = Text::default();
        text.push_line(Line::from(vec![
            Span::styled("Your answer: ", Style::default().fg(Color::Yellow)),
            Span::from(response.given.clone()),
        ]));
        text.push_line(Line::from(vec![
            Span::styled("Correct answer: ", Style::default().fg(Color::Green)),
            Span::from(question.english.clone()),
        ]));
        let answer = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Answer"));
        f.render_widget(answer, layout.answer_area);
        return;
    }

    let content = if input.buffer.is_empty() {
        Span::styled(
            "[Type your answer here...]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::from(input.buffer.clone())
    };
    let answer = Paragraph::new(Line::from(content))
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(answer, layout.answer_area);

    let before_cursor: String = input.buffer.chars().take(input.cursor).collect();
    let cursor_x = layout.answer_area.x + 1 + before_cursor.width() as u16;
    f.set_cursor_position((cursor_x, layout.answer_area.y + 1));
}

fn draw_choice(f: &mut Frame, layout: &QuizLayout, session: &QuizSession, input: &QuizInput) {
    let Some(question) = session.current_choice() else {
        return;
    };
    draw_prompt(f, layout.question_area, &question.translation);

    let response = session.current_response();
    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match response {
                Some(_) if *option == question.english => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Some(r) if *option == r.given => Style::default().fg(Color::Red),
                Some(_) => Style::default().fg(Color::DarkGray),
                None if i == input.option_cursor => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                None => Style::default(),
            };
            let marker = if response.is_none() && i == input.option_cursor {
                ">"
            } else {
                " "
            };
            ListItem::new(format!("{} {}. {}", marker, i + 1, option)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(list, layout.answer_area);
}

fn match_item_style(locked: bool, selected: bool, under_cursor: bool) -> Style {
    let style = if locked {
        Style::default().fg(Color::DarkGray)
    } else if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    if under_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn draw_match(f: &mut Frame, layout: &QuizLayout, session: &QuizSession, input: &QuizInput) {
    let Some(board) = session.board() else {
        return;
    };

    let instructions = Paragraph::new("Pick a Chinese word on the left, then its English match on the right")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Matching game"));
    f.render_widget(instructions, layout.question_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.answer_area);

    let left: Vec<ListItem> = board
        .left
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let style = match_item_style(
                session.is_left_locked(i),
                session.selected_left() == Some(i),
                input.focus == Column::Left && input.left_cursor == i,
            );
            ListItem::new(word.clone()).style(style)
        })
        .collect();
    let right: Vec<ListItem> = board
        .right
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let style = match_item_style(
                session.is_right_locked(i),
                session.selected_right() == Some(i),
                input.focus == Column::Right && input.right_cursor == i,
            );
            ListItem::new(word.clone()).style(style)
        })
        .collect();

    let column_block = |title: &'static str, focused: bool| {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            })
    };
    f.render_widget(
        List::new(left).block(column_block("Chinese", input.focus == Column::Left)),
        columns[0],
    );
    f.render_widget(
        List::new(right).block(column_block("English", input.focus == Column::Right)),
        columns[1],
    );
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Abandon Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to the menu? This attempt will not be scored.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
