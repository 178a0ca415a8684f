use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::generator::QuizBatch;
use crate::session::{QuizSession, Response};
use crate::ui::{calculate_page_chunks, draw_footer, draw_title};
use crate::utils::truncate_string;

fn review_line(index: usize, prompt: &str, expected: &str, response: Option<&Response>) -> Vec<Line<'static>> {
    let (mark, style) = match response {
        Some(r) if r.correct => ("[✓]", Style::default().fg(Color::Green)),
        Some(_) => ("[✗]", Style::default().fg(Color::Red)),
        None => ("[ ]", Style::default().fg(Color::DarkGray)),
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(mark, style),
        Span::from(format!(
            " {}. {} = {}",
            index + 1,
            truncate_string(prompt, 30),
            truncate_string(expected, 30)
        )),
    ])];
    match response {
        Some(r) if !r.correct => lines.push(Line::from(format!(
            "    Your Answer: {}",
            truncate_string(&r.given, 56)
        ))),
        None => lines.push(Line::from("    Skipped")),
        _ => {}
    }
    lines
}

fn review(session: &QuizSession) -> Vec<Line<'static>> {
    let responses = session.responses();
    let mut lines = Vec::new();
    match session.batch() {
        QuizBatch::Fill(questions) => {
            for (i, q) in questions.iter().enumerate() {
                let response = responses.get(i).and_then(Option::as_ref);
                lines.extend(review_line(i, &q.translation, &q.english, response));
            }
        }
        QuizBatch::Choice(questions) => {
            for (i, q) in questions.iter().enumerate() {
                let response = responses.get(i).and_then(Option::as_ref);
                lines.extend(review_line(i, &q.translation, &q.english, response));
            }
        }
        QuizBatch::Match(board) => {
            for (i, pair) in board.pairs.iter().enumerate() {
                lines.push(Line::from(format!(
                    "{}. {} = {}",
                    i + 1,
                    pair.translation,
                    pair.english
                )));
            }
        }
    }
    lines
}

pub fn draw_summary(f: &mut Frame, app: &App) {
    let (header, body, footer) = calculate_page_chunks(f.area());

    let mode_label = app
        .session
        .as_ref()
        .map(|s| s.mode().label())
        .unwrap_or("Quiz");
    draw_title(f, header, &format!("{} Results - {}", mode_label, app.player_label()));

    let mut text = Text::default();
    match &app.result {
        Some(result) => {
            text.push_line(Line::from(Span::styled(
                format!(
                    "Score: {} / {}  ({:.1}%)",
                    result.score, result.total, result.percent
                ),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            let saved = match (result.record_id, app.user.is_logged_in()) {
                (Some(_), _) => "Score saved to the ranking board".to_string(),
                (None, false) => "Not logged in, score not saved".to_string(),
                (None, true) => "Score not saved".to_string(),
            };
            text.push_line(Line::from(saved));
            if let Some(best) = app.personal_best {
                text.push_line(Line::from(format!("Personal best in this mode: {:.1}%", best)));
            }
        }
        None => text.push_line(Line::from(Span::styled(
            "No result available",
            Style::default().fg(Color::Red),
        ))),
    }
    text.push_line(Line::from(""));

    if let Some(session) = &app.session {
        text.push_line(Line::from(Span::styled(
            "Review:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in review(session) {
            text.push_line(line);
        }
    }

    let summary = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, body);

    draw_footer(
        f,
        footer,
        app.status.as_ref(),
        &[("m", "Main Menu"), ("r", "Play Again"), ("k", "Ranking")],
    );
}
