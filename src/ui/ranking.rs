use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::app::App;
use crate::ranking::{HEADERS, ModeFilter};
use crate::ui::{calculate_page_chunks, draw_footer, key_style};

fn filter_tabs(current: ModeFilter) -> Line<'static> {
    let mut spans = vec![Span::from("Mode: ")];
    for (i, filter) in ModeFilter::CYCLE.iter().enumerate() {
        if i > 0 {
            spans.push(Span::from(" | "));
        }
        if *filter == current {
            spans.push(Span::styled(filter.label(), key_style().add_modifier(Modifier::REVERSED)));
        } else {
            spans.push(Span::from(filter.label()));
        }
    }
    Line::from(spans)
}

pub fn draw_ranking(f: &mut Frame, app: &App) {
    let (header, body, footer) = calculate_page_chunks(f.area());

    let tabs = Paragraph::new(filter_tabs(app.ranking_filter))
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ranking Board")
                .title_style(key_style()),
        );
    f.render_widget(tabs, header);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Top {}", app.ranking_limit));

    if app.ranking_rows.is_empty() {
        let empty = Paragraph::new("(no scores yet)")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
        f.render_widget(empty, body);
    } else {
        let current = app.user.username();
        let rows: Vec<Row> = app
            .ranking_rows
            .iter()
            .map(|r| {
                let style = if Some(r.name.as_str()) == current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    r.rank.to_string(),
                    r.name.clone(),
                    r.mode.clone(),
                    r.score.clone(),
                    r.percent.clone(),
                    r.time.clone(),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(16),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(19),
            ],
        )
        .header(Row::new(HEADERS.to_vec()).style(key_style()))
        .block(block);
        f.render_widget(table, body);
    }

    draw_footer(
        f,
        footer,
        app.status.as_ref(),
        &[("←/→", "Change mode"), ("Esc", "Back")],
    );
}
