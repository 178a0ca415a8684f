//! Read-only view over the score table for the ranking board.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::db::ScoreStore;
use crate::error::StoreResult;
use crate::models::{QuizMode, ScoreRecord};
use crate::utils::pad_to_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    All,
    Only(QuizMode),
}

impl ModeFilter {
    pub const CYCLE: [ModeFilter; 4] = [
        ModeFilter::All,
        ModeFilter::Only(QuizMode::Fill),
        ModeFilter::Only(QuizMode::Choice),
        ModeFilter::Only(QuizMode::Match),
    ];

    pub fn mode(&self) -> Option<QuizMode> {
        match self {
            ModeFilter::All => None,
            ModeFilter::Only(mode) => Some(*mode),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModeFilter::All => "All",
            ModeFilter::Only(mode) => mode.label(),
        }
    }

    fn position(&self) -> usize {
        Self::CYCLE.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::CYCLE[(self.position() + 1) % Self::CYCLE.len()]
    }

    pub fn prev(&self) -> Self {
        Self::CYCLE[(self.position() + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }

    /// Parses `all`, `fill`, `choice` or `match`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(ModeFilter::All),
            other => QuizMode::try_from(other).ok().map(ModeFilter::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub mode: String,
    pub score: String,
    pub percent: String,
    pub time: String,
}

impl RankingRow {
    fn from_record(rank: usize, record: &ScoreRecord) -> Self {
        Self {
            rank,
            name: record.username.clone(),
            mode: record.mode.label().to_string(),
            score: format!("{}/{}", record.score, record.total),
            percent: format!("{:.1}%", record.percent),
            time: record.timestamp.clone(),
        }
    }
}

pub fn rows(records: &[ScoreRecord]) -> Vec<RankingRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| RankingRow::from_record(i + 1, r))
        .collect()
}

pub fn ranking(store: &ScoreStore, filter: ModeFilter, limit: usize) -> StoreResult<Vec<RankingRow>> {
    let records = store.top_scores(filter.mode(), limit)?;
    Ok(rows(&records))
}

pub const HEADERS: [&str; 6] = ["Rank", "Player", "Mode", "Score", "Accuracy", "Time"];

fn cells(row: &RankingRow) -> [String; 6] {
    [
        row.rank.to_string(),
        row.name.clone(),
        row.mode.clone(),
        row.score.clone(),
        row.percent.clone(),
        row.time.clone(),
    ]
}

/// Plain-text table with columns aligned by display width.
pub fn format_table(rows: &[RankingRow]) -> String {
    let mut widths = HEADERS.map(|h| h.width());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.width());
        }
    }

    let format_line = |values: &[String]| {
        values
            .iter()
            .zip(widths)
            .map(|(v, w)| pad_to_width(v, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(&HEADERS.map(String::from))];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_line(&cells(row)));
    }
    if rows.is_empty() {
        lines.push("(no scores yet)".to_string());
    }
    lines.join("\n")
}
