use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::error::Error;
use std::io;

use vocab_quiz::ai::explainer_from_config;
use vocab_quiz::app::App;
use vocab_quiz::cli::{Cli, Command, run_command};
use vocab_quiz::config::AppConfig;
use vocab_quiz::csv::load_word_bank;
use vocab_quiz::db::ScoreStore;
use vocab_quiz::{logger, ui};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    logger::init(&config.log_file)?;

    match cli.command.as_ref().unwrap_or(&Command::Play) {
        Command::Play => play(&config),
        command => run_command(command, &config, &mut io::stdout()),
    }
}

fn play(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let store = ScoreStore::open(&config.database)?;
    let bank = load_word_bank(config.word_list.as_deref())?;
    let explainer = explainer_from_config(&config.ai);
    log::info!(
        "Starting quiz with {} words, database {}",
        bank.len(),
        config.database.display()
    );
    let mut app = App::new(
        store,
        bank,
        explainer,
        config.questions(),
        config.ranking_limit,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Terminal error: {}", e);
    }
    Ok(result?)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}
