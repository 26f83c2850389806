use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gapfill::{
    app::{App, KeyOutcome, TICK_RATE_MS},
    config::{Config, ConfigStore, FileConfigStore},
    filter::{self, slug, CategoryFilter, DifficultyFilter, Filters},
    logging,
    question::{Category, Difficulty},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, QuizEvent, Runner, Ticker},
    store::QuestionStore,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fmt::Write as _,
    io::{self, stdin},
    ops::ControlFlow,
    sync::Arc,
    time::Duration,
};

/// fill-in-the-blank grammar quiz with explanations after every answer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal grammar quiz: pick the word that fills the blank, submit, and read why it is right. Filter by grammar topic and difficulty; your last filters are remembered."
)]
pub struct Cli {
    /// grammar topic to practice
    #[clap(short = 'c', long, ignore_case = true, value_parser = filter::value_parser::<Category>())]
    category: Option<CategoryFilter>,

    /// difficulty to practice
    #[clap(short = 'd', long, ignore_case = true, value_parser = filter::value_parser::<Difficulty>())]
    difficulty: Option<DifficultyFilter>,

    /// validate the bundled questions, print how many there are per topic and level, then exit
    #[clap(long)]
    check: bool,

    /// print the questions matching the filters, then exit
    #[clap(long, conflicts_with = "check")]
    list: bool,
}

impl Cli {
    /// Flags win over the remembered filters
    fn filters(&self, config: &Config) -> Filters {
        let stored = config.filters();
        Filters::new(
            self.category.unwrap_or(stored.category),
            self.difficulty.unwrap_or(stored.difficulty),
        )
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = logging::init() {
        tracing::debug!("logging to {}", path.display());
    }

    let store = match QuestionStore::load() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("question store failed validation: {}", e);
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::ValueValidation,
                format!("invalid question store: {e}"),
            )
            .exit();
        }
    };

    let config_store = FileConfigStore::new();
    let filters = cli.filters(&config_store.load());

    if cli.check {
        print!("{}", check_report(&store));
        return Ok(());
    }
    if cli.list {
        print!("{}", list_report(&store, filters));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, filters);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = config_store.save(&Config::from(app.session.filters())) {
        tracing::warn!(
            "failed to save config to {}: {}",
            config_store.path().display(),
            e
        );
    }

    outcome
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    runner.run(|event| -> Result<ControlFlow<()>, Box<dyn Error>> {
        let redraw = match event {
            // only the celebration animates
            QuizEvent::Tick => app.on_tick(),
            QuizEvent::Resize(..) => true,
            QuizEvent::Key(key) => {
                if app.on_key(key) == KeyOutcome::Quit {
                    return Ok(ControlFlow::Break(()));
                }
                true
            }
        };
        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
        Ok(ControlFlow::Continue(()))
    })
}

fn ui(app: &mut App, f: &mut Frame) {
    let area = f.area();
    app.viewport = (area.width, area.height);
    f.render_widget(&*app, area);
}

fn check_report(store: &QuestionStore) -> String {
    let by_category = store.questions().iter().map(|q| q.category).counts();
    let by_difficulty = store.questions().iter().map(|q| q.difficulty).counts();

    let mut out = String::new();
    let _ = writeln!(out, "{} questions OK", store.len());
    let _ = writeln!(out, "\nby category:");
    for category in Category::value_variants() {
        let n = by_category.get(category).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<18}{:>4}", slug(category), n);
    }
    let _ = writeln!(out, "\nby difficulty:");
    for difficulty in Difficulty::value_variants() {
        let n = by_difficulty.get(difficulty).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<18}{:>4}", slug(difficulty), n);
    }
    out
}

fn list_report(store: &QuestionStore, filters: Filters) -> String {
    let questions = filter::filter(store, filters.category, filters.difficulty);
    if questions.is_empty() {
        return format!(
            "no questions match category={} difficulty={}\n",
            filters.category, filters.difficulty
        );
    }

    questions
        .iter()
        .map(|q| {
            format!(
                "{:>4}  {:<18}{:<14}{}\n",
                q.id,
                slug(&q.category),
                slug(&q.difficulty),
                q.sentence
            )
        })
        .collect()
}
