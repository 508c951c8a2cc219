//! sidefold: preview the accordion a documentation sidebar gets.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sidefold::{
    accordion::Accordion, config, dom::MemoryDom, entry::NavEntry, formats, input,
    matchers::HeaderRules, outline::Outline, preview::Preview, ui,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sidefold")]
#[command(about = "Accordion section grouping for documentation sidebars", long_about = None)]
struct Args {
    /// Book source files or directories
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Load sidebar entries from a JSON outline instead of sources
    #[arg(long, conflicts_with = "paths")]
    outline: Option<PathBuf>,

    /// Path of the page being viewed
    #[arg(long, short = 'p', default_value = "/")]
    current: String,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Print the grouped outline as JSON without opening the preview
    #[arg(long)]
    print: bool,
}

fn load_entries(args: &Args, cfg: &config::Config) -> sidefold::Result<Vec<NavEntry>> {
    if let Some(outline) = &args.outline {
        return input::load_outline(outline);
    }
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let mut documents = input::find_documents(paths.clone(), &cfg.file_extensions)?;
    let index_stem = Path::new(&cfg.index_document)
        .file_stem()
        .map_or_else(|| "index".to_string(), |s| s.to_string_lossy().into_owned());
    input::book_order(&mut documents, &index_stem);
    input::entries_from_documents(
        &documents,
        &input::book_root(&paths),
        &formats::markdown::MarkdownFormat,
    )
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions.clone_from(&args.ext);
    }

    let entries = match load_entries(&args, &cfg) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if entries.is_empty() {
        eprintln!("No sidebar entries found");
        return ExitCode::SUCCESS;
    }
    log::info!("loaded {} sidebar entries", entries.len());

    let accordion = Accordion::new(
        MemoryDom::from_entries(&entries),
        HeaderRules::from_config(&cfg),
    );
    let mut preview = Preview::new(accordion, args.current);

    if !args.print {
        if let Err(e) = run_tui(&mut preview) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    match serde_json::to_string_pretty(&Outline::capture(&preview.accordion)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_tui(app: &mut Preview) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut Preview,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle(),
                KeyCode::Char('a') => app.expand_active(),
                KeyCode::Char('c') => app.collapse_all(),
                KeyCode::Char('r') => app.rescan(),
                _ => {}
            }
        }
    }
}
