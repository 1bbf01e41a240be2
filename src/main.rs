//! Tetrogue board viewer (default binary).
//!
//! Generates a dungeon board and shows it in the terminal. It uses crossterm
//! for input and the framebuffer renderer from `tetrogue::term`.

mod config;
mod viewer;

use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tetrogue::core::TileCatalog;
use tetrogue::input::{handle_key_event, should_quit};
use tetrogue::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tetrogue::types::FRAME_MS;

use config::{init_logging, ViewerConfig};
use viewer::Viewer;

fn main() -> Result<()> {
    let config = ViewerConfig::from_env();
    init_logging(config.log_path.as_deref())?;
    tracing::info!(seed = config.seed, "starting viewer");

    let catalog = load_catalog(&config)?;
    let mut viewer = Viewer::new(&catalog, config.board, config.seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &catalog, &mut viewer);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "viewer stopped");
    }
    result
}

fn load_catalog(config: &ViewerConfig) -> Result<TileCatalog> {
    let Some(path) = &config.catalog_path else {
        return Ok(TileCatalog::oryx());
    };
    let file = File::open(path).with_context(|| format!("open catalog {}", path.display()))?;
    let catalog = TileCatalog::from_reader(BufReader::new(file))
        .with_context(|| format!("parse catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "loaded catalog");
    Ok(catalog)
}

fn run(term: &mut TerminalRenderer, catalog: &TileCatalog, viewer: &mut Viewer<'_>) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);

    loop {
        let frame_start = Instant::now();

        // Update, then render.
        viewer.board_mut().update()?;
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(
            viewer.board(),
            catalog,
            started.elapsed(),
            &viewer.status(),
            Viewport::new(w, h),
            &mut fb,
        )?;
        term.present(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame
            .checked_sub(frame_start.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        viewer.apply(action)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
