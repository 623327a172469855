//! Terminal match-3 runner (default binary).
//!
//! Mouse-driven: click two neighbours or drag one onto another to swap.
//! Uses crossterm for input and the framebuffer renderer from `term`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::core::{dispatch_all, EngineConfig, GameSnapshot, GameState};
use tui_match3::input::{handle_key_event, should_quit, HostCommand, PointerMapper};
use tui_match3::journal::Journal;
use tui_match3::term::{BoardView, EffectLayer, FrameBuffer, TerminalRenderer, Viewport};
use tui_match3::types::{BoardEvent, TICK_MS};

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let mut journal = Journal::start_from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, journal.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(journal) = journal {
        if let Err(err) = journal.shutdown() {
            eprintln!("journal: {err:#}");
        }
    }
    result
}

fn run(term: &mut TerminalRenderer, config: EngineConfig, mut journal: Option<&mut Journal>) -> Result<()> {
    let mut game = GameState::with_config(config);
    if let Some(j) = journal.as_deref_mut() {
        j.session(game.config().seed, game.free_swap());
        j.record_all(game.events());
    }

    let view = BoardView::default();
    let mut fx = EffectLayer::new();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut mapper = PointerMapper::new(view.layout(viewport));

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut events: Vec<BoardEvent> = Vec::with_capacity(64);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        view.render_into(&snap, &fx, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(HostCommand::Restart) => {
                            if game.restart() {
                                fx.reset();
                                if let Some(j) = journal.as_deref_mut() {
                                    j.restart(game.episode_id());
                                }
                            } else {
                                fx.set_status("busy");
                            }
                        }
                        Some(HostCommand::ToggleFreeSwap) => {
                            let on = !game.free_swap();
                            game.set_free_swap(on);
                            fx.set_status(if on { "free swap on" } else { "free swap off" });
                        }
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = mapper.map(mouse) {
                        game.pointer(pointer);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    mapper.set_layout(view.layout(viewport));
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            game.tick(TICK_MS);
            events.clear();
            game.drain_events_into(&mut events);
            dispatch_all(&events, &mut fx);
            if let Some(j) = journal.as_deref_mut() {
                j.record_all(&events);
            }
            fx.tick(TICK_MS);
        }
    }
}
