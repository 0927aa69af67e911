//! Bomber entry point
//!
//! Sets up the terminal, forwards input events from a reader thread and
//! drives the active screen once per frame.

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    terminal,
};

use bomber::consts::MAX_FRAME_DT;
use bomber::renderer::TerminalBatch;
use bomber::renderer::terminal::CELL_ASPECT;
use bomber::screen::{InputSnapshot, ScreenManager};
use bomber::settings::Settings;

/// Input gathered between two frames
#[derive(Debug, Default)]
struct FrameInput {
    snapshot: InputSnapshot,
    quit: bool,
    resized: Option<(u16, u16)>,
    /// Last focus change seen, true when the terminal regained focus
    focus: Option<bool>,
}

/// Drain pending events without blocking
fn poll_input(rx: &mpsc::Receiver<Event>) -> FrameInput {
    let mut input = FrameInput::default();
    while let Ok(ev) = rx.try_recv() {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) => match code {
                KeyCode::Char(' ') | KeyCode::Enter => input.snapshot.action = true,
                KeyCode::Esc => input.snapshot.cancel = true,
                KeyCode::Char('q') | KeyCode::Char('Q') => input.quit = true,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    input.quit = true
                }
                _ => {}
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                input.snapshot.action = true;
            }
            Event::Resize(cols, rows) => input.resized = Some((cols, rows)),
            Event::FocusLost => input.focus = Some(false),
            Event::FocusGained => input.focus = Some(true),
            _ => {}
        }
    }
    input
}

fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&settings.log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // Writing to stderr would tear the frame apart
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn run<W: Write>(
    batch: &mut TerminalBatch<W>,
    rx: &mpsc::Receiver<Event>,
    settings: Settings,
) -> anyhow::Result<u64> {
    let frame = settings.frame_duration();
    let (w, h) = batch.pixel_size();
    let mut screens = ScreenManager::new(settings, w, h);
    let mut last = Instant::now();

    while screens.is_running() {
        let frame_start = Instant::now();
        let input = poll_input(rx);
        if input.quit {
            screens.dispose();
            break;
        }
        if let Some((cols, rows)) = input.resized {
            batch.resize(cols, rows);
            screens.resize(cols as u32, rows as u32 * CELL_ASPECT);
        }
        match input.focus {
            Some(false) => screens.pause(),
            Some(true) => screens.resume(),
            None => {}
        }

        let dt = last.elapsed().as_secs_f32().min(MAX_FRAME_DT);
        last = Instant::now();
        screens.render(dt, &input.snapshot, batch);
        if let Some(e) = batch.take_error() {
            screens.dispose();
            return Err(e).context("failed to resize terminal");
        }
        if let Err(e) = batch.present() {
            screens.dispose();
            return Err(e).context("failed to draw frame");
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    Ok(screens.best_score())
}

fn main() -> anyhow::Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(Settings::resolve_path(explicit).as_deref());
    init_logging(&settings);
    log::info!("Bomber starting ({} fps)", settings.fps);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;
    out.execute(EnableFocusChange)?;

    // Blocking reads live on their own thread so the frame loop never stalls
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let (cols, rows) = terminal::size()?;
    let mut batch = TerminalBatch::new(out, cols, rows);
    let result = run(&mut batch, &rx, settings);

    // Always restore the terminal
    let mut out = batch.into_inner();
    let _ = out.execute(DisableFocusChange);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let best = result?;
    log::info!("Bomber exiting, best score {}", best);
    println!("Best score: {best}");
    Ok(())
}
