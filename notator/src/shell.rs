//! Line-oriented front end driving a [`Notator`].
//!
//! Each input line is one command. After `delete` the shell collects the
//! retyped haiku line by line until an empty line submits it. Input is read
//! on a separate thread so the loop wakes every [`TICK_INTERVAL`] to tick
//! the timer and report its expiry while the user is idle.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use crate::app::Notator;
use crate::command::{Command, HELP};
use crate::core::delete_flow::{SubmitOutcome, haiku_shape_ok};
use crate::error;
use crate::io::persistence::Persistence;

/// Typed while collecting a haiku to abandon the delete.
pub const CANCEL: &str = ":cancel";

/// Longest the shell waits for input before advancing the timer.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One raw input line (newline included), or the error that ended input.
pub type InputLine = std::io::Result<Vec<u8>>;

/// Converts wall-clock time into whole-second timer ticks.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
}

impl TickClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds since the previous call; the fraction carries over.
    pub fn elapsed_ticks(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Read `input` on a background thread, one raw line per message.
///
/// The channel closes at end of input or after delivering a read error.
pub fn spawn_reader<R>(mut input: R) -> Receiver<InputLine>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            let mut line = Vec::new();
            let read = input.read_until(b'\n', &mut line);
            let failed = read.is_err();
            if matches!(read, Ok(0)) || tx.send(read.map(|_| line)).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Run the shell over `input` until `quit` or end of input.
pub fn run_shell<P, R, W>(app: &mut Notator<P>, input: R, out: W) -> Result<()>
where
    P: Persistence,
    R: BufRead + Send + 'static,
    W: Write,
{
    let lines = spawn_reader(input);
    run_lines(app, &lines, out)
}

/// Run the shell over lines arriving on `lines`.
///
/// Only a read error ends the loop early; undecodable lines are reported
/// and skipped like any other bad command.
pub fn run_lines<P, W>(
    app: &mut Notator<P>,
    lines: &Receiver<InputLine>,
    mut out: W,
) -> Result<()>
where
    P: Persistence,
    W: Write,
{
    let mut clock = TickClock::new(Instant::now());
    let mut haiku: Option<Vec<String>> = None;
    render(app, &mut out)?;

    loop {
        let bytes = match lines.recv_timeout(TICK_INTERVAL) {
            Ok(read) => read.context("read command")?,
            Err(RecvTimeoutError::Timeout) => {
                advance_timer(app, &mut clock);
                if app.status().is_some() {
                    render(app, &mut out)?;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };
        advance_timer(app, &mut clock);

        let Some(line) = decode_line(bytes) else {
            writeln!(out, "error: input line is not valid UTF-8")?;
            continue;
        };
        let flow = match haiku.as_mut() {
            Some(buffer) => {
                let done = collect_haiku(app, buffer, &line, &mut out)?;
                if done {
                    haiku = None;
                }
                Flow::Continue
            }
            None if line.trim().is_empty() => Flow::Continue,
            None => match Command::parse(&line) {
                Ok(command) => execute(app, command, &mut haiku, &mut out)?,
                Err(err) => {
                    writeln!(out, "error: {err:#}")?;
                    Flow::Continue
                }
            },
        };
        if flow == Flow::Quit {
            break;
        }
        render(app, &mut out)?;
    }

    if app.has_unsaved_changes() {
        let dirty: Vec<String> = app
            .registry()
            .tabs()
            .iter()
            .filter(|tab| tab.is_dirty())
            .map(|tab| tab.title())
            .collect();
        writeln!(out, "warning: unsaved changes in {}", dirty.join(", "))?;
    }
    out.flush().context("flush output")?;
    Ok(())
}

/// Strip the line ending and decode; `None` for invalid UTF-8.
fn decode_line(mut bytes: Vec<u8>) -> Option<String> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    String::from_utf8(bytes).ok()
}

fn advance_timer<P: Persistence>(app: &mut Notator<P>, clock: &mut TickClock) {
    let ticks = clock.elapsed_ticks(Instant::now());
    for _ in 0..ticks {
        if !app.timer().is_running() {
            break;
        }
        app.tick();
    }
}

/// Feed one line of the haiku. Returns true once the delete flow is closed.
fn collect_haiku<P: Persistence, W: Write>(
    app: &mut Notator<P>,
    buffer: &mut Vec<String>,
    line: &str,
    out: &mut W,
) -> Result<bool> {
    if line.trim() == CANCEL {
        app.cancel_delete();
        return Ok(true);
    }
    if !line.trim().is_empty() {
        buffer.push(line.to_string());
        return Ok(false);
    }

    let text = buffer.join("\n");
    buffer.clear();
    match app.submit_haiku(&text) {
        Ok(SubmitOutcome::Confirmed(_) | SubmitOutcome::Idle) => Ok(true),
        Ok(SubmitOutcome::Mismatch) => {
            if !haiku_shape_ok(&text) {
                writeln!(out, "hint: a haiku has three lines of 3-5, 4-7 and 3-5 words")?;
            }
            Ok(false)
        }
        Err(err) => {
            writeln!(out, "error: {err}")?;
            Ok(true)
        }
    }
}

fn execute<P: Persistence, W: Write>(
    app: &mut Notator<P>,
    command: Command,
    haiku: &mut Option<Vec<String>>,
    out: &mut W,
) -> Result<Flow> {
    debug!(?command, "executing command");
    let result: error::Result<()> = match command {
        Command::New => {
            app.new_tab();
            Ok(())
        }
        Command::Open(path) => app.open(&path).map(drop),
        Command::Save => app.save().map(drop),
        Command::SaveAs(path) => app.save_as(path).map(drop),
        Command::Close => app.close_tab().map(drop),
        Command::ToggleTabs => {
            app.toggle_tab_bar();
            Ok(())
        }
        Command::Prev => {
            app.prev_tab();
            Ok(())
        }
        Command::Next => {
            app.next_tab();
            Ok(())
        }
        Command::Quote => {
            writeln!(out, "quote: {}", app.quote())?;
            Ok(())
        }
        Command::Timer(seconds) => app.set_timer(seconds),
        Command::Reset => {
            app.reset_timer();
            Ok(())
        }
        Command::Hemingway => app.toggle_hemingway().map(drop),
        Command::Delete => match app.request_delete() {
            Ok(text) => {
                writeln!(
                    out,
                    "retype the haiku, then an empty line ({CANCEL} to keep the file):"
                )?;
                for line in text.lines() {
                    writeln!(out, "  {line}")?;
                }
                *haiku = Some(Vec::new());
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::Write(text) => app.append(&format!("{text}\n")),
        Command::Set(text) => app.edit(text),
        Command::Show => match app.active_tab() {
            Ok(tab) => {
                let content = tab.content();
                write!(out, "{content}")?;
                if !content.is_empty() && !content.ends_with('\n') {
                    writeln!(out)?;
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::Help => {
            writeln!(out, "{HELP}")?;
            Ok(())
        }
        Command::Quit => return Ok(Flow::Quit),
    };
    if let Err(err) = result {
        writeln!(out, "error: {err}")?;
    }
    Ok(Flow::Continue)
}

/// Print the status line, the tab bar (when visible) and the running timer.
fn render<P: Persistence, W: Write>(app: &mut Notator<P>, out: &mut W) -> Result<()> {
    if let Some(status) = app.take_status() {
        writeln!(out, "status: {status}")?;
    }
    if app.tab_bar_visible() {
        let active = app.registry().active_index();
        let titles: Vec<String> = app
            .registry()
            .tabs()
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                if index == active {
                    format!("[{}]", tab.title())
                } else {
                    tab.title()
                }
            })
            .collect();
        writeln!(out, "tabs: {}", titles.join(" "))?;
    }
    if app.timer().is_running() {
        writeln!(out, "timer: {}", app.timer().label())?;
    }
    out.flush().context("flush output")?;
    Ok(())
}
