use std::{
    io::{self, BufRead, BufReader, Stdin, Stdout, Write},
    sync::{Arc, Weak},
    thread::{self, JoinHandle},
};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{DrawNumberObserver, DrawNumberView};
use crate::model::DrawResult;

const WELCOME: &str = "Guess the secret number! Enter a number, `reset` for a new game or `quit` to leave.";

/// Interactive text view.
///
/// [`DrawNumberView::start`] moves the reader onto a named input thread that
/// feeds whitespace-separated tokens to the observer until `quit`, `exit` or
/// end of input. A game-ending result triggers a reset so play continues.
pub struct ConsoleView<R, W> {
    input: Mutex<Option<R>>,
    out: Arc<Mutex<W>>,
    observer: OnceCell<Weak<dyn DrawNumberObserver>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleView<BufReader<Stdin>, Stdout> {
    /// Bind to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ConsoleView<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    /// Read guesses from `input` and print to `out`.
    pub fn new(input: R, out: W) -> Self {
        Self {
            input: Mutex::new(Some(input)),
            out: Arc::new(Mutex::new(out)),
            observer: OnceCell::new(),
            worker: Mutex::new(None),
        }
    }

    /// Wait for the input thread to finish, if it was started.
    #[cfg(test)]
    pub(crate) fn join(&self) {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("Console input thread panicked");
            }
        }
    }

    fn print(&self, line: &str) {
        print_line(&self.out, line);
    }
}

impl<R, W> DrawNumberView for ConsoleView<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn set_observer(&self, observer: Weak<dyn DrawNumberObserver>) {
        if self.observer.set(observer).is_err() {
            debug!("Console view observer already set");
        }
    }

    fn start(&self) {
        let Some(input) = self.input.lock().take() else {
            debug!("Console view already started");
            return;
        };
        let Some(observer) = self.observer.get().cloned() else {
            warn!("Console view started without an observer");
            return;
        };

        self.print(WELCOME);
        let out = Arc::clone(&self.out);
        let spawned = thread::Builder::new()
            .name("console-input".to_string())
            .spawn(move || read_guesses(input, &out, &observer));
        match spawned {
            Ok(handle) => *self.worker.lock() = Some(handle),
            Err(err) => warn!("Failed to spawn console input thread: {err}"),
        }
    }

    fn result(&self, result: DrawResult) {
        self.print(&result.to_string());
        if !result.outcome.ends_game() {
            return;
        }

        let verdict = if result.outcome.is_win() {
            "You won!"
        } else {
            "Game over."
        };
        self.print(&format!("{verdict} A new game starts."));
        if let Some(observer) = self.observer.get().and_then(Weak::upgrade) {
            observer.reset_game();
        }
    }

    fn number_incorrect(&self) {
        self.print("Incorrect number... please stay within the allowed range");
    }

    fn display_error(&self, message: &str) {
        self.print(&format!("Error: {message}"));
    }
}

fn print_line<W: Write>(out: &Mutex<W>, line: &str) {
    let mut out = out.lock();
    if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        warn!("Console write failed: {err}");
    }
}

fn read_guesses<R: BufRead, W: Write>(
    input: R,
    out: &Mutex<W>,
    observer: &Weak<dyn DrawNumberObserver>,
) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("Console input failed: {err}");
                break;
            }
        };
        for token in line.split_whitespace() {
            let Some(observer) = observer.upgrade() else {
                debug!("Observer dropped; stopping console input");
                return;
            };
            match token {
                "quit" | "exit" => {
                    info!("Quit requested from console");
                    observer.quit();
                    return;
                }
                "reset" => observer.reset_game(),
                _ => match token.parse::<i32>() {
                    Ok(n) => observer.new_attempt(n),
                    Err(_) => print_line(out, &format!("Not a number: {token}")),
                },
            }
        }
    }

    debug!("Console input closed");
    if let Some(observer) = observer.upgrade() {
        observer.quit();
    }
}
