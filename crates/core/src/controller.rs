//! Application controller tying views, settings and the model together.

use std::{
    path::Path,
    sync::{Arc, Weak},
};

use once_cell::sync::OnceCell;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::{
    configuration::Configuration,
    loader::load_configuration,
    model::{GameModel, SecretSource},
    view::{DrawNumberObserver, DrawNumberView},
};

/// Quit signal raised by [`DrawNumberObserver::quit`] and consumed by the entry point.
#[derive(Default)]
struct Lifecycle {
    quit: Mutex<bool>,
    signal: Condvar,
}

/// Observer of every attached view and owner of the game model.
pub struct DrawNumberApp {
    views: Vec<Arc<dyn DrawNumberView>>,
    model: OnceCell<Mutex<GameModel>>,
    lifecycle: Lifecycle,
}

impl DrawNumberApp {
    /// Wire the views, read the settings file and start a game.
    ///
    /// Views are attached and started before the settings are read, so an
    /// interactive view may submit guesses early; those block until the
    /// model exists. Settings problems are reported to every view and
    /// replaced by [`Configuration::default`].
    pub fn new(
        views: Vec<Arc<dyn DrawNumberView>>,
        settings_path: impl AsRef<Path>,
        secrets: Box<dyn SecretSource>,
    ) -> Arc<Self> {
        let app = Arc::new(Self {
            views,
            model: OnceCell::new(),
            lifecycle: Lifecycle::default(),
        });

        let observer: Arc<dyn DrawNumberObserver> = app.clone();
        let observer: Weak<dyn DrawNumberObserver> = Arc::downgrade(&observer);
        for view in &app.views {
            view.set_observer(observer.clone());
            view.start();
        }
        debug!(views = app.views.len(), "Views attached");

        let configuration = app.resolve_configuration(settings_path.as_ref());
        if app
            .model
            .set(Mutex::new(GameModel::new(configuration, secrets)))
            .is_err()
        {
            warn!("Game model initialised twice");
        }
        app
    }

    /// Configuration the running game uses.
    pub fn configuration(&self) -> Configuration {
        self.model().lock().configuration()
    }

    #[cfg(test)]
    fn game_state(&self) -> crate::model::GameState {
        self.model().lock().state()
    }

    #[cfg(test)]
    fn remaining_attempts(&self) -> i32 {
        self.model().lock().remaining_attempts()
    }

    #[cfg(test)]
    fn is_quit_requested(&self) -> bool {
        *self.lifecycle.quit.lock()
    }

    /// Block until some view asks to quit.
    pub fn wait_for_quit(&self) {
        let mut quit = self.lifecycle.quit.lock();
        while !*quit {
            self.lifecycle.signal.wait(&mut quit);
        }
    }

    fn model(&self) -> &Mutex<GameModel> {
        self.model.wait()
    }

    fn resolve_configuration(&self, path: &Path) -> Configuration {
        let loaded = match load_configuration(path) {
            Ok(configuration) => configuration,
            Err(err) => {
                warn!(path = %path.display(), "Settings rejected: {err}");
                self.show_error(&format!(
                    "An error occurred: {err}. Starting the application with the default configuration..."
                ));
                return Configuration::default();
            }
        };

        match loaded.validate() {
            Ok(configuration) => {
                info!(%configuration, "Settings loaded");
                configuration
            }
            Err(err) => {
                warn!("Settings rejected: {err}");
                self.show_error(&format!(
                    "{err}. Starting the application with the default configuration..."
                ));
                Configuration::default()
            }
        }
    }

    fn show_error(&self, message: &str) {
        for view in &self.views {
            view.display_error(message);
        }
    }
}

impl DrawNumberObserver for DrawNumberApp {
    fn new_attempt(&self, n: i32) {
        let judged = self.model().lock().attempt(n);
        match judged {
            Ok(result) => {
                for view in &self.views {
                    view.result(result);
                }
            }
            Err(err) => {
                debug!("Guess rejected: {err}");
                for view in &self.views {
                    view.number_incorrect();
                }
            }
        }
    }

    fn reset_game(&self) {
        self.model().lock().reset();
    }

    fn quit(&self) {
        let mut quit = self.lifecycle.quit.lock();
        if !*quit {
            info!("Quit requested");
            *quit = true;
        }
        self.lifecycle.signal.notify_all();
    }
}
