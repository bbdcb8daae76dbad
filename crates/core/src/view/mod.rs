//! Views and the observer they report user actions to.

/// Interactive view reading guesses from a text stream.
pub mod console;
/// Passive view writing events to a sink.
pub mod stream;

use std::sync::Weak;

use crate::model::DrawResult;

pub use console::ConsoleView;
pub use stream::StreamView;

/// Receiver of user actions; implemented by the application controller.
pub trait DrawNumberObserver: Send + Sync {
    /// A number was entered.
    fn new_attempt(&self, n: i32);
    /// The user asked for a fresh game.
    fn reset_game(&self);
    /// The user asked to leave.
    fn quit(&self);
}

/// Something that can present the game and, optionally, collect guesses.
pub trait DrawNumberView: Send + Sync {
    /// Attach the observer. Only the first call has an effect.
    fn set_observer(&self, observer: Weak<dyn DrawNumberObserver>);

    /// Begin presenting; interactive views start collecting input here.
    fn start(&self);

    /// Render the outcome of an attempt.
    fn result(&self, result: DrawResult);

    /// The last guess was rejected as outside the allowed range.
    fn number_incorrect(&self);

    /// Render an error message.
    fn display_error(&self, message: &str);
}
