#![allow(missing_docs)]

//! Game model: secret number, attempt budget and guess evaluation.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{configuration::Configuration, error::GuessError};

/// Strategy used to pick the hidden number.
pub trait SecretSource: Send {
    /// Draw a value in `[min, max]`.
    fn draw(&mut self, min: i32, max: i32) -> i32;
}

/// Uniform draws from a ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct RandomSecret {
    rng: ChaCha8Rng,
}

impl RandomSecret {
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic stream; the same seed yields the same secrets.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SecretSource for RandomSecret {
    fn draw(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Always yields the same number, clamped into the bounds.
#[derive(Debug, Clone, Copy)]
pub struct FixedSecret(pub i32);

impl SecretSource for FixedSecret {
    fn draw(&mut self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max.max(min))
    }
}

/// Phase of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingGuess,
    Won,
    Lost,
}

/// How a single attempt was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The guess matched the secret.
    Correct,
    /// The guess was below the secret.
    TooLow,
    /// The guess was above the secret.
    TooHigh,
    /// The game had already been won before this guess.
    GameOverWon,
    /// The attempt budget is exhausted.
    GameOverLost,
}

impl Outcome {
    /// Whether the game is over after this outcome.
    pub fn ends_game(self) -> bool {
        !matches!(self, Outcome::TooLow | Outcome::TooHigh)
    }

    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Correct | Outcome::GameOverWon)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Correct => "Correct, you guessed it",
            Outcome::TooLow => "Your number is too low",
            Outcome::TooHigh => "Your number is too high",
            Outcome::GameOverWon => "You already won this game",
            Outcome::GameOverLost => "You lost",
        };
        f.write_str(text)
    }
}

/// Outcome of one attempt plus the budget left afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawResult {
    pub outcome: Outcome,
    pub remaining_attempts: i32,
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outcome.ends_game() {
            write!(f, "{}", self.outcome)
        } else {
            write!(
                f,
                "{} ({} attempts left)",
                self.outcome, self.remaining_attempts
            )
        }
    }
}

/// Mutable state of one guessing game.
///
/// Once the game is won or lost, further attempts leave the state untouched
/// and repeat the terminal outcome until [`GameModel::reset`] is called.
pub struct GameModel {
    configuration: Configuration,
    secrets: Box<dyn SecretSource>,
    secret: i32,
    remaining: i32,
    state: GameState,
}

impl GameModel {
    /// Start a game; `configuration` is expected to be consistent.
    pub fn new(configuration: Configuration, mut secrets: Box<dyn SecretSource>) -> Self {
        let secret = secrets.draw(configuration.min(), configuration.max());
        info!(%configuration, "New game");
        Self {
            configuration,
            secrets,
            secret,
            remaining: configuration.attempts(),
            state: GameState::AwaitingGuess,
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn remaining_attempts(&self) -> i32 {
        self.remaining
    }

    /// Judge a guess.
    ///
    /// Guesses on a finished game report the terminal outcome with no
    /// attempts left.
    pub fn attempt(&mut self, n: i32) -> Result<DrawResult, GuessError> {
        if !self.configuration.contains(n) {
            return Err(GuessError::OutOfRange {
                guess: n,
                min: self.configuration.min(),
                max: self.configuration.max(),
            });
        }

        let (outcome, remaining) = match self.state {
            GameState::Won => (Outcome::GameOverWon, 0),
            GameState::Lost => (Outcome::GameOverLost, 0),
            GameState::AwaitingGuess => {
                self.remaining = self.remaining.saturating_sub(1);
                let outcome = if n == self.secret {
                    self.state = GameState::Won;
                    Outcome::Correct
                } else if self.remaining <= 0 {
                    self.state = GameState::Lost;
                    Outcome::GameOverLost
                } else if n < self.secret {
                    Outcome::TooLow
                } else {
                    Outcome::TooHigh
                };
                (outcome, self.remaining)
            }
        };

        let result = DrawResult {
            outcome,
            remaining_attempts: remaining,
        };
        debug!(guess = n, ?outcome, remaining, "Attempt judged");
        Ok(result)
    }

    /// Draw a new secret and restore the attempt budget.
    pub fn reset(&mut self) {
        self.secret = self
            .secrets
            .draw(self.configuration.min(), self.configuration.max());
        self.remaining = self.configuration.attempts();
        self.state = GameState::AwaitingGuess;
        info!(configuration = %self.configuration, "Game reset");
    }
}

impl fmt::Debug for GameModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameModel")
            .field("configuration", &self.configuration)
            .field("remaining", &self.remaining)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model(min: i32, max: i32, attempts: i32, secret: i32) -> GameModel {
        let conf = Configuration::builder()
            .min(min)
            .max(max)
            .attempts(attempts)
            .build();
        GameModel::new(conf, Box::new(FixedSecret(secret)))
    }

    #[test]
    fn single_attempt_scenario() {
        let mut game = model(1, 2, 1, 1);
        let result = game.attempt(2).expect("2 is in range");
        assert_eq!(result.outcome, Outcome::GameOverLost);
        assert_eq!(result.remaining_attempts, 0);
        assert_eq!(game.state(), GameState::Lost);

        game.reset();
        let result = game.attempt(1).expect("1 is in range");
        assert_eq!(result.outcome, Outcome::Correct);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn wrong_guesses_report_direction() {
        let mut game = model(1, 100, 5, 42);
        assert_eq!(game.attempt(10).map(|r| r.outcome), Ok(Outcome::TooLow));
        assert_eq!(game.attempt(90).map(|r| r.outcome), Ok(Outcome::TooHigh));
        assert_eq!(game.remaining_attempts(), 3);
        assert_eq!(game.state(), GameState::AwaitingGuess);
    }

    #[test]
    fn budget_exhaustion_loses_on_last_attempt() {
        let mut game = model(0, 10, 4, 5);
        for expected_left in (1..4).rev() {
            let result = game.attempt(0).expect("in range");
            assert_eq!(result.outcome, Outcome::TooLow);
            assert_eq!(result.remaining_attempts, expected_left);
        }
        let last = game.attempt(0).expect("in range");
        assert_eq!(last.outcome, Outcome::GameOverLost);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn correct_on_last_attempt_is_still_correct() {
        let mut game = model(0, 10, 2, 7);
        game.attempt(1).expect("in range");
        let result = game.attempt(7).expect("in range");
        assert_eq!(result.outcome, Outcome::Correct);
        assert_eq!(result.remaining_attempts, 0);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn out_of_range_guess_leaves_state_untouched() {
        let mut game = model(1, 10, 3, 5);
        assert_eq!(
            game.attempt(11),
            Err(GuessError::OutOfRange {
                guess: 11,
                min: 1,
                max: 10
            })
        );
        assert!(game.attempt(0).is_err());
        assert_eq!(game.remaining_attempts(), 3);
        assert_eq!(game.state(), GameState::AwaitingGuess);
    }

    #[test]
    fn finished_games_repeat_their_outcome() {
        let mut won = model(1, 10, 3, 5);
        won.attempt(5).expect("in range");
        let again = won.attempt(2).expect("in range");
        assert_eq!(again.outcome, Outcome::GameOverWon);
        assert_eq!(again.remaining_attempts, 0);
        assert_eq!(won.remaining_attempts(), 2);
        assert_eq!(won.state(), GameState::Won);

        let mut lost = model(1, 10, 1, 5);
        lost.attempt(2).expect("in range");
        let again = lost.attempt(5).expect("in range");
        assert_eq!(again.outcome, Outcome::GameOverLost);
        assert_eq!(again.remaining_attempts, 0);
        assert_eq!(lost.state(), GameState::Lost);
    }

    #[test]
    fn exhausted_budget_does_not_underflow() {
        let mut game = model(1, 10, i32::MIN, 5);
        let result = game.attempt(2).expect("in range");
        assert_eq!(result.outcome, Outcome::GameOverLost);
        assert_eq!(result.remaining_attempts, i32::MIN);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn reset_restores_budget_from_any_state() {
        let mut game = model(1, 10, 2, 5);
        game.attempt(5).expect("in range");
        game.reset();
        assert_eq!(game.state(), GameState::AwaitingGuess);
        assert_eq!(game.remaining_attempts(), 2);

        game.attempt(1).expect("in range");
        game.attempt(1).expect("in range");
        assert_eq!(game.state(), GameState::Lost);
        game.reset();
        assert_eq!(game.state(), GameState::AwaitingGuess);
        assert_eq!(game.remaining_attempts(), 2);
    }

    #[test]
    fn seeded_secrets_are_reproducible_and_in_bounds() {
        let mut a = RandomSecret::seeded(7);
        let mut b = RandomSecret::seeded(7);
        for _ in 0..50 {
            let drawn = a.draw(-3, 3);
            assert_eq!(drawn, b.draw(-3, 3));
            assert!((-3..=3).contains(&drawn));
        }
        assert_eq!(a.draw(4, 4), 4);
    }

    #[test]
    fn display_includes_remaining_only_mid_game() {
        let mid = DrawResult {
            outcome: Outcome::TooHigh,
            remaining_attempts: 3,
        };
        assert_eq!(mid.to_string(), "Your number is too high (3 attempts left)");
        let end = DrawResult {
            outcome: Outcome::GameOverLost,
            remaining_attempts: 0,
        };
        assert_eq!(end.to_string(), "You lost");
    }

    proptest! {
        #[test]
        fn only_out_of_range_guesses_fail(
            min in -500i32..500,
            span in 1i32..500,
            guess in -1_500i32..1_500,
            seed in any::<u64>(),
        ) {
            let max = min + span;
            let conf = Configuration::builder().min(min).max(max).attempts(3).build();
            let mut game = GameModel::new(conf, Box::new(RandomSecret::seeded(seed)));
            let in_range = (min..=max).contains(&guess);
            prop_assert_eq!(game.attempt(guess).is_ok(), in_range);
        }
    }
}
