use rand::RngCore;
use tracing::info;

use super::{cooling_down_message, Cooldown, Minigame, MinigameOutcome};
use crate::map::ObjectKind;
use crate::state::GameState;

pub const ACCESS_CODE: &str = "access_code";

/// The office computer. Using it opens the company quiz; passing earns the access code.
pub struct Computer {
    cooldown: Cooldown,
}

impl Computer {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            cooldown: Cooldown::new(cooldown_secs),
        }
    }

    /// The quiz session ended
    pub fn finish_quiz(&mut self, passed: bool, score: usize, total: usize) -> MinigameOutcome {
        info!("Quiz finished: {}/{} (passed: {})", score, total, passed);
        if passed {
            MinigameOutcome::produce(
                ACCESS_CODE,
                format!("{}/{} correct! The screen shows the access code.", score, total),
            )
        } else {
            self.cooldown.start();
            MinigameOutcome::message(format!(
                "{}/{} correct. Access denied, the computer locks you out for a while.",
                score, total
            ))
        }
    }
}

impl Minigame for Computer {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Computer
    }

    fn interact(&mut self, state: &GameState, _rng: &mut dyn RngCore) -> MinigameOutcome {
        if !self.cooldown.is_ready() {
            return cooling_down_message("computer", &self.cooldown);
        }
        if state.has_obtained(ACCESS_CODE) {
            return MinigameOutcome::message("You already have the access code.");
        }
        MinigameOutcome {
            message: "Answer the company quiz to log in.".to_string(),
            open_quiz: true,
            ..MinigameOutcome::default()
        }
    }

    fn update(&mut self, dt: f32, _rng: &mut dyn RngCore) -> Option<MinigameOutcome> {
        self.cooldown.update(dt);
        None
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_failed_quiz_locks_computer() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut computer = Computer::new(10.0);
        let state = GameState::new();

        assert!(computer.interact(&state, &mut rng).open_quiz);
        let failed = computer.finish_quiz(false, 1, 3);
        assert_eq!(failed.produced, None);
        assert!(!computer.interact(&state, &mut rng).open_quiz);

        computer.update(10.0, &mut rng);
        assert!(computer.interact(&state, &mut rng).open_quiz);
    }

    #[test]
    fn test_passed_quiz_gives_access_code() {
        let mut computer = Computer::new(10.0);
        let outcome = computer.finish_quiz(true, 3, 3);
        assert_eq!(outcome.produced.as_deref(), Some(ACCESS_CODE));
        assert!(computer.cooldown().is_ready());
    }

    #[test]
    fn test_access_code_only_once() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut computer = Computer::new(10.0);
        let mut state = GameState::new();
        state.obtained_items.insert(ACCESS_CODE.to_string());
        assert!(!computer.interact(&state, &mut rng).open_quiz);
    }
}
