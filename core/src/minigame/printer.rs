use rand::{Rng, RngCore};
use tracing::{debug, info};

use super::{cooling_down_message, Cooldown, Minigame, MinigameOutcome};
use crate::map::ObjectKind;
use crate::state::GameState;

pub const USB_STICK: &str = "usb_stick";
pub const PRINTED_MEMO: &str = "printed_memo";

/// Seconds a print job takes
const PRINT_TIME: f32 = 1.5;

/// Prints the memo from the USB stick. Sometimes jams.
pub struct Printer {
    cooldown: Cooldown,
    jam_chance: f64,
    /// Seconds left on the running job
    printing: Option<f32>,
}

impl Printer {
    pub fn new(cooldown_secs: f32, jam_chance: f64) -> Self {
        Self {
            cooldown: Cooldown::new(cooldown_secs),
            jam_chance: if jam_chance.is_nan() { 0.0 } else { jam_chance.clamp(0.0, 1.0) },
            printing: None,
        }
    }

    pub fn is_printing(&self) -> bool {
        self.printing.is_some()
    }
}

impl Minigame for Printer {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Printer
    }

    fn interact(&mut self, state: &GameState, _rng: &mut dyn RngCore) -> MinigameOutcome {
        if self.is_printing() {
            return MinigameOutcome::message("The printer is busy.");
        }
        if !self.cooldown.is_ready() {
            return cooling_down_message("printer", &self.cooldown);
        }
        if state.has_obtained(PRINTED_MEMO) {
            return MinigameOutcome::message("Nothing left to print.");
        }
        if !state.has_item(USB_STICK) {
            return MinigameOutcome::message("The printer is idle. You have nothing to print.");
        }

        debug!("Print job started");
        self.printing = Some(PRINT_TIME);
        MinigameOutcome::message("You plug in the USB stick. The printer whirs...")
    }

    fn update(&mut self, dt: f32, rng: &mut dyn RngCore) -> Option<MinigameOutcome> {
        self.cooldown.update(dt);

        let remaining = self.printing? - dt;
        if remaining > 0.0 {
            self.printing = Some(remaining);
            return None;
        }
        self.printing = None;

        if rng.gen_bool(self.jam_chance) {
            info!("Printer jammed");
            self.cooldown.start();
            return Some(MinigameOutcome::message("Paper jam! Give the printer a moment."));
        }

        Some(MinigameOutcome::produce(PRINTED_MEMO, "The memo comes out, still warm."))
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    fn status(&self) -> Option<String> {
        self.printing.map(|_| "Printing...".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with_usb() -> GameState {
        let items = ItemRegistry::builtin().unwrap();
        let mut state = GameState::new();
        state.receive_reward(items.make_inventory_item(USB_STICK));
        state
    }

    #[test]
    fn test_prints_memo_without_jams() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut printer = Printer::new(5.0, 0.0);
        let state = state_with_usb();

        printer.interact(&state, &mut rng);
        assert!(printer.is_printing());
        assert_eq!(printer.status().as_deref(), Some("Printing..."));
        assert!(printer.update(1.0, &mut rng).is_none());

        let done = printer.update(1.0, &mut rng).unwrap();
        assert_eq!(done.produced.as_deref(), Some(PRINTED_MEMO));
        assert_eq!(done.consumed, None);
        assert!(!printer.is_printing());
    }

    #[test]
    fn test_jam_starts_cooldown() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut printer = Printer::new(5.0, 1.0);
        let state = state_with_usb();

        printer.interact(&state, &mut rng);
        let jammed = printer.update(PRINT_TIME, &mut rng).unwrap();
        assert_eq!(jammed.produced, None);
        assert!(!printer.cooldown().is_ready());

        let retry = printer.interact(&state, &mut rng);
        assert!(retry.message.contains("moment"));
        assert!(!printer.is_printing());
    }

    #[test]
    fn test_nan_jam_chance_never_jams() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut printer = Printer::new(5.0, f64::NAN);
        let state = state_with_usb();

        printer.interact(&state, &mut rng);
        let done = printer.update(PRINT_TIME, &mut rng).unwrap();
        assert_eq!(done.produced.as_deref(), Some(PRINTED_MEMO));
    }

    #[test]
    fn test_memo_only_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut printer = Printer::new(5.0, 0.0);
        let mut state = state_with_usb();
        state.obtained_items.insert(PRINTED_MEMO.to_string());

        let outcome = printer.interact(&state, &mut rng);
        assert_eq!(outcome.message, "Nothing left to print.");
        assert!(!printer.is_printing());
    }

    #[test]
    fn test_needs_usb_stick() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut printer = Printer::new(5.0, 0.0);
        printer.interact(&GameState::new(), &mut rng);
        assert!(!printer.is_printing());
    }
}
