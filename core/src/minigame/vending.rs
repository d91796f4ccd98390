use rand::RngCore;
use tracing::debug;

use super::{cooling_down_message, Cooldown, Minigame, MinigameOutcome};
use crate::map::ObjectKind;
use crate::state::GameState;

pub const COIN: &str = "coin";
pub const ENERGY_DRINK: &str = "energy_drink";

/// Takes a coin, gives an energy drink
pub struct VendingMachine {
    cooldown: Cooldown,
}

impl VendingMachine {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            cooldown: Cooldown::new(cooldown_secs),
        }
    }
}

impl Minigame for VendingMachine {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Vending
    }

    fn interact(&mut self, state: &GameState, _rng: &mut dyn RngCore) -> MinigameOutcome {
        if !self.cooldown.is_ready() {
            return cooling_down_message("vending machine", &self.cooldown);
        }
        if !state.has_item(COIN) {
            return MinigameOutcome::message("The vending machine wants a coin.");
        }

        debug!("Vending machine dispensed a drink");
        self.cooldown.start();
        MinigameOutcome::exchange(COIN, ENERGY_DRINK, "Clunk! An energy drink drops out.")
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
    use crate::data::ItemRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_needs_coin_and_respects_cooldown() {
        let items = ItemRegistry::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut machine = VendingMachine::new(2.0);
        let mut state = GameState::new();

        let outcome = machine.interact(&state, &mut rng);
        assert_eq!(outcome.produced, None);

        state.collect_item(None, items.make_inventory_item(COIN));
        let outcome = machine.interact(&state, &mut rng);
        assert_eq!(outcome.consumed.as_deref(), Some(COIN));
        assert_eq!(outcome.produced.as_deref(), Some(ENERGY_DRINK));

        // Second coin, but the machine is cooling down
        let outcome = machine.interact(&state, &mut rng);
        assert_eq!(outcome.produced, None);
        assert!(outcome.message.contains("moment"));

        machine.update(2.0, &mut rng);
        assert!(machine.interact(&state, &mut rng).produced.is_some());
    }
}
