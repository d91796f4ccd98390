//! Office machines the player can use: vending machine, printer, computer.
//!
//! Machines never touch the game state themselves. They read it and return a
//! `MinigameOutcome` that the game applies (items consumed and produced).

pub mod vending;
pub mod printer;
pub mod computer;

use rand::RngCore;

use crate::config::GameConfig;
use crate::map::ObjectKind;
use crate::state::GameState;

pub use computer::Computer;
pub use printer::Printer;
pub use vending::VendingMachine;

/// Count-down timer gating a machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    duration: f32,
    remaining: f32,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// What using (or waiting on) a machine did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MinigameOutcome {
    /// Shown to the player
    pub message: String,
    /// Item taken from the inventory
    pub consumed: Option<String>,
    /// Item handed to the player
    pub produced: Option<String>,
    /// Game should open the quiz screen
    pub open_quiz: bool,
}

impl MinigameOutcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn produce(item: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            produced: Some(item.to_string()),
            ..Self::default()
        }
    }

    pub fn exchange(consumed: &str, produced: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            consumed: Some(consumed.to_string()),
            produced: Some(produced.to_string()),
            open_quiz: false,
        }
    }
}

pub trait Minigame {
    fn kind(&self) -> ObjectKind;

    /// The player used the machine
    fn interact(&mut self, state: &GameState, rng: &mut dyn RngCore) -> MinigameOutcome;

    /// Advance timers. Machines working in the background report here when done.
    fn update(&mut self, dt: f32, rng: &mut dyn RngCore) -> Option<MinigameOutcome>;

    fn cooldown(&self) -> &Cooldown;

    /// Short status for the HUD while the machine is busy
    fn status(&self) -> Option<String> {
        None
    }
}

fn cooling_down_message(name: &str, cooldown: &Cooldown) -> MinigameOutcome {
    MinigameOutcome::message(format!(
        "The {} needs a moment ({:.0}s).",
        name,
        cooldown.remaining().ceil()
    ))
}

/// Every machine in the office
pub struct Minigames {
    pub vending: VendingMachine,
    pub printer: Printer,
    pub computer: Computer,
}

impl Minigames {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            vending: VendingMachine::new(config.vending_cooldown_secs),
            printer: Printer::new(config.printer_cooldown_secs, config.printer_jam_chance),
            computer: Computer::new(config.computer_cooldown_secs),
        }
    }

    pub fn get_mut(&mut self, kind: ObjectKind) -> &mut dyn Minigame {
        match kind {
            ObjectKind::Vending => &mut self.vending,
            ObjectKind::Printer => &mut self.printer,
            ObjectKind::Computer => &mut self.computer,
        }
    }

    pub fn get(&self, kind: ObjectKind) -> &dyn Minigame {
        match kind {
            ObjectKind::Vending => &self.vending,
            ObjectKind::Printer => &self.printer,
            ObjectKind::Computer => &self.computer,
        }
    }

    /// Advance every machine, collecting finished background work
    pub fn update(&mut self, dt: f32, rng: &mut dyn RngCore) -> Vec<MinigameOutcome> {
        let mut outcomes = Vec::new();
        for kind in [ObjectKind::Vending, ObjectKind::Printer, ObjectKind::Computer] {
            if let Some(outcome) = self.get_mut(kind).update(dt, rng) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}
