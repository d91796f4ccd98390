use macroquad::prelude::*;
use treasure_hunt_core::{Direction, GameCommand, GameMode};

use crate::ui::{UiElementId, UiLayout};

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl HeldKeys {
    fn read() -> Self {
        Self {
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        }
    }

    fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Only one direction at a time: keep the current one while it is held,
    /// otherwise pick a new one in priority order
    fn resolve(&self, current: Option<Direction>) -> Option<Direction> {
        match current {
            Some(dir) if self.is_held(dir) => Some(dir),
            _ => {
                if self.up { Some(Direction::Up) }
                else if self.down { Some(Direction::Down) }
                else if self.left { Some(Direction::Left) }
                else if self.right { Some(Direction::Right) }
                else { None }
            }
        }
    }
}

/// Command for a click on a UI element in the given mode
fn click_command(mode: GameMode, id: UiElementId) -> Option<GameCommand> {
    match (mode, id) {
        (_, UiElementId::PanelClose) => Some(GameCommand::Back),
        (GameMode::Victory, UiElementId::MenuEntry(0)) => Some(GameCommand::NewGame),
        (GameMode::Victory, UiElementId::MenuEntry(_)) => Some(GameCommand::Back),
        (GameMode::Title, UiElementId::MenuEntry(i))
        | (GameMode::Dialogue, UiElementId::DialogueChoice(i))
        | (GameMode::Quiz, UiElementId::QuizOption(i))
        | (GameMode::Inventory, UiElementId::InventorySlot(i)) => Some(GameCommand::Choose(i)),
        _ => None,
    }
}

/// Keys that mean the same in every mode
fn mode_keys(mode: GameMode, commands: &mut Vec<GameCommand>) {
    let confirm = is_key_pressed(KeyCode::E)
        || is_key_pressed(KeyCode::Space)
        || is_key_pressed(KeyCode::Enter);

    match mode {
        GameMode::Title => {
            if is_key_pressed(KeyCode::N) || confirm {
                commands.push(GameCommand::NewGame);
            }
            if is_key_pressed(KeyCode::C) {
                commands.push(GameCommand::Continue);
            }
        }
        GameMode::Playing => {
            if confirm {
                commands.push(GameCommand::Interact);
            }
            if is_key_pressed(KeyCode::F5) {
                commands.push(GameCommand::Save);
            }
        }
        // Confirm picks the first choice, which is "OK" on one-line replies
        GameMode::Dialogue => {
            if confirm {
                commands.push(GameCommand::Choose(0));
            }
        }
        GameMode::Victory => {
            if is_key_pressed(KeyCode::N) {
                commands.push(GameCommand::NewGame);
            }
            if confirm {
                commands.push(GameCommand::Interact);
            }
        }
        GameMode::Quiz | GameMode::Inventory | GameMode::QuestLog => {}
    }

    if matches!(mode, GameMode::Dialogue | GameMode::Quiz | GameMode::Inventory) {
        for (i, key) in DIGIT_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                commands.push(GameCommand::Choose(i));
            }
        }
    }

    if matches!(mode, GameMode::Playing | GameMode::Inventory | GameMode::QuestLog) {
        if is_key_pressed(KeyCode::I) {
            commands.push(GameCommand::ToggleInventory);
        }
        if is_key_pressed(KeyCode::Q) {
            commands.push(GameCommand::ToggleQuestLog);
        }
    }

    if is_key_pressed(KeyCode::Escape) {
        commands.push(GameCommand::Back);
    }
}

pub struct InputHandler {
    // Track which direction was pressed first (for priority)
    current_dir: Option<Direction>,
    hovered: Option<UiElementId>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            current_dir: None,
            hovered: None,
        }
    }

    /// UI element under the mouse, as of the last `process` call
    pub fn hovered(&self) -> Option<UiElementId> {
        self.hovered
    }

    /// Read keyboard and mouse for this frame. `layout` is what the renderer
    /// registered as clickable on the previous frame.
    pub fn process(&mut self, mode: GameMode, layout: &UiLayout) -> Vec<GameCommand> {
        let mut commands = Vec::new();

        let (mouse_x, mouse_y) = mouse_position();
        self.hovered = layout.hit_test(mouse_x, mouse_y);
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(command) = self.hovered.and_then(|id| click_command(mode, id)) {
                commands.push(command);
            }
        }

        mode_keys(mode, &mut commands);

        // Movement repeats every frame while held; the game paces the steps
        if mode == GameMode::Playing {
            self.current_dir = HeldKeys::read().resolve(self.current_dir);
            if let Some(direction) = self.current_dir {
                commands.push(GameCommand::Move(direction));
            }
        } else {
            self.current_dir = None;
        }

        commands
    }
}
