//! Game
//!
//! Top-level orchestrator. Turns input commands into state changes and runs
//! the per-frame update. The client owns one `Game` and draws from its
//! read-only accessors.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::data::ItemRegistry;
use crate::dialogue::{DialogueAction, DialogueSession, DialogueStep};
use crate::map::{MapDefinition, MapManager, ObjectKind, Tile, START_MAP};
use crate::minigame::{MinigameOutcome, Minigames};
use crate::npc::NpcRegistry;
use crate::player::{Direction, Player};
use crate::quest::{QuestEvent, QuestEventResult, QuestRegistry, QuestSystem};
use crate::quiz::{QuizData, QuizSession};
use crate::save::{self, SaveData, SaveError, SaveStorage};
use crate::state::GameState;

/// Notifications kept on screen at once
const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Title,
    Playing,
    Dialogue,
    Quiz,
    Inventory,
    QuestLog,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Move(Direction),
    Interact,
    /// Pick a dialogue choice, quiz answer, menu entry or inventory slot
    Choose(usize),
    Back,
    ToggleInventory,
    ToggleQuestLog,
    NewGame,
    Continue,
    Save,
}

/// Short message shown by the HUD
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub remaining: f32,
    pub duration: f32,
}

impl Notification {
    /// 1.0 when fresh, fading to 0.0
    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

pub struct Game {
    config: GameConfig,
    items: ItemRegistry,
    npcs: NpcRegistry,
    quiz_data: QuizData,
    maps: MapManager,
    quests: QuestSystem,
    minigames: Minigames,
    state: GameState,
    player: Player,
    camera: Camera,
    mode: GameMode,
    dialogue: Option<DialogueSession>,
    quiz: Option<QuizSession>,
    notifications: Vec<Notification>,
    selected_item: Option<usize>,
    storage: Box<dyn SaveStorage>,
    rng: StdRng,
    autosave_timer: f32,
}

impl Game {
    /// Load every data table and start at the title screen
    pub fn new(config: GameConfig, storage: Box<dyn SaveStorage>, seed: u64) -> Result<Self, String> {
        let items = ItemRegistry::builtin()?;
        let npcs = NpcRegistry::builtin()?;
        let quiz_data = QuizData::builtin()?;
        let maps = MapManager::builtin()?;
        let quest_registry = QuestRegistry::builtin()?;

        let npc_ids = npcs.ids();
        let problems = quest_registry.validate(&items, &npc_ids) + maps.validate(&items, &npc_ids);
        if problems > 0 {
            warn!("Data tables have {} problems", problems);
        }

        let spawn = maps.current().spawn;
        let minigames = Minigames::new(&config);

        info!(
            "Game data loaded: {} items, {} NPCs, {} quests, {} maps",
            items.len(),
            npcs.len(),
            quest_registry.len(),
            maps.maps().len()
        );

        Ok(Self {
            camera: Camera::default(),
            quests: QuestSystem::new(quest_registry),
            items,
            npcs,
            quiz_data,
            maps,
            minigames,
            state: GameState::new(),
            player: Player::new(spawn.0, spawn.1),
            mode: GameMode::Title,
            dialogue: None,
            quiz: None,
            notifications: Vec::new(),
            selected_item: None,
            storage,
            rng: StdRng::seed_from_u64(seed),
            autosave_timer: 0.0,
            config,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn current_map(&self) -> &MapDefinition {
        self.maps.current()
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn npcs(&self) -> &NpcRegistry {
        &self.npcs
    }

    pub fn quests(&self) -> &QuestSystem {
        &self.quests
    }

    pub fn minigames(&self) -> &Minigames {
        &self.minigames
    }

    pub fn dialogue(&self) -> Option<&DialogueSession> {
        self.dialogue.as_ref()
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.selected_item
    }

    pub fn has_save(&self) -> bool {
        save::has_save(self.storage.as_ref(), &self.config.save_key)
    }

    pub fn storage(&self) -> &dyn SaveStorage {
        self.storage.as_ref()
    }

    /// One line telling the player what to do next
    pub fn guide_text(&self) -> Option<String> {
        let guide = self.quests.guide(&self.state)?;
        Some(guide.instruction(self.npcs.name(&guide.quest_giver), &self.items))
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        let duration = self.config.notification_secs;

        // Repeating the latest message only refreshes it
        if let Some(last) = self.notifications.last_mut() {
            if last.text == text {
                last.remaining = duration;
                return;
            }
        }

        debug!("Notification: {}", text);
        self.notifications.push(Notification {
            text,
            remaining: duration,
            duration,
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn handle(&mut self, command: GameCommand) {
        let mode = self.mode;
        match mode {
            GameMode::Title => match command {
                GameCommand::NewGame | GameCommand::Choose(0) => self.new_game(),
                GameCommand::Continue | GameCommand::Choose(1) => {
                    if !self.continue_game() {
                        self.notify("No saved game found.");
                    }
                }
                _ => {}
            },
            GameMode::Playing => match command {
                GameCommand::Move(direction) => self.try_move(direction),
                GameCommand::Interact => self.interact(),
                GameCommand::ToggleInventory => {
                    self.selected_item = None;
                    self.mode = GameMode::Inventory;
                }
                GameCommand::ToggleQuestLog => self.mode = GameMode::QuestLog,
                GameCommand::Save => self.save_with_notice(),
                GameCommand::NewGame => self.new_game(),
                _ => {}
            },
            GameMode::Dialogue => match command {
                GameCommand::Choose(index) => self.choose_dialogue(index),
                GameCommand::Back => self.close_dialogue(),
                _ => {}
            },
            GameMode::Quiz => match command {
                GameCommand::Choose(index) => self.answer_quiz(index),
                GameCommand::Back => self.finish_quiz(),
                _ => {}
            },
            GameMode::Inventory => match command {
                GameCommand::Choose(index) if index < self.state.inventory.len() => {
                    self.selected_item = Some(index);
                }
                GameCommand::ToggleInventory | GameCommand::Back => self.mode = GameMode::Playing,
                GameCommand::ToggleQuestLog => self.mode = GameMode::QuestLog,
                _ => {}
            },
            GameMode::QuestLog => match command {
                GameCommand::ToggleQuestLog | GameCommand::Back => self.mode = GameMode::Playing,
                GameCommand::ToggleInventory => self.mode = GameMode::Inventory,
                _ => {}
            },
            GameMode::Victory => match command {
                GameCommand::NewGame => self.new_game(),
                GameCommand::Back | GameCommand::Interact => self.mode = GameMode::Playing,
                _ => {}
            },
        }
    }

    /// Start over with a fresh state
    pub fn new_game(&mut self) {
        info!("Starting new game");
        self.state = GameState::new();
        self.quests.reset();
        self.minigames = Minigames::new(&self.config);
        self.dialogue = None;
        self.quiz = None;
        self.notifications.clear();
        self.autosave_timer = 0.0;

        self.enter_map(START_MAP, None);
        self.player.facing = Direction::Down;
        self.mode = GameMode::Playing;
        self.notify("Welcome to the 10th anniversary treasure hunt! Talk to the receptionist.");
    }

    /// Load the saved game. Returns false if there is none.
    pub fn continue_game(&mut self) -> bool {
        let Some(data) = save::load_game(self.storage.as_ref(), &self.config.save_key) else {
            return false;
        };
        self.restore(data);
        true
    }

    fn restore(&mut self, data: SaveData) {
        self.state = data.game_state;
        self.quests.restore(data.quest_state, &self.state);
        self.minigames = Minigames::new(&self.config);
        self.dialogue = None;
        self.quiz = None;
        self.notifications.clear();
        self.autosave_timer = 0.0;

        let map_id = if self.maps.get(&data.map_id).is_some() {
            data.map_id
        } else {
            warn!("Saved map '{}' does not exist, starting in {}", data.map_id, START_MAP);
            START_MAP.to_string()
        };

        // A damaged position falls back to the map's spawn
        let position = data.player.as_ref()
            .filter(|p| self.maps.get(&map_id).is_some_and(|m| m.is_walkable(p.x, p.y)))
            .map(|p| (p.x, p.y));
        self.enter_map(&map_id, position);
        if let Some(saved) = data.player {
            self.player.facing = saved.facing;
        }

        self.mode = if self.quests.all_completed() {
            GameMode::Victory
        } else {
            GameMode::Playing
        };
        info!("Game loaded ({} quests completed)", self.state.completed_quests.len());
        self.notify("Game loaded.");
    }

    pub fn save(&mut self) -> Result<(), SaveError> {
        let data = SaveData::new(self.maps.current_id(), &self.player, &self.state, self.quests.log());
        save::save_game(self.storage.as_mut(), &self.config.save_key, &data)
    }

    fn save_with_notice(&mut self) {
        match self.save() {
            Ok(()) => self.notify("Game saved."),
            Err(e) => {
                warn!("Save failed: {}", e);
                self.notify(format!("Could not save: {}", e));
            }
        }
    }

    // ========================================================================
    // Movement
    // ========================================================================

    fn try_move(&mut self, direction: Direction) {
        self.player.facing = direction;
        if !self.player.can_step() {
            return;
        }

        let (dx, dy) = direction.delta();
        let (tx, ty) = (self.player.x + dx, self.player.y + dy);
        let map = self.maps.current();

        let locked_by = map.door_at(tx, ty)
            .and_then(|door| map.door_lock(door, &self.state))
            .map(|item| self.items.display_name(item).to_string());
        if let Some(name) = locked_by {
            self.player.move_cooldown = self.config.move_interval_secs;
            self.notify(format!("The door is locked. You need the {}.", name));
            return;
        }

        if !self.maps.current().is_walkable(tx, ty) {
            return;
        }

        self.player.step_to(tx, ty, self.config.move_interval_secs);
        self.pick_up_at(tx, ty);
        self.use_door_at(tx, ty);
    }

    /// Walk through an unlocked door the player is standing on
    fn use_door_at(&mut self, x: i32, y: i32) -> bool {
        let map = self.maps.current();
        let Some(door) = map.door_at(x, y) else {
            return false;
        };
        if map.door_lock(door, &self.state).is_some() {
            return false;
        }
        let (target, tx, ty) = (door.target.clone(), door.target_x, door.target_y);
        self.enter_map(&target, Some((tx, ty)));
        true
    }

    fn enter_map(&mut self, map_id: &str, position: Option<(i32, i32)>) {
        let first_visit = !self.state.visited_maps.contains(map_id);
        let (name, spawn) = match self.maps.change_map(map_id, &mut self.state) {
            Ok(map) => (map.name.clone(), map.spawn),
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        let (x, y) = position.unwrap_or(spawn);
        self.player.teleport(x, y);
        self.snap_camera();

        if first_visit && self.mode != GameMode::Title {
            self.notify(format!("Entered {}", name));
        }
    }

    fn snap_camera(&mut self) {
        let map = self.maps.current();
        self.camera.follow(
            self.player.visual_x,
            self.player.visual_y,
            map.width,
            map.height,
            self.config.tile_size,
        );
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// NPC, machine, item, then door, in that order
    fn interact(&mut self) {
        if let Some(npc_id) = self.npc_in_front() {
            self.open_dialogue(&npc_id);
            return;
        }

        let (fx, fy) = self.player.facing_tile();
        if let Some(kind) = self.maps.current().object_at(fx, fy).map(|o| o.kind) {
            self.use_machine(kind);
            return;
        }

        let (px, py) = (self.player.x, self.player.y);
        if self.pick_up_at(px, py) || self.pick_up_at(fx, fy) {
            return;
        }

        self.use_door_at(px, py);
    }

    /// NPC on the facing tile, or across a counter
    fn npc_in_front(&self) -> Option<String> {
        let map = self.maps.current();
        let (fx, fy) = self.player.facing_tile();
        if let Some(npc) = map.npc_at(fx, fy) {
            return Some(npc.id.clone());
        }
        if map.tile(fx, fy) == Some(Tile::Counter) {
            let (dx, dy) = self.player.facing.delta();
            return map.npc_at(fx + dx, fy + dy).map(|n| n.id.clone());
        }
        None
    }

    fn pick_up_at(&mut self, x: i32, y: i32) -> bool {
        let Some(placement) = self.maps.current().item_at(x, y, &self.state).cloned() else {
            return false;
        };

        let item = self.items.make_inventory_item(&placement.item);
        let name = self.items.display_name(&placement.item).to_string();
        self.state.collect_item(Some(&placement.id), item);
        self.notify(format!("Picked up {}", name));
        self.quest_event(QuestEvent::ItemCollected { item: placement.item });
        true
    }

    fn use_machine(&mut self, kind: ObjectKind) {
        debug!("Using {}", kind.as_str());
        let outcome = self.minigames.get_mut(kind).interact(&self.state, &mut self.rng);
        self.apply_outcome(outcome);
    }

    /// Carry out what a machine asked for
    fn apply_outcome(&mut self, outcome: MinigameOutcome) {
        if !outcome.message.is_empty() {
            self.notify(outcome.message);
        }

        if let Some(item) = outcome.consumed {
            if self.state.remove_item(&item).is_some() {
                self.quest_event(QuestEvent::ItemRemoved { item });
            }
        }

        if let Some(item) = outcome.produced {
            let name = self.items.display_name(&item).to_string();
            self.state.collect_item(None, self.items.make_inventory_item(&item));
            self.notify(format!("Received {}", name));
            self.quest_event(QuestEvent::ItemCollected { item });
        }

        if outcome.open_quiz {
            self.start_quiz();
        }
    }

    fn quest_event(&mut self, event: QuestEvent) {
        let results = self.quests.handle_event(&event, &self.state);
        for message in self.describe_quest_results(&results) {
            self.notify(message);
        }
    }

    fn describe_quest_results(&self, results: &[QuestEventResult]) -> Vec<String> {
        let mut messages = Vec::new();
        for result in results {
            let Some(quest) = self.quests.manager().get_quest_by_id(result.quest_id) else {
                continue;
            };
            let giver = self.npcs.name(&quest.quest_giver);
            if result.unlocked() {
                messages.push(format!("{} has a new request for you.", giver));
            } else if result.became_ready() {
                messages.push(format!("You have everything for \"{}\". Return to {}.", quest.title, giver));
            }
        }
        messages
    }

    // ========================================================================
    // Dialogue
    // ========================================================================

    fn open_dialogue(&mut self, npc_id: &str) {
        let Some(npc) = self.npcs.get(npc_id) else {
            warn!("Talking to unknown NPC '{}'", npc_id);
            return;
        };

        let quest = self.quests.get_quest_by_npc(npc_id)
            .map(|q| (q, self.quests.phase(q.id)));
        let session = DialogueSession::open(&npc.id, &npc.name, &npc.dialogue, quest);

        self.dialogue = Some(session);
        self.mode = GameMode::Dialogue;
        self.quest_event(QuestEvent::NpcInteraction { npc_id: npc_id.to_string() });
    }

    fn choose_dialogue(&mut self, index: usize) {
        let Some(session) = self.dialogue.as_mut() else {
            self.mode = GameMode::Playing;
            return;
        };

        match session.choose(index) {
            None | Some(DialogueStep::Next) => {}
            Some(DialogueStep::End) => self.close_dialogue(),
            Some(DialogueStep::Action(DialogueAction::End)) => self.close_dialogue(),
            Some(DialogueStep::Action(DialogueAction::AcceptQuest)) => self.accept_from_dialogue(),
            Some(DialogueStep::Action(DialogueAction::SubmitItems)) => self.submit_from_dialogue(),
        }
    }

    fn accept_from_dialogue(&mut self) {
        let Some(quest_id) = self.dialogue.as_ref().and_then(|d| d.quest_id) else {
            self.close_dialogue();
            return;
        };

        self.quest_event(QuestEvent::QuestAccepted { quest_id });

        let accepted = self.quests.manager()
            .get_quest_by_id(quest_id)
            .filter(|_| self.quests.phase(quest_id).is_started())
            .map(|quest| (quest.title.clone(), quest.progress_text()));

        let reply = match accepted {
            Some((title, progress_text)) => {
                self.notify(format!("Quest accepted: {}", title));
                format!("Thank you! {}", progress_text)
            }
            None => "Hmm, maybe later.".to_string(),
        };

        if let Some(session) = self.dialogue.as_mut() {
            session.say(&reply);
        }
    }

    fn submit_from_dialogue(&mut self) {
        let Some(npc_id) = self.dialogue.as_ref().map(|d| d.npc_id.clone()) else {
            return;
        };

        let reply = match self.quests.submit_items(&npc_id, &mut self.state, &self.items) {
            Ok(outcome) => {
                let complete_text = self.quests.manager()
                    .get_quest_by_id(outcome.quest_id)
                    .map(|q| q.complete_text())
                    .unwrap_or_default();
                let reward = self.items.display_name(&outcome.reward).to_string();
                self.notify(format!("Received {}", reward));
                self.quest_event(QuestEvent::ItemsSubmitted { quest_id: outcome.quest_id });
                complete_text
            }
            Err(rejection) => rejection.to_string(),
        };

        if let Some(session) = self.dialogue.as_mut() {
            session.say(&reply);
        }
    }

    fn close_dialogue(&mut self) {
        self.dialogue = None;
        self.mode = if self.quests.all_completed() {
            info!("All quests completed");
            GameMode::Victory
        } else {
            GameMode::Playing
        };
    }

    // ========================================================================
    // Quiz
    // ========================================================================

    fn start_quiz(&mut self) {
        let session = QuizSession::new(
            &self.quiz_data,
            self.config.quiz_questions,
            self.config.quiz_pass_mark,
            &mut self.rng,
        );
        if session.is_finished() {
            warn!("Quiz has no questions");
            return;
        }
        self.quiz = Some(session);
        self.mode = GameMode::Quiz;
    }

    fn answer_quiz(&mut self, index: usize) {
        let Some(session) = self.quiz.as_mut() else {
            self.mode = GameMode::Playing;
            return;
        };
        let Some(result) = session.answer(index) else {
            return;
        };

        self.notify(if result.correct { "Correct!" } else { "Wrong!" });
        if result.finished {
            self.finish_quiz();
        }
    }

    /// End the quiz. Leaving early counts as a failed attempt.
    fn finish_quiz(&mut self) {
        let Some(session) = self.quiz.take() else {
            return;
        };
        let (_, total) = session.position();
        let outcome = self.minigames.computer.finish_quiz(session.passed(), session.score(), total);
        self.mode = GameMode::Playing;
        self.apply_outcome(outcome);
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    pub fn update(&mut self, delta: f32) {
        for notification in self.notifications.iter_mut() {
            notification.remaining -= delta;
        }
        self.notifications.retain(|n| n.remaining > 0.0);

        if self.mode == GameMode::Title {
            return;
        }

        self.player.update(delta);
        self.snap_camera();

        for outcome in self.minigames.update(delta, &mut self.rng) {
            self.apply_outcome(outcome);
        }

        if self.config.autosave_secs > 0.0 {
            self.autosave_timer += delta;
            if self.autosave_timer >= self.config.autosave_secs {
                self.autosave_timer = 0.0;
                if let Err(e) = self.save() {
                    warn!("Autosave failed: {}", e);
                    self.notify("Autosave failed.");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{QuestLog, QuestPhase};
    use crate::save::{MemoryStorage, SAVE_KEY};

    fn test_config() -> GameConfig {
        GameConfig {
            printer_jam_chance: 0.0,
            autosave_secs: 0.0,
            ..GameConfig::default()
        }
    }

    fn new_game() -> Game {
        let mut game = Game::new(test_config(), Box::new(MemoryStorage::new()), 42).unwrap();
        game.handle(GameCommand::NewGame);
        game
    }

    /// Put the player somewhere without walking there
    fn warp(game: &mut Game, map: &str, x: i32, y: i32, facing: Direction) {
        game.enter_map(map, Some((x, y)));
        game.player.facing = facing;
    }

    fn walk(game: &mut Game, direction: Direction, steps: usize) {
        for _ in 0..steps {
            game.handle(GameCommand::Move(direction));
            game.update(1.0);
        }
    }

    /// Talk to the NPC in front and pick choices in order
    fn talk(game: &mut Game, choices: &[usize]) {
        game.handle(GameCommand::Interact);
        assert_eq!(game.mode(), GameMode::Dialogue);
        for &choice in choices {
            game.handle(GameCommand::Choose(choice));
        }
    }

    /// Accept the quest offered by the NPC in front
    fn accept(game: &mut Game) {
        talk(game, &[0, 0]);
        assert_ne!(game.mode(), GameMode::Dialogue);
    }

    /// Hand in items to the NPC in front
    fn hand_in(game: &mut Game) {
        talk(game, &[0]);
        let text = game.dialogue().map(|d| d.text().to_string()).unwrap_or_default();
        game.handle(GameCommand::Choose(0));
        assert!(!text.starts_with("You still need"), "{}", text);
    }

    #[test]
    fn test_starts_at_title() {
        let game = Game::new(test_config(), Box::new(MemoryStorage::new()), 1).unwrap();
        assert_eq!(game.mode(), GameMode::Title);
        assert!(!game.has_save());
    }

    #[test]
    fn test_new_game_state() {
        let game = new_game();
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.current_map().id, "lobby");
        assert_eq!((game.player().x, game.player().y), (7, 8));
        assert!(game.state().visited_maps.contains("lobby"));
        assert_eq!(game.guide_text().unwrap(), "Talk to Rita to start 'Lost and Found'");
    }

    #[test]
    fn test_walk_and_pick_up() {
        let mut game = new_game();
        walk(&mut game, Direction::Right, 6);
        walk(&mut game, Direction::Up, 7);
        assert_eq!((game.player().x, game.player().y), (13, 1));
        assert!(game.state().has_item("visitor_badge"));
        assert!(game.state().is_picked_up("lobby_badge"));

        // Wall to the north
        walk(&mut game, Direction::Up, 1);
        assert_eq!((game.player().x, game.player().y), (13, 1));
        assert_eq!(game.player().facing, Direction::Up);
    }

    #[test]
    fn test_movement_respects_cooldown() {
        let mut game = new_game();
        game.handle(GameCommand::Move(Direction::Left));
        game.handle(GameCommand::Move(Direction::Left));
        assert_eq!(game.player().x, 6);
        game.update(1.0);
        game.handle(GameCommand::Move(Direction::Left));
        assert_eq!(game.player().x, 5);
    }

    #[test]
    fn test_locked_door_stays_closed() {
        let mut game = new_game();
        walk(&mut game, Direction::Right, 1);
        walk(&mut game, Direction::Up, 10);
        assert_eq!((game.player().x, game.player().y), (8, 1));
        assert_eq!(game.current_map().id, "lobby");
        assert!(game.notifications().iter().any(|n| n.text.contains("Office Keycard")));
    }

    #[test]
    fn test_unlocked_door_changes_map() {
        let mut game = new_game();
        warp(&mut game, "lobby", 1, 6, Direction::Left);
        walk(&mut game, Direction::Left, 1);
        assert_eq!(game.current_map().id, "break_room");
        assert_eq!((game.player().x, game.player().y), (10, 6));
        assert!(game.state().visited_maps.contains("break_room"));
    }

    #[test]
    fn test_npc_blocks_and_talks_across_counter() {
        let mut game = new_game();
        warp(&mut game, "lobby", 5, 4, Direction::Up);
        walk(&mut game, Direction::Up, 1);
        assert_eq!((game.player().x, game.player().y), (5, 4));

        game.handle(GameCommand::Interact);
        assert_eq!(game.mode(), GameMode::Dialogue);
        assert_eq!(game.dialogue().unwrap().speaker, "Rita");

        game.handle(GameCommand::Choose(9));
        assert_eq!(game.mode(), GameMode::Dialogue);
        game.handle(GameCommand::Back);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_vending_machine_cooldown() {
        let mut game = new_game();
        warp(&mut game, "lobby", 2, 9, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "break_room", 1, 4, Direction::Up);
        game.handle(GameCommand::Interact);
        assert_eq!(game.state().inventory.count("coin"), 2);

        warp(&mut game, "break_room", 10, 2, Direction::Up);
        game.handle(GameCommand::Interact);
        game.handle(GameCommand::Interact);
        assert_eq!(game.state().inventory.count("energy_drink"), 1);
        assert_eq!(game.state().inventory.count("coin"), 1);

        game.update(game.config().vending_cooldown_secs);
        game.handle(GameCommand::Interact);
        assert_eq!(game.state().inventory.count("energy_drink"), 2);
        assert_eq!(game.state().inventory.count("coin"), 0);
    }

    #[test]
    fn test_failed_quiz_gives_nothing() {
        let mut game = new_game();
        warp(&mut game, "office", 13, 8, Direction::Up);
        game.handle(GameCommand::Interact);
        assert_eq!(game.mode(), GameMode::Quiz);
        game.handle(GameCommand::Back);
        assert_eq!(game.mode(), GameMode::Playing);
        assert!(!game.state().has_item("access_code"));

        // Locked out
        game.handle(GameCommand::Interact);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_inventory_and_quest_log_toggle() {
        let mut game = new_game();
        game.handle(GameCommand::ToggleInventory);
        assert_eq!(game.mode(), GameMode::Inventory);
        game.handle(GameCommand::Choose(3));
        assert_eq!(game.selected_item(), None);
        game.handle(GameCommand::ToggleQuestLog);
        assert_eq!(game.mode(), GameMode::QuestLog);
        game.handle(GameCommand::Back);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_save_and_continue() {
        let mut game = new_game();
        warp(&mut game, "lobby", 5, 4, Direction::Up);
        accept(&mut game);
        warp(&mut game, "lobby", 13, 2, Direction::Up);
        game.handle(GameCommand::Interact);
        game.handle(GameCommand::Save);
        assert!(game.has_save());

        let json = game.storage().get(SAVE_KEY).unwrap().unwrap();
        let mut storage = MemoryStorage::new();
        storage.set(SAVE_KEY, &json).unwrap();

        let mut loaded = Game::new(test_config(), Box::new(storage), 7).unwrap();
        loaded.handle(GameCommand::Continue);
        assert_eq!(loaded.mode(), GameMode::Playing);
        assert_eq!(loaded.current_map().id, "lobby");
        assert_eq!((loaded.player().x, loaded.player().y), (13, 2));
        assert_eq!(loaded.state().items_collected, game.state().items_collected);
        assert_eq!(loaded.state().visited_maps, game.state().visited_maps);
        assert_eq!(loaded.quests().phase(1), QuestPhase::ReadyToSubmit);
        // Picked up items stay gone
        assert!(loaded.current_map().item_at(13, 1, loaded.state()).is_none());
    }

    #[test]
    fn test_saved_position_on_npc_uses_spawn() {
        let state = GameState::new();
        let data = SaveData::new("lobby", &Player::new(5, 2), &state, &QuestLog::default());
        let mut storage = MemoryStorage::new();
        save::save_game(&mut storage, SAVE_KEY, &data).unwrap();

        let mut game = Game::new(test_config(), Box::new(storage), 7).unwrap();
        game.handle(GameCommand::Continue);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!((game.player().x, game.player().y), (7, 8));
    }

    #[test]
    fn test_continue_without_save() {
        let mut game = Game::new(test_config(), Box::new(MemoryStorage::new()), 1).unwrap();
        game.handle(GameCommand::Continue);
        assert_eq!(game.mode(), GameMode::Title);
        assert_eq!(game.notifications().len(), 1);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut game = Game::new(test_config(), Box::new(MemoryStorage::with_quota(8)), 1).unwrap();
        game.handle(GameCommand::NewGame);
        game.handle(GameCommand::Save);
        assert!(game.notifications().iter().any(|n| n.text.starts_with("Could not save")));
        assert_eq!(game.mode(), GameMode::Playing);
    }

    /// Storage that is never reachable, like a locked browser store
    struct UnavailableStorage;

    impl SaveStorage for UnavailableStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, SaveError> {
            Err(SaveError::Unavailable("locked".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), SaveError> {
            Err(SaveError::Unavailable("locked".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), SaveError> {
            Err(SaveError::Unavailable("locked".to_string()))
        }
    }

    #[test]
    fn test_unavailable_storage_is_reported() {
        let config = GameConfig { autosave_secs: 5.0, ..test_config() };
        let mut game = Game::new(config, Box::new(UnavailableStorage), 1).unwrap();
        assert!(!game.has_save());
        game.handle(GameCommand::NewGame);

        game.handle(GameCommand::Save);
        assert!(game.notifications().iter().any(|n| n.text == "Could not save: Storage unavailable: locked"));
        assert!(!game.notifications().iter().any(|n| n.text == "Game saved."));

        game.update(6.0);
        assert!(game.notifications().iter().any(|n| n.text == "Autosave failed."));
    }

    #[test]
    fn test_autosave() {
        let config = GameConfig { autosave_secs: 5.0, ..test_config() };
        let mut game = Game::new(config, Box::new(MemoryStorage::new()), 1).unwrap();
        game.handle(GameCommand::NewGame);
        game.update(3.0);
        assert!(!game.has_save());
        game.update(3.0);
        assert!(game.has_save());
    }

    #[test]
    fn test_notifications_expire() {
        let mut game = new_game();
        assert!(!game.notifications().is_empty());
        game.update(game.config().notification_secs + 0.1);
        assert!(game.notifications().is_empty());
    }

    #[test]
    fn test_full_play_through() {
        let mut game = new_game();

        // 1. Lost and Found
        warp(&mut game, "lobby", 5, 4, Direction::Up);
        accept(&mut game);
        warp(&mut game, "lobby", 13, 2, Direction::Up);
        game.handle(GameCommand::Interact);
        warp(&mut game, "lobby", 5, 4, Direction::Up);
        hand_in(&mut game);
        assert!(game.state().has_item("office_keycard"));

        // 2. Fuel for IT
        warp(&mut game, "office", 7, 7, Direction::Up);
        accept(&mut game);
        warp(&mut game, "lobby", 2, 9, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "break_room", 10, 2, Direction::Up);
        game.handle(GameCommand::Interact);
        assert!(game.state().has_item("energy_drink"));
        warp(&mut game, "office", 7, 7, Direction::Up);
        hand_in(&mut game);
        assert!(game.state().has_item("usb_stick"));

        // 3. Print the Memo
        warp(&mut game, "office", 3, 4, Direction::Up);
        accept(&mut game);
        warp(&mut game, "office", 13, 2, Direction::Up);
        game.handle(GameCommand::Interact);
        game.update(2.0);
        assert!(game.state().has_item("printed_memo"));
        warp(&mut game, "office", 3, 4, Direction::Up);
        hand_in(&mut game);

        // 4. Forgotten Password
        warp(&mut game, "office", 7, 7, Direction::Up);
        accept(&mut game);
        warp(&mut game, "office", 13, 8, Direction::Up);
        game.handle(GameCommand::Interact);
        assert_eq!(game.mode(), GameMode::Quiz);
        while let Some(answer) = game.quiz().and_then(|q| q.current()).map(|q| q.answer) {
            game.handle(GameCommand::Choose(answer));
        }
        assert_eq!(game.mode(), GameMode::Playing);
        assert!(game.state().has_item("access_code"));
        warp(&mut game, "office", 7, 7, Direction::Up);
        hand_in(&mut game);
        assert!(game.state().has_item("server_key"));

        // 5. Picture Perfect
        warp(&mut game, "office", 11, 4, Direction::Up);
        accept(&mut game);
        warp(&mut game, "break_room", 9, 6, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "office", 1, 9, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "office", 11, 4, Direction::Up);
        hand_in(&mut game);

        // 6. Server Room Spring Clean
        warp(&mut game, "server_room", 9, 3, Direction::Up);
        accept(&mut game);
        for (x, y) in [(3, 3), (6, 8), (10, 5)] {
            warp(&mut game, "server_room", x, y, Direction::Up);
            game.handle(GameCommand::Interact);
        }
        warp(&mut game, "server_room", 9, 3, Direction::Up);
        hand_in(&mut game);

        // 7. The Founder's Letter
        warp(&mut game, "break_room", 5, 6, Direction::Down);
        accept(&mut game);
        warp(&mut game, "server_room", 1, 7, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "break_room", 5, 6, Direction::Down);
        hand_in(&mut game);

        // 8. Let Them Eat Cake
        warp(&mut game, "break_room", 8, 3, Direction::Up);
        accept(&mut game);
        warp(&mut game, "office", 14, 9, Direction::Down);
        game.handle(GameCommand::Interact);
        warp(&mut game, "break_room", 8, 3, Direction::Up);
        hand_in(&mut game);

        // 9. The Anniversary Treasure: everything is already in hand
        warp(&mut game, "ceo_office", 5, 4, Direction::Up);
        accept(&mut game);
        assert_eq!(game.quests().phase(9), QuestPhase::ReadyToSubmit);
        assert_eq!(game.quests().npc_marker("ceo").map(|m| m.symbol()), Some("?"));
        hand_in(&mut game);

        assert_eq!(game.mode(), GameMode::Victory);
        assert_eq!(game.state().completed_quests, (1..=9).collect::<Vec<_>>());
        assert!(game.state().has_item("anniversary_trophy"));
        assert_eq!(game.guide_text().unwrap(), "You found the treasure!");
        for quest in game.quests().log().quests.iter() {
            assert!(quest.completed && quest.progress <= quest.max_progress);
        }
    }
}
