use serde::{Deserialize, Serialize};

// Visual interpolation speed in tiles per second (slightly faster than stepping for responsiveness)
const VISUAL_SPEED: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Down,
    Left,
    Up,
    Right,
}

impl Direction {
    /// Grid offset of one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    // Grid position (authoritative)
    pub x: i32,
    pub y: i32,
    #[serde(default, alias = "direction")]
    pub facing: Direction,

    // Rendered position in tiles (smoothly interpolated each frame)
    #[serde(skip)]
    pub visual_x: f32,
    #[serde(skip)]
    pub visual_y: f32,

    /// Seconds until the next step is allowed
    #[serde(skip)]
    pub move_cooldown: f32,
    #[serde(skip)]
    pub is_moving: bool,
    #[serde(skip)]
    pub animation_frame: f32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            facing: Direction::Down,
            visual_x: x as f32,
            visual_y: y as f32,
            move_cooldown: 0.0,
            is_moving: false,
            animation_frame: 0.0,
        }
    }

    pub fn can_step(&self) -> bool {
        self.move_cooldown <= 0.0
    }

    /// Move one tile. The caller has checked the destination.
    pub fn step_to(&mut self, x: i32, y: i32, interval: f32) {
        self.x = x;
        self.y = y;
        self.move_cooldown = interval;
    }

    /// Jump to a position without animating (map change, load)
    pub fn teleport(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.snap();
    }

    /// Put the visual position on the grid position
    pub fn snap(&mut self) {
        self.visual_x = self.x as f32;
        self.visual_y = self.y as f32;
        self.is_moving = false;
        self.animation_frame = 0.0;
    }

    /// Tile in front of the player
    pub fn facing_tile(&self) -> (i32, i32) {
        let (dx, dy) = self.facing.delta();
        (self.x + dx, self.y + dy)
    }

    pub fn update(&mut self, delta: f32) {
        if self.move_cooldown > 0.0 {
            self.move_cooldown = (self.move_cooldown - delta).max(0.0);
        }
        self.interpolate_visual(delta);
    }

    /// Smooth visual interpolation toward the grid position
    fn interpolate_visual(&mut self, delta: f32) {
        let dx = self.x as f32 - self.visual_x;
        let dy = self.y as f32 - self.visual_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < 0.01 {
            self.snap();
            return;
        }

        let move_dist = VISUAL_SPEED * delta;
        if dist <= move_dist {
            self.visual_x = self.x as f32;
            self.visual_y = self.y as f32;
        } else {
            self.visual_x += (dx / dist) * move_dist;
            self.visual_y += (dy / dist) * move_dist;
        }

        self.is_moving = true;

        // Walk cycle while moving
        self.animation_frame += delta * 8.0;
        if self.animation_frame >= 4.0 {
            self.animation_frame = 0.0;
        }
    }
}
