/// Camera in world pixels. `x`/`y` is the top-left corner of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub viewport_w: f32,
    pub viewport_h: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            viewport_w: 800.0,
            viewport_h: 600.0,
        }
    }
}

impl Camera {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            viewport_w,
            viewport_h,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport_w = w;
        self.viewport_h = h;
    }

    /// Centre on a tile-space position, clamped to the map.
    /// A map smaller than the viewport is centred instead.
    pub fn follow(&mut self, target_x: f32, target_y: f32, map_w: u32, map_h: u32, tile_size: f32) {
        let world_w = map_w as f32 * tile_size;
        let world_h = map_h as f32 * tile_size;
        let centre_x = (target_x + 0.5) * tile_size;
        let centre_y = (target_y + 0.5) * tile_size;

        self.x = Self::clamp_axis(centre_x - self.viewport_w / 2.0, world_w, self.viewport_w);
        self.y = Self::clamp_axis(centre_y - self.viewport_h / 2.0, world_h, self.viewport_h);
    }

    fn clamp_axis(pos: f32, world: f32, view: f32) -> f32 {
        if world <= view {
            // Negative offset centres the map on screen
            -(view - world) / 2.0
        } else {
            pos.clamp(0.0, world - view)
        }
    }

    pub fn world_to_screen(&self, world_x: f32, world_y: f32) -> (f32, f32) {
        (world_x - self.x, world_y - self.y)
    }

    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (screen_x + self.x, screen_y + self.y)
    }

    /// Inclusive tile range (min_x, min_y, max_x, max_y) on screen, clamped to the map
    pub fn visible_tile_range(&self, map_w: u32, map_h: u32, tile_size: f32) -> (i32, i32, i32, i32) {
        let min_x = (self.x / tile_size).floor().max(0.0) as i32;
        let min_y = (self.y / tile_size).floor().max(0.0) as i32;
        let max_x = (((self.x + self.viewport_w) / tile_size).ceil() as i32).min(map_w as i32 - 1);
        let max_y = (((self.y + self.viewport_h) / tile_size).ceil() as i32).min(map_h as i32 - 1);
        (min_x, min_y, max_x, max_y)
    }
}
