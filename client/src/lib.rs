//! Desktop and browser front end for the office anniversary treasure hunt.
//!
//! Everything here is drawing and input; the rules live in `treasure_hunt_core`.

pub mod app;
pub mod input;
pub mod render;
pub mod storage;
pub mod ui;
pub mod util;

pub use app::{window_conf, App};
