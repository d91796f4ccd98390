//! Quest System Module
//!
//! Quest metadata comes from a TOML table; progress is an explicit phase
//! machine driven by quest events.

pub mod definition;
pub mod registry;
pub mod state;
pub mod events;
pub mod manager;
pub mod system;
pub mod guide;

pub use definition::{Quest, QuestDialogue};
pub use registry::QuestRegistry;
pub use state::{QuestLog, QuestPhase, QuestProgress};
pub use events::{QuestEvent, QuestEventResult};
pub use manager::{QuestError, QuestManager, SubmitOutcome, SubmitRejection};
pub use system::{QuestMarker, QuestSystem};
pub use guide::{GuideEntry, GuideItem, GuideStep};
