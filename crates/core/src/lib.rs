pub mod combat;
pub mod content;
pub mod entry;
pub mod hash;
pub mod mapgen;
pub mod rng;
pub mod save_file;
pub mod session;
pub mod state;
pub mod types;

pub use combat::{fight, fight_recorded};
pub use entry::enter;
pub use mapgen::{generate, new_dungeon, populate};
pub use rng::{RandomSource, session_rng};
pub use save_file::{SaveError, load, save};
pub use session::Session;
pub use state::{Dungeon, Player, Room};
pub use types::*;
