//! Simulation module
//!
//! All gameplay logic lives here:
//! - Millisecond timestep supplied by the driver
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod jump;
pub mod level;
pub mod state;
pub mod tick;

pub use jump::{jump_distance, jump_offset_x, jump_offset_y, jump_progress};
pub use level::{Level, next_level};
pub use state::{GameState, SlimePhase, SlimeState, SweatDrop};
pub use tick::{TickInput, tick};
