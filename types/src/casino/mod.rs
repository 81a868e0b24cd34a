mod bet_array;
mod constants;
mod game;
mod multiplier;
mod registry;
mod roulette;
mod shape;

pub use bet_array::*;
pub use constants::*;
pub use game::*;
pub use multiplier::*;
pub use registry::*;
pub use roulette::*;
pub use shape::*;
