//! Auxiliary collision volumes and their per-step sweep simulation.

pub use self::registry::VolumeRegistry;
pub use self::simulate::simulate_move;
pub use self::volume::AuxiliaryVolume;

mod registry;
mod simulate;
mod volume;
