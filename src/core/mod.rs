pub mod assembler;
pub mod device;
pub mod engine;
pub mod geometry;
pub mod jaw;
pub mod leaf_positions;
pub mod leaf_widths;

pub use crate::domain::model::{Aperture, Beam, BeamApertures, ControlPoint, Jaw, LeafBanks};
pub use crate::domain::ports::BeamSource;
pub use crate::utils::error::Result;
