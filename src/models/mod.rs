pub mod round;
pub mod tile;

pub use round::RoundSnapshot;
pub use tile::{Placement, TargetRow, Tile};
