mod coordinate;
mod track;

pub use coordinate::{Coordinate, ViewportBound};
pub use track::Track;
