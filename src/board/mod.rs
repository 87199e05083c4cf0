pub mod geometry;
pub mod state;

pub use geometry::BoardGeometry;
pub use state::BoardState;
