mod camera;
mod collision;
mod geometry;
mod landscape;
mod physics;

pub use camera::*;
pub use collision::*;
pub use geometry::*;
pub use landscape::*;
pub use physics::*;
