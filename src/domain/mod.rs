mod algorithm;
mod planet;
mod point;
mod quadtree;
mod rect;
mod universe;

pub use algorithm::Algorithm;
pub use planet::Planet;
pub use point::Point;
pub use quadtree::{Influence, QuadTree};
pub use rect::{Quadrant, Rect};
pub use universe::{DEFAULT_PLANET_COUNT, Universe};
