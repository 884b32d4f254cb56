mod hash;
mod sort;

pub use hash::SpatialHash;
