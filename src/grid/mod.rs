//! Grid World
//!
//! A self-contained host for movers: box bodies on tiles, layer-filtered
//! linecasts, and capability storage.

pub mod world;
pub mod linecast;

pub use world::{Body, GridWorld};
pub use linecast::segment_enters_box;
