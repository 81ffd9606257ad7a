//! Chart-data aggregate: the normalized pane/overlay tree, its value
//! objects and the range-search strategies used for windowing.

pub mod entities;
pub mod services;
pub mod value_objects;
pub mod windowing;

pub use entities::*;
pub use value_objects::*;
pub use windowing::*;
