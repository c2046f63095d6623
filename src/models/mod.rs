pub mod column_model;
pub mod gallery_state;
pub mod image_descriptor;

pub use column_model::*;
pub use gallery_state::*;
pub use image_descriptor::*;
