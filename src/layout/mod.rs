pub mod breakpoints;
pub mod columns;

pub use breakpoints::Breakpoints;
pub use columns::{plan_update, ColumnLayout, LayoutChange, Placement, RenderedLayout};
