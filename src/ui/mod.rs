pub mod gallery_view;
pub mod infinite_scroll;
pub mod tile;
pub mod tile_loader;
pub mod viewport;
pub mod window;

pub use window::MainWindow;
