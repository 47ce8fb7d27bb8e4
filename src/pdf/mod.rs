pub mod document;
pub mod images;
pub mod jpeg;

pub use document::Renderer;
