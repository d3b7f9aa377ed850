mod engine;
mod errors;
mod source;

pub use engine::{format_for_path, load_scene, Renderer, RendererConfig, RENDER_TIMEOUT};
pub use errors::{RenderError, RenderResult};
pub use source::RenderSource;
