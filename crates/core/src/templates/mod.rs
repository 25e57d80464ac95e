//! Template loading, reading and rendering.

pub mod defaults;
pub mod engine;
pub mod repository;
pub mod tree;

pub use defaults::scan_defaults;
pub use engine::{JinjaEngine, RenderError, TemplateEngine};
pub use repository::{LoadedTemplate, TemplateLoadError};
pub use tree::ParsedTemplate;
