//! Template resolution, placeholder substitution, and copying
//!
//! Templates are plain text files carrying `{{key}}` placeholder tokens,
//! shipped on disk under an ordered set of search directories. Bodies are
//! treated as opaque text; only the placeholder tokens are interpreted.

pub mod copier;
pub mod render;
pub mod resolver;

pub use copier::copy_template;
pub use render::{render, ParameterSet};
pub use resolver::{template_root, TemplateResolver, TEMPLATE_ROOT_ENV};
