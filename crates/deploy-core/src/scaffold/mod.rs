//! Project skeleton description and materialization
//!
//! `tree` holds the generic directory-tree materializer; `layout` holds the
//! fixed automation-project skeleton, template list, and generated README.

pub mod layout;
pub mod tree;

pub use layout::{project_layout, readme, TemplateSpec, IOS_TEMPLATES};
pub use tree::{dir, materialize, TreeNode};
