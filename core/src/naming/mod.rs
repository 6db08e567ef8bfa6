//! Turning metadata into destination paths
//!
//! [`Sanitizer`] makes individual values filesystem-safe, [`FieldMapping`]
//! holds the sanitized value of every [`Field`](crate::Field) for one file,
//! [`PathTemplate`] substitutes them, and [`PathRenderer`] joins the result
//! under the destination root.

mod mapping;
mod renderer;
mod sanitize;
mod template;

pub use mapping::FieldMapping;
pub use renderer::PathRenderer;
pub use sanitize::{clean_text, Sanitizer, DEFAULT_FORBIDDEN, MISSING_VALUE};
pub use template::PathTemplate;
