//! Rendering labels with an external solid modeler.

mod error;
mod openscad;
mod output;
mod renderer;
mod template;

pub use error::RenderError;
pub use openscad::{DEFAULT_TIMEOUT, OpenScadConfig, OpenScadRenderer, ScadSource};
pub use output::{OutputNamer, slugify};
pub use renderer::{RenderJob, RenderOutput, Renderer};
pub use template::apply_parameters;
