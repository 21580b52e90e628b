//! Renderer parameter derivation.

mod builder;
mod config;
mod nickname;
mod value;

pub use builder::{derive, label_names};
pub use config::{
    RECORD_KEYS, RenderConfig, RenderConfigBuilder, RenderParameterSet, renderer_defaults,
};
pub use nickname::extract_nickname;
pub use value::{ParamKind, ParamValue};
