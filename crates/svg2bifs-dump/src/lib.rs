#![forbid(unsafe_code)]

//! Textual serializations of a converted scene: XMT-A, BT and a JSON debugging form.
//!
//! All three writers share one lowering step ([`repr::lower`]) that turns the scene graph into
//! a neutral node/field tree with default-valued fields already removed.

mod bt;
mod json;
mod number;
pub mod repr;
mod xmt;

use svg2bifs_core::SceneGraph;

pub use repr::{FieldRepr, FieldValue, NodeRepr, SceneRepr, lower};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("formatting error")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DumpFormat {
    #[default]
    Xmt,
    Bt,
    Json,
}

impl DumpFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "xmt" | "xmta" | "xmt-a" => Some(Self::Xmt),
            "bt" => Some(Self::Bt),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xmt => "xmt",
            Self::Bt => "bt",
            Self::Json => "json",
        }
    }
}

pub fn dump(scene: &SceneGraph, format: DumpFormat) -> Result<String> {
    let repr = lower(scene);
    if repr.dropped > 0 {
        tracing::warn!(
            dropped = repr.dropped,
            "nodes nested under non-grouping nodes were not serialized"
        );
    }
    match format {
        DumpFormat::Xmt => xmt::write_scene(&repr),
        DumpFormat::Bt => bt::write_scene(&repr),
        DumpFormat::Json => json::write_scene(&repr),
    }
}
