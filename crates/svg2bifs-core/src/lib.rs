#![forbid(unsafe_code)]

//! Streaming SVG to MPEG-4 BIFS scene-graph conversion.
//!
//! Markup events (see [`events`]) drive a [`Session`] that keeps two trees in step: the open
//! source elements with their resolved presentation properties, and the target scene graph
//! ([`scene::SceneGraph`]) that is built incrementally as elements open.

pub mod appearance;
pub mod attr;
pub mod cascade;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod geom;
pub mod geometry;
mod mapper;
pub mod markup;
pub mod path;
pub mod props;
pub mod scene;
pub mod session;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use events::{MarkupHandler, XmlAttribute, drive};
pub use props::{PropertySet, Rgb};
pub use scene::{NodeId, SceneGraph};
pub use session::{Conversion, Session};

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Scene width when the root element has no plain `width`.
    pub default_width: u32,
    /// Scene height when the root element has no plain `height`.
    pub default_height: u32,
    /// `Background2D.backColor` of the generated scene.
    pub background: Rgb,
    /// Treat every diagnostic as an error.
    pub strict: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_width: 320,
            default_height: 200,
            background: Rgb::WHITE,
            strict: false,
        }
    }
}

impl ConvertOptions {
    /// Any recoverable problem fails the conversion.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Recoverable problems are reported as diagnostics.
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }
}

fn convert_timing_enabled() -> bool {
    static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
    *ENABLED.get_or_init(|| match std::env::var("SVG2BIFS_CONVERT_TIMING").as_deref() {
        Ok("1") | Ok("true") => true,
        _ => false,
    })
}

/// Converts a complete SVG document.
pub fn convert_str(text: &str, options: &ConvertOptions) -> Result<Conversion> {
    let timing_enabled = convert_timing_enabled();
    let total_start = timing_enabled.then(std::time::Instant::now);

    let mut session = Session::new(options.clone());
    let drive_start = timing_enabled.then(std::time::Instant::now);
    drive(text, &mut session)?;
    let drive_time = drive_start.map(|s| s.elapsed());

    let conversion = session.finish()?;

    if let Some(start) = total_start {
        eprintln!(
            "[convert-timing] total={:?} events={:?} nodes={} diagnostics={} input_bytes={}",
            start.elapsed(),
            drive_time.unwrap_or_default(),
            conversion.scene.len(),
            conversion.diagnostics.len(),
            text.len(),
        );
    }
    Ok(conversion)
}

#[cfg(test)]
mod tests;
