#![forbid(unsafe_code)]

//! `svg2bifs` converts SVG documents into MPEG-4 BIFS scene graphs.
//!
//! The conversion itself lives in `svg2bifs-core` and is re-exported here unchanged.
//!
//! # Features
//!
//! - `dump`: enable the XMT-A / BT / JSON writers (`svg2bifs::dump`)

pub use svg2bifs_core::*;

#[cfg(feature = "dump")]
pub mod dump {
    pub use svg2bifs_dump::Error as DumpError;
    pub use svg2bifs_dump::{DumpFormat, FieldRepr, FieldValue, NodeRepr, SceneRepr, dump, lower};

    #[derive(Debug, thiserror::Error)]
    pub enum ConvertError {
        #[error(transparent)]
        Convert(#[from] svg2bifs_core::Error),
        #[error(transparent)]
        Dump(#[from] svg2bifs_dump::Error),
    }

    pub type Result<T> = std::result::Result<T, ConvertError>;

    /// Converts `text` and serializes the resulting scene in `format`.
    ///
    /// Diagnostics of a lenient conversion are logged but not returned; use
    /// [`svg2bifs_core::convert_str`] directly to inspect them.
    pub fn convert_to_string(
        text: &str,
        options: &svg2bifs_core::ConvertOptions,
        format: DumpFormat,
    ) -> Result<String> {
        let conversion = svg2bifs_core::convert_str(text, options)?;
        Ok(dump(&conversion.scene, format)?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn converts_straight_to_xmt() {
            let out = convert_to_string(
                r#"<svg width="10" height="10"><circle r="2"/></svg>"#,
                &svg2bifs_core::ConvertOptions::default(),
                DumpFormat::Xmt,
            )
            .unwrap();
            assert!(out.contains("<Circle radius=\"2\"/>"));
        }

        #[test]
        fn strict_failures_surface_as_convert_errors() {
            let err = convert_to_string(
                r#"<svg><blink/></svg>"#,
                &svg2bifs_core::ConvertOptions::strict(),
                DumpFormat::Bt,
            )
            .unwrap_err();
            assert!(matches!(err, ConvertError::Convert(_)));
        }
    }
}
