pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("End of element `{name}` without a matching start")]
    UnbalancedEnd { name: String },

    #[error("End of element `{found}` does not match open element `{expected}`")]
    MismatchedEnd { expected: String, found: String },

    #[error("Document ended with {depth} element(s) still open")]
    Unclosed { depth: usize },

    #[error("Conversion produced {count} diagnostic(s) in strict mode; first: {first}")]
    Strict { count: usize, first: String },
}
