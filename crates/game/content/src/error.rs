//! Map loading errors.
//!
//! A bad map reference is a content-authoring bug: the loader aborts with a
//! diagnostic naming the offending coordinate and layer instead of silently
//! degrading.

/// Errors raised while loading or querying a tile map document.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed map XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> attribute `{attribute}` has invalid value `{value}`")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("layer `{layer}` uses unsupported data encoding `{encoding}`")]
    UnsupportedEncoding { layer: String, encoding: String },

    #[error("layer `{layer}` has malformed base64 data: {source}")]
    Base64 {
        layer: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("layer `{layer}` has malformed zlib data: {source}")]
    Zlib {
        layer: String,
        #[source]
        source: std::io::Error,
    },

    #[error("layer `{layer}` holds {actual} cells, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("layer `{layer}` cell ({x}, {y}) references raw gid {raw_gid} outside every tileset")]
    UnknownGid {
        layer: String,
        x: u32,
        y: u32,
        raw_gid: u32,
    },

    #[error("no layer named `{0}` in this map")]
    UnknownLayer(String),

    #[error("layer `{layer}` has no cell ({x}, {y})")]
    OutOfBounds { layer: String, x: u32, y: u32 },

    #[error("gid {0} was never allocated in this map")]
    UnknownAllocatedGid(u32),
}
