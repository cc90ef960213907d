//! # metasvg - Windows metafile to SVG converter
//!
//! A library for decoding the legacy Windows vector-graphics metafile
//! formats (16-bit WMF and 32-bit EMF) and replaying their drawing-command
//! streams into an equivalent SVG document.
//!
//! ## Example
//!
//! ```rust,ignore
//! use metasvg::convert;
//!
//! let data = std::fs::read("input.emf")?;
//! let result = convert(&data, None)?;
//! std::fs::write("output.svg", result.svg)?;
//! ```

pub mod bitmap;
pub mod dc;
pub mod emf;
pub mod error;
pub mod gdi;
pub mod objects;
pub mod primitives;
pub mod reader;
pub mod records;
pub mod region;
pub mod renderer;
pub mod svg;
pub mod wmf;

// Re-export main types for convenient access
pub use dc::{DeviceContext, MetafileKind};
pub use emf::{EmfFile, EmfHeader};
pub use error::{MetafileError, MetafileResult};
pub use reader::ByteReader;
pub use records::RecordOp;
pub use renderer::{
    convert, is_emf_format, is_wmf_format, ConvertResult, RenderSettings, Renderer,
};
pub use svg::SvgSink;
pub use wmf::{PlaceableHeader, WmfFile};
