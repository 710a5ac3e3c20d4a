//! xmlsettings - cursor-based XML settings documents
//!
//! Navigate a document with a push/pop [`Cursor`], address repeated tags by
//! ordinal, and read or write typed values stored as attributes.
//!
//! # Quick Start
//!
//! ```
//! use xmlsettings::{from_str, Vec4};
//! # fn main() -> Result<(), xmlsettings::Error> {
//! let mut cursor = from_str(r#"<settings><layer name="bg"/><layer name="fg"/></settings>"#)?;
//! assert!(cursor.push_tag("settings", 0));
//! assert_eq!(cursor.num_tags("layer"), 2);
//!
//! assert!(cursor.push_tag("layer", 1));
//! cursor.encode("bounds", &Vec4::new(0.0, 0.0, 640.0, 480.0));
//! cursor.pop_tag();
//!
//! assert!(cursor.push_tag("layer", 1));
//! let mut bounds = Vec4::default();
//! assert!(cursor.decode("bounds", &mut bounds, None));
//! assert_eq!(bounds.z, 640.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::Input;

pub mod lexer;

pub mod config;
pub use config::{Config, MissPolicy, WriteOptions};

pub mod dom;
pub use dom::{Attribute, Document, NodeId};

pub mod text;
pub use text::{ScalarKind, TextValue};

pub mod codec;
pub use codec::{AttributeValue, Color, Composite, ValueKind, Vec2, Vec4};

pub mod cursor;
pub use cursor::{Cursor, LoadSummary};

pub mod shared;
pub use shared::SharedCursor;

pub mod version;
pub use version::Version;

/// Cursor over a document parsed from a string
pub fn from_str(s: &str) -> Result<Cursor> {
    let mut cursor = Cursor::new();
    cursor.load_str(s)?;
    Ok(cursor)
}

/// Cursor over a document parsed from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Cursor> {
    let mut cursor = Cursor::new();
    cursor.load_bytes(bytes)?;
    Ok(cursor)
}

/// Cursor over a document read from `path`
pub fn open(path: impl AsRef<std::path::Path>) -> Result<Cursor> {
    Cursor::open(path)
}
