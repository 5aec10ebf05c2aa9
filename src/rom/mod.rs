mod bytes;
mod context;
mod decode;
mod encode;
mod error;
mod event;
mod header;
mod image;
mod path;
mod registry;
mod schema;
mod value;

/// Bounded little-endian byte cursor.
pub use bytes::Cursor;
/// Ancestor frame stack for length and discriminant resolution.
pub use context::Context;
/// Schema-driven decoding entry points and options.
pub use decode::{DecodeOptions, decode_rom, decode_value};
/// Schema-driven encoding entry points and relocation records.
pub use encode::{Encoded, Relocation, encode_value, encode_with_context};
/// Error and result aliases.
pub use error::{Result, RomError};
/// Built-in map event model.
pub use event::{EVENT_HEADER, event_registry, install_event_model};
/// Cartridge header representation.
pub use header::{RomHeader, complement_check};
/// ROM image abstraction and address translation.
pub use image::RomImage;
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Named type registry.
pub use registry::Registry;
/// Schema type definitions and strategy variants.
pub use schema::{
	ArrayDef, BitfieldDef, Discriminant, FieldDef, LabelPolicy, LengthFrom, PointerDef, ScalarKind, StructDef, SubfieldDef, TypeDef, UnionDef,
	VariantDef,
};
/// Decoded runtime value types.
pub use value::{FieldValue, PtrValue, StructValue, UnionValue, Value};
