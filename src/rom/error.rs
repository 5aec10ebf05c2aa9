use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RomError>;

/// Errors produced while reading ROM images and encoding or decoding
/// schema-described event data.
#[derive(Debug, Error)]
pub enum RomError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Requested type name is not registered.
	#[error("unknown type: {name}")]
	UnknownType {
		/// Requested type name.
		name: String,
	},
	/// Type name was registered twice.
	#[error("duplicate type definition: {name}")]
	DuplicateType {
		/// Redefined type name.
		name: String,
	},
	/// Declared bitfield subfield widths exceed the backing scalar width.
	#[error("bitfield {type_name} declares {declared} bits, backing holds {backing}")]
	BitfieldOverflow {
		/// Bitfield type name.
		type_name: String,
		/// Sum of declared subfield widths.
		declared: u32,
		/// Bits available in the backing scalar.
		backing: u32,
	},
	/// Bitfield subfield value does not fit its declared width.
	#[error("bitfield subfield {field} value {value} does not fit in {bits} bits")]
	BitfieldValueTooWide {
		/// Subfield name.
		field: String,
		/// Offending value.
		value: i64,
		/// Declared subfield width.
		bits: u32,
	},
	/// Union discriminant selected an undeclared variant.
	#[error("unknown variant {variant} for union {type_name}")]
	UnknownVariant {
		/// Union type name.
		type_name: String,
		/// Selected variant name.
		variant: String,
	},
	/// Union value tag disagrees with the discriminant strategy.
	#[error("variant mismatch for union {type_name}: value is {got}, discriminant selects {expected}")]
	VariantMismatch {
		/// Union type name.
		type_name: String,
		/// Variant the discriminant strategy selects.
		expected: String,
		/// Variant carried by the value.
		got: String,
	},
	/// Array length source resolved to a negative count.
	#[error("negative array length {len} from {source_desc}")]
	NegativeLength {
		/// Resolved length value.
		len: i64,
		/// Length source description.
		source_desc: String,
	},
	/// Array value element count disagrees with the resolved length.
	#[error("array length mismatch for {type_name}: expected {expected}, value has {got}")]
	LengthMismatch {
		/// Array type name.
		type_name: String,
		/// Length the schema resolves to.
		expected: usize,
		/// Element count carried by the value.
		got: usize,
	},
	/// Value tree shape does not match the schema type.
	#[error("schema mismatch for {type_name}: expected {expected}, got {got}")]
	SchemaMismatch {
		/// Type name being encoded or resolved.
		type_name: String,
		/// Expected value shape.
		expected: String,
		/// Actual value shape.
		got: String,
	},
	/// Integer value is outside the scalar's representable range.
	#[error("value {value} out of range for scalar {type_name}")]
	ScalarOutOfRange {
		/// Scalar type name.
		type_name: String,
		/// Offending value.
		value: i128,
	},
	/// Field path did not resolve against the decode context.
	#[error("unresolved field path {path} at segment {segment}")]
	PathResolution {
		/// Full path expression.
		path: String,
		/// Index of the first unresolved segment.
		segment: usize,
	},
	/// Recursive decode or encode exceeded the configured depth limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Requested array length exceeded the configured limit.
	#[error("array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Requested array length.
		count: usize,
		/// Maximum permitted array length.
		max: usize,
	},
	/// Pointer address does not translate into the loaded image.
	#[error("unresolved address 0x{address:08x}")]
	UnresolvedAddress {
		/// Bus address that failed to translate.
		address: u32,
	},
	/// Image is too small to carry a cartridge header.
	#[error("invalid cartridge header")]
	InvalidHeader,
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original path string.
		path: String,
	},
	/// CLI address argument was invalid.
	#[error("invalid address literal: {value}")]
	InvalidAddressLiteral {
		/// User-provided address string.
		value: String,
	},
}
