use crate::rom::context::Context;
use crate::rom::path::FieldPath;
use crate::rom::{Result, RomError};

/// Fixed-width integer kinds recognized by the codec.
///
/// All widths are read and written little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	/// Unsigned 8-bit.
	U8,
	/// Signed 8-bit.
	S8,
	/// Unsigned 16-bit.
	U16,
	/// Signed 16-bit.
	S16,
	/// Unsigned 32-bit.
	U32,
	/// Signed 32-bit.
	S32,
}

impl ScalarKind {
	/// Byte width of the scalar.
	pub fn width(self) -> usize {
		match self {
			ScalarKind::U8 | ScalarKind::S8 => 1,
			ScalarKind::U16 | ScalarKind::S16 => 2,
			ScalarKind::U32 | ScalarKind::S32 => 4,
		}
	}

	/// Whether the scalar is interpreted as signed.
	pub fn is_signed(self) -> bool {
		matches!(self, ScalarKind::S8 | ScalarKind::S16 | ScalarKind::S32)
	}

	/// Canonical registered name of the scalar.
	pub fn name(self) -> &'static str {
		match self {
			ScalarKind::U8 => "u8",
			ScalarKind::S8 => "s8",
			ScalarKind::U16 => "u16",
			ScalarKind::S16 => "s16",
			ScalarKind::U32 => "u32",
			ScalarKind::S32 => "s32",
		}
	}

	/// All scalar kinds in registration order.
	pub fn all() -> [ScalarKind; 6] {
		[
			ScalarKind::U8,
			ScalarKind::S8,
			ScalarKind::U16,
			ScalarKind::S16,
			ScalarKind::U32,
			ScalarKind::S32,
		]
	}

	/// Inclusive representable range of the scalar.
	pub fn range(self) -> (i128, i128) {
		match self {
			ScalarKind::U8 => (0, u8::MAX as i128),
			ScalarKind::S8 => (i8::MIN as i128, i8::MAX as i128),
			ScalarKind::U16 => (0, u16::MAX as i128),
			ScalarKind::S16 => (i16::MIN as i128, i16::MAX as i128),
			ScalarKind::U32 => (0, u32::MAX as i128),
			ScalarKind::S32 => (i32::MIN as i128, i32::MAX as i128),
		}
	}
}

/// One registered type definition.
///
/// Aggregate members reference other definitions by registered name, so
/// forward references and recursive schema graphs resolve at codec use
/// rather than at definition time.
#[derive(Debug, Clone)]
pub enum TypeDef {
	/// Fixed-width little-endian integer.
	Scalar(ScalarKind),
	/// Fixed-order aggregate of named, typed fields.
	Struct(StructDef),
	/// Integer-backed aggregate of sub-integer-width named fields.
	Bitfield(BitfieldDef),
	/// Single active variant selected from already-decoded context.
	Union(UnionDef),
	/// Sequence whose length is fixed or read from an ancestor field.
	Array(ArrayDef),
	/// Reference to another value via bus address or relocation label.
	Pointer(PointerDef),
}

/// Structure definition: ordered named fields.
#[derive(Debug, Clone)]
pub struct StructDef {
	/// Field declarations in decode order.
	pub fields: Vec<FieldDef>,
}

/// One structure field declaration.
#[derive(Debug, Clone)]
pub struct FieldDef {
	/// Field name.
	pub name: Box<str>,
	/// Registered name of the field type.
	pub type_name: Box<str>,
}

/// Bitfield definition: backing scalar plus packed subfields.
///
/// The first declared subfield occupies the low-order bits.
#[derive(Debug, Clone)]
pub struct BitfieldDef {
	/// Scalar carrying the packed bits.
	pub backing: ScalarKind,
	/// Subfield declarations, low bits first.
	pub subfields: Vec<SubfieldDef>,
}

/// One bitfield subfield declaration.
#[derive(Debug, Clone)]
pub struct SubfieldDef {
	/// Subfield name.
	pub name: Box<str>,
	/// Subfield width in bits.
	pub bits: u32,
}

/// Union definition: declared variants plus a discriminant strategy.
#[derive(Debug, Clone)]
pub struct UnionDef {
	/// Variant declarations.
	pub variants: Vec<VariantDef>,
	/// Strategy selecting the active variant from context.
	pub discriminant: Discriminant,
}

/// One union variant declaration.
#[derive(Debug, Clone)]
pub struct VariantDef {
	/// Variant name.
	pub name: Box<str>,
	/// Registered name of the variant type.
	pub type_name: Box<str>,
}

/// Array definition: element type plus a length source.
#[derive(Debug, Clone)]
pub struct ArrayDef {
	/// Registered name of the element type.
	pub element: Box<str>,
	/// Where the element count comes from.
	pub length: LengthFrom,
}

/// Pointer definition.
#[derive(Debug, Clone)]
pub struct PointerDef {
	/// Registered name of the pointed-to type, or `None` for opaque
	/// targets that are never deep-resolved.
	pub target: Option<Box<str>>,
	/// How the pointer is represented when encoding.
	pub label: LabelPolicy,
}

/// Array length source.
#[derive(Debug, Clone)]
pub enum LengthFrom {
	/// Fixed element count.
	Const(usize),
	/// Count read from an already-decoded ancestor field.
	Field(FieldPath),
}

/// Union variant selection strategy.
///
/// Strategies are plain data evaluated against the context, never code,
/// so schemas stay printable and comparable.
#[derive(Debug, Clone)]
pub enum Discriminant {
	/// Always the named variant.
	Const(Box<str>),
	/// Threshold test on an already-decoded ancestor field.
	Threshold {
		/// Field supplying the tested integer.
		path: FieldPath,
		/// Exclusive upper bound for the `below` variant.
		threshold: i64,
		/// Variant selected while the field is below the threshold.
		below: Box<str>,
		/// Variant selected at or above the threshold.
		at_or_above: Box<str>,
	},
}

/// Pointer encoding policy.
#[derive(Debug, Clone)]
pub enum LabelPolicy {
	/// Emit a placeholder and a relocation carrying one literal label.
	///
	/// Every encode of this pointer type reuses the same label, so
	/// sibling instances collapse onto a single relocation target.
	Fixed {
		/// Relocation label literal.
		label: Box<str>,
		/// Required target alignment in bytes.
		align: u32,
		/// Whether the label is exported globally.
		global: bool,
	},
	/// Re-emit the pointer's numeric address with no relocation.
	Address,
}

impl TypeDef {
	/// Declare a structure from `(field, type)` name pairs.
	pub fn structure<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		TypeDef::Struct(StructDef {
			fields: fields
				.into_iter()
				.map(|(name, type_name)| FieldDef {
					name: name.into(),
					type_name: type_name.into(),
				})
				.collect(),
		})
	}

	/// Declare a bitfield from `(subfield, bits)` pairs, low bits first.
	pub fn bitfield<'a>(backing: ScalarKind, subfields: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
		TypeDef::Bitfield(BitfieldDef {
			backing,
			subfields: subfields
				.into_iter()
				.map(|(name, bits)| SubfieldDef { name: name.into(), bits })
				.collect(),
		})
	}

	/// Declare a union from `(variant, type)` name pairs and a strategy.
	pub fn union<'a>(variants: impl IntoIterator<Item = (&'a str, &'a str)>, discriminant: Discriminant) -> Self {
		TypeDef::Union(UnionDef {
			variants: variants
				.into_iter()
				.map(|(name, type_name)| VariantDef {
					name: name.into(),
					type_name: type_name.into(),
				})
				.collect(),
			discriminant,
		})
	}

	/// Declare an array of `element` values sized by `length`.
	pub fn array(element: &str, length: LengthFrom) -> Self {
		TypeDef::Array(ArrayDef {
			element: element.into(),
			length,
		})
	}

	/// Declare a pointer to a registered target type.
	pub fn pointer(target: &str, label: LabelPolicy) -> Self {
		TypeDef::Pointer(PointerDef {
			target: Some(target.into()),
			label,
		})
	}

	/// Declare an opaque pointer with no structural target.
	pub fn opaque_pointer(label: LabelPolicy) -> Self {
		TypeDef::Pointer(PointerDef { target: None, label })
	}

	/// Return a short label for the definition's shape, for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			TypeDef::Scalar(_) => "scalar",
			TypeDef::Struct(_) => "struct",
			TypeDef::Bitfield(_) => "bitfield",
			TypeDef::Union(_) => "union",
			TypeDef::Array(_) => "array",
			TypeDef::Pointer(_) => "pointer",
		}
	}
}

impl LengthFrom {
	/// Resolve the element count against the decode context.
	pub fn resolve(&self, ctx: &Context) -> Result<usize> {
		match self {
			LengthFrom::Const(count) => Ok(*count),
			LengthFrom::Field(path) => {
				let len = ctx.resolve_int(path)?;
				usize::try_from(len).map_err(|_| RomError::NegativeLength {
					len,
					source_desc: path.to_string(),
				})
			}
		}
	}
}

impl Discriminant {
	/// Select the active variant name from the decode context.
	pub fn select(&self, ctx: &Context) -> Result<&str> {
		match self {
			Discriminant::Const(name) => Ok(name),
			Discriminant::Threshold {
				path,
				threshold,
				below,
				at_or_above,
			} => {
				let probe = ctx.resolve_int(path)?;
				if probe < *threshold { Ok(below) } else { Ok(at_or_above) }
			}
		}
	}
}

impl BitfieldDef {
	/// Check declared subfield widths against the backing scalar.
	pub fn check_widths(&self, type_name: &str) -> Result<()> {
		let backing = self.backing.width() as u32 * 8;
		let declared = self.subfields.iter().map(|sub| sub.bits).sum::<u32>();
		if declared > backing {
			return Err(RomError::BitfieldOverflow {
				type_name: type_name.to_owned(),
				declared,
				backing,
			});
		}
		Ok(())
	}
}
