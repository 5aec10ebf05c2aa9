use crate::rom::context::Context;
use crate::rom::registry::Registry;
use crate::rom::schema::{LabelPolicy, ScalarKind, TypeDef};
use crate::rom::value::{PtrValue, StructValue, Value};
use crate::rom::{Result, RomError};

/// One pointer relocation produced while encoding.
///
/// The placeholder bytes at `offset` are patched by an external linking
/// step once the label's final address is known.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Relocation {
	/// Relocation label literal.
	pub label: Box<str>,
	/// Byte offset of the 4-byte placeholder in the encoded output.
	pub offset: usize,
	/// Required target alignment in bytes.
	pub align: u32,
	/// Whether the label is exported globally.
	pub global: bool,
}

/// Encoded bytes plus the relocations they depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
	/// Contiguous encoded output.
	pub bytes: Vec<u8>,
	/// Pointer relocations in emission order.
	pub relocations: Vec<Relocation>,
}

/// Encode a value tree against a named type.
///
/// The value's shape is validated as encoding proceeds; the first
/// mismatch aborts the call and no partial output escapes. Union tags
/// are re-checked against the discriminant strategy and array element
/// counts against their length source, so the output is guaranteed to
/// decode back through the same schema.
pub fn encode_value(registry: &Registry, type_name: &str, value: &Value) -> Result<Encoded> {
	encode_with_context(registry, type_name, value, Context::new())
}

/// Encode a value tree with caller-supplied ancestor context.
///
/// Needed when a value is encoded detached from its parent structure
/// but its type carries context-dependent strategies, such as a union
/// discriminated by a sibling field.
pub fn encode_with_context(registry: &Registry, type_name: &str, value: &Value, ctx: Context) -> Result<Encoded> {
	let mut encoder = Encoder {
		registry,
		ctx,
		out: Vec::new(),
		relocations: Vec::new(),
	};
	encoder.encode_named(type_name, value)?;
	Ok(Encoded {
		bytes: encoder.out,
		relocations: encoder.relocations,
	})
}

struct Encoder<'a> {
	registry: &'a Registry,
	ctx: Context,
	out: Vec<u8>,
	relocations: Vec<Relocation>,
}

impl Encoder<'_> {
	fn encode_named(&mut self, name: &str, value: &Value) -> Result<()> {
		let registry = self.registry;
		match registry.resolve(name)? {
			TypeDef::Scalar(kind) => self.encode_scalar(name, *kind, value),
			TypeDef::Struct(def) => {
				let item = expect_struct(name, value)?;
				if item.fields.len() != def.fields.len() {
					return Err(RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: format!("{} fields", def.fields.len()),
						got: format!("{} fields", item.fields.len()),
					});
				}

				self.ctx.push_frame(name);
				for (field_def, field) in def.fields.iter().zip(&item.fields) {
					if field_def.name != field.name {
						return Err(RomError::SchemaMismatch {
							type_name: name.to_owned(),
							expected: format!("field {}", field_def.name),
							got: format!("field {}", field.name),
						});
					}
					self.encode_named(&field_def.type_name, &field.value)?;
					self.ctx.append_field(&field.name, field.value.clone());
				}
				self.ctx.pop_frame();
				Ok(())
			}
			TypeDef::Bitfield(def) => {
				def.check_widths(name)?;
				let item = expect_struct(name, value)?;
				if item.fields.len() != def.subfields.len() {
					return Err(RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: format!("{} subfields", def.subfields.len()),
						got: format!("{} subfields", item.fields.len()),
					});
				}

				let mut raw = 0_u64;
				let mut shift = 0_u32;
				for (sub, field) in def.subfields.iter().zip(&item.fields) {
					if sub.name != field.name {
						return Err(RomError::SchemaMismatch {
							type_name: name.to_owned(),
							expected: format!("subfield {}", sub.name),
							got: format!("subfield {}", field.name),
						});
					}

					let int = field.value.as_int().ok_or_else(|| RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: "integer".to_owned(),
						got: field.value.kind().to_owned(),
					})?;
					let max = if sub.bits >= 64 { u64::MAX } else { (1_u64 << sub.bits) - 1 };
					let bits = u64::try_from(int)
						.ok()
						.filter(|raw_bits| *raw_bits <= max)
						.ok_or_else(|| RomError::BitfieldValueTooWide {
							field: sub.name.to_string(),
							value: int,
							bits: sub.bits,
						})?;

					raw |= bits << shift;
					shift += sub.bits;
				}

				match def.backing {
					ScalarKind::U8 | ScalarKind::S8 => self.out.push(raw as u8),
					ScalarKind::U16 | ScalarKind::S16 => self.out.extend_from_slice(&(raw as u16).to_le_bytes()),
					ScalarKind::U32 | ScalarKind::S32 => self.out.extend_from_slice(&(raw as u32).to_le_bytes()),
				}
				Ok(())
			}
			TypeDef::Union(def) => {
				let Value::Union(item) = value else {
					return Err(RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: "union".to_owned(),
						got: value.kind().to_owned(),
					});
				};

				let variant = def
					.variants
					.iter()
					.find(|candidate| candidate.name == item.variant)
					.ok_or_else(|| RomError::UnknownVariant {
						type_name: name.to_owned(),
						variant: item.variant.to_string(),
					})?;

				// Re-running the discriminant keeps the output decodable
				// by the same selection logic.
				let selected = def.discriminant.select(&self.ctx)?;
				if selected != item.variant.as_ref() {
					return Err(RomError::VariantMismatch {
						type_name: name.to_owned(),
						expected: selected.to_owned(),
						got: item.variant.to_string(),
					});
				}

				self.encode_named(&variant.type_name, &item.value)
			}
			TypeDef::Array(def) => {
				let Value::Array(items) = value else {
					return Err(RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: "array".to_owned(),
						got: value.kind().to_owned(),
					});
				};

				let expected = def.length.resolve(&self.ctx)?;
				if expected != items.len() {
					return Err(RomError::LengthMismatch {
						type_name: name.to_owned(),
						expected,
						got: items.len(),
					});
				}

				for item in items {
					self.encode_named(&def.element, item)?;
				}
				Ok(())
			}
			TypeDef::Pointer(def) => {
				let Value::Ptr(ptr) = value else {
					return Err(RomError::SchemaMismatch {
						type_name: name.to_owned(),
						expected: "pointer".to_owned(),
						got: value.kind().to_owned(),
					});
				};

				match (ptr, &def.label) {
					(PtrValue::Null, _) => self.out.extend_from_slice(&0_u32.to_le_bytes()),
					(_, LabelPolicy::Fixed { label, align, global }) => {
						self.relocations.push(Relocation {
							label: label.clone(),
							offset: self.out.len(),
							align: *align,
							global: *global,
						});
						self.out.extend_from_slice(&0_u32.to_le_bytes());
					}
					(other, LabelPolicy::Address) => {
						let address = other.address().unwrap_or(0);
						self.out.extend_from_slice(&address.to_le_bytes());
					}
				}
				Ok(())
			}
		}
	}

	fn encode_scalar(&mut self, name: &str, kind: ScalarKind, value: &Value) -> Result<()> {
		let int = match value {
			Value::UInt(v) => i128::from(*v),
			Value::Int(v) => i128::from(*v),
			other => {
				return Err(RomError::SchemaMismatch {
					type_name: name.to_owned(),
					expected: "integer".to_owned(),
					got: other.kind().to_owned(),
				});
			}
		};

		let (min, max) = kind.range();
		if int < min || int > max {
			return Err(RomError::ScalarOutOfRange {
				type_name: name.to_owned(),
				value: int,
			});
		}

		match kind {
			ScalarKind::U8 => self.out.push(int as u8),
			ScalarKind::S8 => self.out.push((int as i8) as u8),
			ScalarKind::U16 => self.out.extend_from_slice(&(int as u16).to_le_bytes()),
			ScalarKind::S16 => self.out.extend_from_slice(&(int as i16).to_le_bytes()),
			ScalarKind::U32 => self.out.extend_from_slice(&(int as u32).to_le_bytes()),
			ScalarKind::S32 => self.out.extend_from_slice(&(int as i32).to_le_bytes()),
		}
		Ok(())
	}
}

fn expect_struct<'v>(name: &str, value: &'v Value) -> Result<&'v StructValue> {
	match value {
		Value::Struct(item) => Ok(item),
		other => Err(RomError::SchemaMismatch {
			type_name: name.to_owned(),
			expected: "struct".to_owned(),
			got: other.kind().to_owned(),
		}),
	}
}
