use std::collections::HashMap;
use std::rc::Rc;

use crate::rom::bytes::Cursor;
use crate::rom::context::Context;
use crate::rom::image::RomImage;
use crate::rom::registry::Registry;
use crate::rom::schema::{ScalarKind, TypeDef};
use crate::rom::value::{FieldValue, PtrValue, StructValue, UnionValue, Value};
use crate::rom::{Result, RomError};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Follow pointers into the image and decode their targets.
	pub resolve_pointers: bool,
	/// Maximum recursive nesting depth.
	pub max_depth: u32,
	/// Maximum allowed array element count.
	pub max_array_elems: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			resolve_pointers: false,
			max_depth: 32,
			max_array_elems: 4096,
		}
	}
}

impl DecodeOptions {
	/// Preset with pointer targets decoded in place.
	pub fn deep() -> Self {
		Self {
			resolve_pointers: true,
			..Self::default()
		}
	}
}

/// Decode a named type from a bare cursor.
///
/// Pointers stay as addresses since there is no image to follow them
/// into. On failure the partially-built tree is discarded.
pub fn decode_value(registry: &Registry, type_name: &str, cursor: &mut Cursor<'_>, opts: &DecodeOptions) -> Result<Value> {
	Decoder::new(registry, None, opts).decode_named(type_name, cursor, 0)
}

/// Decode a named type at a bus address within a loaded image.
///
/// With [`DecodeOptions::resolve_pointers`] set, pointer targets are
/// decoded recursively through the image's address translation; a
/// target reached through several pointers decodes once and the
/// resulting object is shared.
pub fn decode_rom(registry: &Registry, image: &RomImage, type_name: &str, address: u32, opts: &DecodeOptions) -> Result<Value> {
	let mut cursor = image.cursor_at(address)?;
	Decoder::new(registry, Some(image), opts).decode_named(type_name, &mut cursor, 0)
}

struct Decoder<'a> {
	registry: &'a Registry,
	image: Option<&'a RomImage>,
	opts: &'a DecodeOptions,
	ctx: Context,
	// Pointer-target cache, scoped to one top-level decode call.
	cache: HashMap<(usize, Box<str>), Rc<Value>>,
}

impl<'a> Decoder<'a> {
	fn new(registry: &'a Registry, image: Option<&'a RomImage>, opts: &'a DecodeOptions) -> Self {
		Self {
			registry,
			image,
			opts,
			ctx: Context::new(),
			cache: HashMap::new(),
		}
	}

	fn decode_named(&mut self, name: &str, cursor: &mut Cursor<'_>, depth: u32) -> Result<Value> {
		if depth >= self.opts.max_depth {
			return Err(RomError::DepthExceeded {
				max_depth: self.opts.max_depth,
			});
		}

		let registry = self.registry;
		match registry.resolve(name)? {
			TypeDef::Scalar(kind) => decode_scalar(cursor, *kind),
			TypeDef::Struct(def) => {
				self.ctx.push_frame(name);
				for field in &def.fields {
					let value = self.decode_named(&field.type_name, cursor, depth + 1)?;
					self.ctx.append_field(&field.name, value);
				}
				let done = self.ctx.pop_frame().unwrap_or_else(|| StructValue {
					type_name: name.into(),
					fields: Vec::new(),
				});
				Ok(Value::Struct(done))
			}
			TypeDef::Bitfield(def) => {
				def.check_widths(name)?;

				let raw = match def.backing {
					ScalarKind::U8 | ScalarKind::S8 => u64::from(cursor.read_u8()?),
					ScalarKind::U16 | ScalarKind::S16 => u64::from(cursor.read_u16_le()?),
					ScalarKind::U32 | ScalarKind::S32 => u64::from(cursor.read_u32_le()?),
				};

				let mut fields = Vec::with_capacity(def.subfields.len());
				let mut shift = 0_u32;
				for sub in &def.subfields {
					let mask = if sub.bits >= 64 { u64::MAX } else { (1_u64 << sub.bits) - 1 };
					fields.push(FieldValue {
						name: sub.name.clone(),
						value: Value::UInt((raw >> shift) & mask),
					});
					shift += sub.bits;
				}

				Ok(Value::Struct(StructValue {
					type_name: name.into(),
					fields,
				}))
			}
			TypeDef::Union(def) => {
				let selected = def.discriminant.select(&self.ctx)?;
				let variant = def
					.variants
					.iter()
					.find(|candidate| candidate.name.as_ref() == selected)
					.ok_or_else(|| RomError::UnknownVariant {
						type_name: name.to_owned(),
						variant: selected.to_owned(),
					})?;

				let value = self.decode_named(&variant.type_name, cursor, depth + 1)?;
				Ok(Value::Union(UnionValue {
					variant: variant.name.clone(),
					value: Box::new(value),
				}))
			}
			TypeDef::Array(def) => {
				let count = def.length.resolve(&self.ctx)?;
				if count > self.opts.max_array_elems {
					return Err(RomError::ArrayTooLarge {
						count,
						max: self.opts.max_array_elems,
					});
				}

				let mut items = Vec::with_capacity(count);
				for _ in 0..count {
					items.push(self.decode_named(&def.element, cursor, depth + 1)?);
				}
				Ok(Value::Array(items))
			}
			TypeDef::Pointer(def) => {
				let address = cursor.read_u32_le()?;
				if address == 0 {
					return Ok(Value::Ptr(PtrValue::Null));
				}

				let (Some(target), Some(image), true) = (def.target.as_deref(), self.image, self.opts.resolve_pointers) else {
					return Ok(Value::Ptr(PtrValue::Address(address)));
				};

				let offset = image.offset_of(address)?;
				if let Some(shared) = self.cache.get(&(offset, Box::from(target))) {
					return Ok(Value::Ptr(PtrValue::Resolved {
						address,
						target: Rc::clone(shared),
					}));
				}

				let mut target_cursor = Cursor::new(&image.bytes()[offset..]);
				let value = self.decode_named(target, &mut target_cursor, depth + 1)?;
				let shared = Rc::new(value);
				self.cache.insert((offset, Box::from(target)), Rc::clone(&shared));
				Ok(Value::Ptr(PtrValue::Resolved { address, target: shared }))
			}
		}
	}
}

fn decode_scalar(cursor: &mut Cursor<'_>, kind: ScalarKind) -> Result<Value> {
	Ok(match kind {
		ScalarKind::U8 => Value::UInt(u64::from(cursor.read_u8()?)),
		ScalarKind::S8 => Value::Int(i64::from(cursor.read_i8()?)),
		ScalarKind::U16 => Value::UInt(u64::from(cursor.read_u16_le()?)),
		ScalarKind::S16 => Value::Int(i64::from(cursor.read_i16_le()?)),
		ScalarKind::U32 => Value::UInt(u64::from(cursor.read_u32_le()?)),
		ScalarKind::S32 => Value::Int(i64::from(cursor.read_i32_le()?)),
	})
}

#[cfg(test)]
mod tests;
