use crate::rom::path::{FieldPath, PathStep};
use crate::rom::value::{FieldValue, StructValue, Value};
use crate::rom::{Result, RomError};

/// Stack of partially-decoded ancestor structure frames.
///
/// While a structure decodes or encodes, its frame accumulates fields in
/// declaration order, so length and discriminant strategies can inspect
/// siblings and ancestors that are already complete. Resolution is free
/// of side effects: the same context and path always give the same
/// answer.
#[derive(Debug, Default)]
pub struct Context {
	frames: Vec<StructValue>,
}

impl Context {
	/// Create an empty context.
	pub fn new() -> Self {
		Self { frames: Vec::new() }
	}

	/// Return the number of open frames.
	pub fn depth(&self) -> usize {
		self.frames.len()
	}

	/// Open a frame for a structure that is starting to decode.
	///
	/// Callers encoding a value detached from its parent structure can
	/// push a frame carrying the sibling fields its strategies need.
	pub fn push_frame(&mut self, type_name: &str) {
		self.frames.push(StructValue {
			type_name: type_name.into(),
			fields: Vec::new(),
		});
	}

	/// Close the innermost frame and return it.
	pub fn pop_frame(&mut self) -> Option<StructValue> {
		self.frames.pop()
	}

	/// Append a completed field to the innermost frame.
	pub fn append_field(&mut self, name: &str, value: Value) {
		if let Some(frame) = self.frames.last_mut() {
			frame.fields.push(FieldValue { name: name.into(), value });
		}
	}

	/// Resolve a field path against the frame stack.
	///
	/// The walk starts at the innermost frame containing the path's
	/// first segment; paths can only see fields decoded before the
	/// field being resolved.
	pub fn resolve(&self, path: &FieldPath) -> Result<&Value> {
		let Some(PathStep::Field(first)) = path.steps.first() else {
			return Err(RomError::PathResolution {
				path: path.to_string(),
				segment: 0,
			});
		};

		for frame in self.frames.iter().rev() {
			let Some(root) = frame.field(first) else {
				continue;
			};

			let mut current = root;
			for (segment, step) in path.steps.iter().enumerate().skip(1) {
				current = walk_step(current, step).ok_or_else(|| RomError::PathResolution {
					path: path.to_string(),
					segment,
				})?;
			}
			return Ok(current);
		}

		Err(RomError::PathResolution {
			path: path.to_string(),
			segment: 0,
		})
	}

	/// Resolve a field path to a signed integer.
	pub fn resolve_int(&self, path: &FieldPath) -> Result<i64> {
		let value = self.resolve(path)?;
		value.as_int().ok_or_else(|| RomError::SchemaMismatch {
			type_name: path.to_string(),
			expected: "integer".to_owned(),
			got: value.kind().to_owned(),
		})
	}
}

fn walk_step<'a>(value: &'a Value, step: &PathStep) -> Option<&'a Value> {
	match (step, value) {
		(PathStep::Field(name), Value::Struct(item)) => item.field(name),
		(PathStep::Field(name), Value::Union(item)) => {
			if item.variant.as_ref() == name.as_ref() {
				Some(&item.value)
			} else {
				None
			}
		}
		(PathStep::Index(index), Value::Array(items)) => items.get(*index),
		_ => None,
	}
}
