use std::rc::Rc;

/// One decoded value, mirroring the shape of its schema type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Unsigned integer scalar or bitfield subfield.
	UInt(u64),
	/// Signed integer scalar.
	Int(i64),
	/// Ordered named fields of a structure or bitfield.
	Struct(StructValue),
	/// Single active variant of a union.
	Union(UnionValue),
	/// Ordered array elements.
	Array(Vec<Value>),
	/// Pointer, possibly resolved to its target.
	Ptr(PtrValue),
}

/// Decoded structure or bitfield instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Registered type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One named field of a decoded structure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

/// Decoded union instance tagged with its selected variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
	/// Selected variant name.
	pub variant: Box<str>,
	/// Value of the selected variant.
	pub value: Box<Value>,
}

/// Decoded pointer state.
///
/// Deep-resolved targets are reference-counted so that two pointers
/// resolving to the same location share one decoded object.
#[derive(Debug, Clone, PartialEq)]
pub enum PtrValue {
	/// Null pointer (address 0).
	Null,
	/// Unresolved bus address.
	Address(u32),
	/// Address resolved to a decoded target.
	Resolved {
		/// Original bus address.
		address: u32,
		/// Shared decoded target.
		target: Rc<Value>,
	},
}

impl Value {
	/// Return a short label for the value's shape, for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::UInt(_) => "uint",
			Value::Int(_) => "int",
			Value::Struct(_) => "struct",
			Value::Union(_) => "union",
			Value::Array(_) => "array",
			Value::Ptr(_) => "pointer",
		}
	}

	/// Return the value as a signed integer when it is one.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::UInt(v) => i64::try_from(*v).ok(),
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}
}

impl StructValue {
	/// Look up a field value by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

impl PtrValue {
	/// Return the bus address carried by the pointer, if any.
	pub fn address(&self) -> Option<u32> {
		match self {
			PtrValue::Null => None,
			PtrValue::Address(address) => Some(*address),
			PtrValue::Resolved { address, .. } => Some(*address),
		}
	}
}
