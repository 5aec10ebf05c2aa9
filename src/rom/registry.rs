use std::collections::HashMap;

use crate::rom::schema::{ScalarKind, TypeDef};
use crate::rom::{Result, RomError};

/// Named type registry.
///
/// Definitions are added once during a setup phase and treated as
/// immutable afterwards. Aggregate members reference other definitions
/// by name and are looked up lazily at codec use, so registration order
/// does not matter and recursive schema graphs are fine.
#[derive(Debug)]
pub struct Registry {
	types: HashMap<Box<str>, TypeDef>,
}

impl Registry {
	/// Create a registry pre-populated with the scalar types.
	pub fn new() -> Self {
		let mut types = HashMap::new();
		for kind in ScalarKind::all() {
			types.insert(kind.name().into(), TypeDef::Scalar(kind));
		}
		Self { types }
	}

	/// Register a named type definition.
	pub fn define(&mut self, name: &str, def: TypeDef) -> Result<()> {
		if self.types.contains_key(name) {
			return Err(RomError::DuplicateType { name: name.to_owned() });
		}
		self.types.insert(name.into(), def);
		Ok(())
	}

	/// Look up a definition by registered name.
	pub fn resolve(&self, name: &str) -> Result<&TypeDef> {
		self.types.get(name).ok_or_else(|| RomError::UnknownType { name: name.to_owned() })
	}

	/// Return whether a name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	/// Return all registered names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.types.keys().map(|name| name.as_ref()).collect();
		names.sort_unstable();
		names
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}
