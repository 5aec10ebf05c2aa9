use std::fmt;

use crate::rom::{Result, RomError};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named struct field.
	Field(Box<str>),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed field path expression.
///
/// Paths name already-decoded fields relative to the ancestor frames of
/// the value being decoded, such as the count field that sizes an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Build a path from plain field names.
	pub fn fields<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
		Self {
			steps: names.into_iter().map(|name| PathStep::Field(name.into())).collect(),
		}
	}

	/// Parse dotted field syntax with optional `[index]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Err(RomError::InvalidFieldPath { path: input.to_owned() });
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() {
				let byte = bytes[idx];
				if byte.is_ascii_alphanumeric() || byte == b'_' {
					idx += 1;
				} else {
					break;
				}
			}

			if idx == start {
				return Err(RomError::InvalidFieldPath { path: input.to_owned() });
			}

			steps.push(PathStep::Field(input[start..idx].into()));

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(RomError::InvalidFieldPath { path: input.to_owned() });
				}

				let number = input[n_start..idx]
					.parse::<usize>()
					.map_err(|_| RomError::InvalidFieldPath { path: input.to_owned() })?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(RomError::InvalidFieldPath { path: input.to_owned() });
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(RomError::InvalidFieldPath { path: input.to_owned() });
				}
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for step in &self.steps {
			match step {
				PathStep::Field(name) => {
					if !first {
						write!(f, ".")?;
					}
					write!(f, "{name}")?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
			first = false;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldPath, PathStep};

	#[test]
	fn dotted_path_with_index_parses() {
		let path = FieldPath::parse("persons[2].script").expect("path parses");
		assert_eq!(
			path.steps,
			vec![
				PathStep::Field("persons".into()),
				PathStep::Index(2),
				PathStep::Field("script".into()),
			]
		);
		assert_eq!(path.to_string(), "persons[2].script");
	}

	#[test]
	fn empty_and_malformed_paths_are_rejected() {
		assert!(FieldPath::parse("").is_err());
		assert!(FieldPath::parse("a..b").is_err());
		assert!(FieldPath::parse("a[").is_err());
		assert!(FieldPath::parse("a[x]").is_err());
		assert!(FieldPath::parse("a.").is_err());
	}

	#[test]
	fn fields_builder_matches_parse() {
		assert_eq!(FieldPath::fields(["person_cnt"]), FieldPath::parse("person_cnt").expect("path parses"));
	}
}
