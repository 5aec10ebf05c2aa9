use agbdoc::rom::{PtrValue, Result, RomError, Value};

/// Parse a decimal or `0x`-prefixed hex address literal.
pub(crate) fn parse_address(value: &str) -> Result<u32> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u32::from_str_radix(stripped, 16)
	} else {
		value.parse::<u32>()
	};

	parsed.map_err(|_| RomError::InvalidAddressLiteral { value: value.to_owned() })
}

/// Convert a decoded value tree into JSON for `--json` output.
pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::UInt(v) => serde_json::Value::from(*v),
		Value::Int(v) => serde_json::Value::from(*v),
		Value::Struct(item) => {
			let mut out = serde_json::Map::new();
			for field in &item.fields {
				out.insert(field.name.to_string(), value_to_json(&field.value));
			}
			serde_json::Value::Object(out)
		}
		Value::Union(item) => serde_json::json!({
			"variant": item.variant.as_ref(),
			"value": value_to_json(&item.value),
		}),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
		Value::Ptr(PtrValue::Null) => serde_json::Value::Null,
		Value::Ptr(PtrValue::Address(address)) => serde_json::json!({
			"address": format!("0x{address:08x}"),
		}),
		Value::Ptr(PtrValue::Resolved { address, target }) => serde_json::json!({
			"address": format!("0x{address:08x}"),
			"target": value_to_json(target),
		}),
	}
}

/// Print a JSON value to stdout.
pub(crate) fn emit_json(value: &serde_json::Value) {
	println!("{value:#}");
}
