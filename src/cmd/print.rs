use agbdoc::rom::{PtrValue, Value};

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested values.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 40,
			max_array_items: 32,
			max_print_depth: 8,
		}
	}
}

/// Print a decoded value as an indented tree.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::UInt(v) => println!("{pad}{v}"),
		Value::Int(v) => println!("{pad}{v}"),
		Value::Ptr(PtrValue::Null) => println!("{pad}null"),
		Value::Ptr(PtrValue::Address(address)) => println!("{pad}*0x{address:08x}"),
		Value::Ptr(PtrValue::Resolved { address, target }) => {
			if depth >= options.max_print_depth {
				println!("{pad}*0x{address:08x} -> ...");
				return;
			}
			println!("{pad}*0x{address:08x} ->");
			print_value(target, indent + 2, depth + 1, options);
		}
		Value::Union(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}<{}> ...", item.variant);
				return;
			}
			println!("{pad}<{}>", item.variant);
			print_value(&item.value, indent + 2, depth + 1, options);
		}
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{pad}  ... {} more", items.len() - options.max_array_items);
			}
			println!("{pad}]");
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}{} {{ ... }}", item.type_name);
				return;
			}
			println!("{pad}{} {{", item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				print!("{pad}  {} = ", field.name);
				if matches!(field.value, Value::Struct(_) | Value::Array(_) | Value::Union(_)) {
					println!();
					print_value(&field.value, indent + 4, depth + 1, options);
				} else {
					print_value(&field.value, 0, depth + 1, options);
				}
			}
			if item.fields.len() > options.max_fields_per_struct {
				println!("{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			println!("{pad}}}");
		}
	}
}
