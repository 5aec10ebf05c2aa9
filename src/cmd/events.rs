use std::path::PathBuf;

use agbdoc::rom::{DecodeOptions, EVENT_HEADER, RomImage, Value, decode_rom, event_registry};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, parse_address, value_to_json};

/// Decode a map's event tables and print them.
pub fn run(path: PathBuf, addr: &str, json: bool) -> agbdoc::rom::Result<()> {
	let address = parse_address(addr)?;
	let registry = event_registry()?;
	let image = RomImage::open(&path)?;

	let header = decode_rom(&registry, &image, EVENT_HEADER, address, &DecodeOptions::deep())?;

	if json {
		emit_json(&value_to_json(&header));
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("addr: 0x{address:08x}");
	if let Value::Struct(item) = &header {
		for count in ["person_cnt", "warp_cnt", "trigger_cnt", "signpost_cnt"] {
			if let Some(Value::UInt(value)) = item.field(count) {
				println!("{count}: {value}");
			}
		}
	}
	println!("decoded:");
	print_value(&header, 0, 0, PrintOptions::default());

	Ok(())
}
