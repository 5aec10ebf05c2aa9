use std::path::PathBuf;

use agbdoc::rom::{DecodeOptions, RomImage, decode_rom, event_registry};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, parse_address, value_to_json};

/// Decode a named type at a ROM address and print the result.
pub fn run(path: PathBuf, type_name: &str, addr: &str, deep: bool, json: bool) -> agbdoc::rom::Result<()> {
	let address = parse_address(addr)?;
	let registry = event_registry()?;
	let image = RomImage::open(&path)?;

	let opts = if deep { DecodeOptions::deep() } else { DecodeOptions::default() };
	let value = decode_rom(&registry, &image, type_name, address, &opts)?;

	if json {
		emit_json(&value_to_json(&value));
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("type: {type_name}");
	println!("addr: 0x{address:08x}");
	println!("decoded:");
	print_value(&value, 0, 0, PrintOptions::default());

	Ok(())
}
