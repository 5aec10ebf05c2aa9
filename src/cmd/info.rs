use std::path::PathBuf;

use agbdoc::rom::RomImage;

use crate::cmd::util::emit_json;

#[derive(serde::Serialize)]
struct InfoRow<'a> {
	path: String,
	size: usize,
	title: &'a str,
	game_code: &'a str,
	maker_code: &'a str,
	version: u8,
	fixed_byte_ok: bool,
	checksum_ok: bool,
}

/// Print cartridge header information for an image.
pub fn run(path: PathBuf, json: bool) -> agbdoc::rom::Result<()> {
	let image = RomImage::open(&path)?;
	let header = image.header()?;

	if json {
		let row = InfoRow {
			path: path.display().to_string(),
			size: image.len(),
			title: &header.title,
			game_code: &header.game_code,
			maker_code: &header.maker_code,
			version: header.version,
			fixed_byte_ok: header.fixed_byte_ok,
			checksum_ok: header.checksum_ok,
		};
		emit_json(&serde_json::to_value(row).unwrap_or_default());
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("size: {} bytes", image.len());
	println!("title: {}", header.title);
	println!("game_code: {}", header.game_code);
	println!("maker_code: {}", header.maker_code);
	println!("version: {}", header.version);
	println!("fixed_byte_ok: {}", header.fixed_byte_ok);
	println!("checksum_ok: {}", header.checksum_ok);

	Ok(())
}
