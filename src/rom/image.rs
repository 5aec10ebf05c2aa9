use std::fs;
use std::path::Path;

use crate::rom::bytes::Cursor;
use crate::rom::header::RomHeader;
use crate::rom::{Result, RomError};

/// Loaded ROM image plus its bus address mapping.
///
/// Cartridge ROM is mapped at `0x0800_0000` on the GBA; images dumped
/// from other regions or mirrors can override the base. The image is
/// the codec's address-translation collaborator when pointers are
/// deep-resolved.
pub struct RomImage {
	bytes: Vec<u8>,
	base: u32,
}

impl RomImage {
	/// Default cartridge ROM bus address.
	pub const ROM_BASE: u32 = 0x0800_0000;

	/// Load an image from a file, mapped at the cartridge base.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::from_bytes(fs::read(path)?))
	}

	/// Wrap in-memory bytes, mapped at the cartridge base.
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self {
			bytes,
			base: Self::ROM_BASE,
		}
	}

	/// Wrap in-memory bytes mapped at a caller-chosen base address.
	pub fn with_base(bytes: Vec<u8>, base: u32) -> Self {
		Self { bytes, base }
	}

	/// Return the raw image bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Return the image length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether the image is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return the bus address the image is mapped at.
	pub fn base(&self) -> u32 {
		self.base
	}

	/// Parse the cartridge header at the start of the image.
	pub fn header(&self) -> Result<RomHeader> {
		RomHeader::parse(&self.bytes)
	}

	/// Translate a bus address into an image byte offset.
	pub fn offset_of(&self, address: u32) -> Result<usize> {
		let offset = address
			.checked_sub(self.base)
			.map(|delta| delta as usize)
			.filter(|offset| *offset < self.bytes.len());
		offset.ok_or(RomError::UnresolvedAddress { address })
	}

	/// Translate an image byte offset back into a bus address.
	pub fn address_of(&self, offset: usize) -> Option<u32> {
		if offset >= self.bytes.len() {
			return None;
		}
		u32::try_from(offset).ok()?.checked_add(self.base)
	}

	/// Return a cursor over the image tail starting at a bus address.
	pub fn cursor_at(&self, address: u32) -> Result<Cursor<'_>> {
		let offset = self.offset_of(address)?;
		Ok(Cursor::new(&self.bytes[offset..]))
	}
}

#[cfg(test)]
mod tests {
	use super::RomImage;
	use crate::rom::RomError;

	#[test]
	fn addresses_translate_both_ways() {
		let image = RomImage::from_bytes(vec![0_u8; 0x100]);
		assert_eq!(image.offset_of(0x0800_0040).expect("address maps"), 0x40);
		assert_eq!(image.address_of(0x40), Some(0x0800_0040));
	}

	#[test]
	fn out_of_image_address_is_unresolved() {
		let image = RomImage::from_bytes(vec![0_u8; 0x100]);
		for address in [0x0700_0000, 0x0800_0100, 0x0900_0000] {
			let err = image.offset_of(address).expect_err("address outside image");
			assert!(matches!(err, RomError::UnresolvedAddress { .. }));
		}
	}

	#[test]
	fn custom_base_is_honored() {
		let image = RomImage::with_base(vec![0xAA; 4], 0x0200_0000);
		assert_eq!(image.offset_of(0x0200_0002).expect("address maps"), 2);
		assert!(image.offset_of(RomImage::ROM_BASE).is_err());
	}
}
