use std::io::Write;

use image::{DynamicImage, ExtendedColorType, codecs::tga::TgaEncoder};

use crate::error::Error;


// Width and height are u16 fields in the TGA header.
pub(crate) const TGA_MAX_DIMENSION: u32 = u16::MAX as u32;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaOptions {
	/// Run-length encode the pixel data.
	pub rle: bool,
}


/// Convert a decoded image to 8-bit samples, keeping its channel count.
///
/// High bit depth and floating point images are reduced to 8 bits; gray stays
/// gray and alpha is kept only if the source had it.
pub fn tga_pixels(img: &DynamicImage) -> (Vec<u8>, ExtendedColorType) {
	match img.color().channel_count() {
		1 => (img.to_luma8().into_raw(), ExtendedColorType::L8),
		2 => (img.to_luma_alpha8().into_raw(), ExtendedColorType::La8),
		3 => (img.to_rgb8().into_raw(), ExtendedColorType::Rgb8),
		_ => (img.to_rgba8().into_raw(), ExtendedColorType::Rgba8),
	}
}


pub fn write_tga<W: Write>(img: &DynamicImage, writer: W, options: TgaOptions) -> Result<(), Error> {
	let (width, height) = (img.width(), img.height());
	if width > TGA_MAX_DIMENSION || height > TGA_MAX_DIMENSION {
		return Err(Error::TooBig(width, height));
	}

	let (pixels, color_type) = tga_pixels(img);

	let mut encoder = TgaEncoder::new(writer);
	if !options.rle {
		encoder = encoder.disable_rle();
	}
	encoder.encode(&pixels, width, height, color_type)?;

	Ok(())
}


/// Encode into an in-memory TGA file.
pub fn encode_tga(img: &DynamicImage, options: TgaOptions) -> Result<Vec<u8>, Error> {
	let mut out = Vec::new();
	write_tga(img, &mut out, options)?;
	Ok(out)
}
