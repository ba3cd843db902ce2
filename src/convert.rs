use std::{
	fs,
	io::{Read, Write},
	path::Path,
};

use image::{DynamicImage, ImageFormat};
use log::{debug, info};

use crate::{
	error::Error,
	load_image, load_image_from_stream,
	tga::{TgaOptions, encode_tga},
};


/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
	pub format: ImageFormat,
	pub width: u32,
	pub height: u32,
	pub channels: u8,
	pub bytes_written: usize,
}

impl Conversion {
	fn new(format: ImageFormat, img: &DynamicImage, bytes_written: usize) -> Self {
		Conversion {
			format,
			width: img.width(),
			height: img.height(),
			channels: img.color().channel_count(),
			bytes_written,
		}
	}
}


/// Convert the image at `input` into a TGA file at `output`.
///
/// The TGA is encoded in memory first, so a failed conversion never leaves a
/// truncated output file behind.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, options: TgaOptions) -> Result<Conversion, Error> {
	let (input, output) = (input.as_ref(), output.as_ref());

	let (format, img) = load_image(input)?;
	info!(
		"Loaded {} ({}x{}, {} channels)",
		input.display(),
		img.width(),
		img.height(),
		img.color().channel_count()
	);

	if options.rle {
		info!("Using RLE compression.");
	}

	let tga = encode_tga(&img, options)?;
	fs::write(output, &tga)?;

	info!("Successfully converted image to {}", output.display());
	Ok(Conversion::new(format, &img, tga.len()))
}


/// Convert an image read from `reader` and write the TGA to `writer`.
///
/// Only TGA bytes ever reach `writer`; diagnostics go through `log`.
pub fn convert_stream<R: Read, W: Write>(reader: R, mut writer: W, options: TgaOptions) -> Result<Conversion, Error> {
	let (format, img) = load_image_from_stream(reader)?;
	debug!(
		"Loaded {:?} image from stream ({}x{}, {} channels)",
		format,
		img.width(),
		img.height(),
		img.color().channel_count()
	);

	if options.rle {
		info!("Using RLE compression.");
	}

	let tga = encode_tga(&img, options)?;
	writer.write_all(&tga)?;
	writer.flush()?;

	debug!("Wrote {} bytes of TGA data", tga.len());
	Ok(Conversion::new(format, &img, tga.len()))
}
