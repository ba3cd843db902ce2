pub mod cli;
mod convert;
mod error;
mod png_decoder;
mod tga;

use std::{
	fs::File,
	io::{BufRead, BufReader, Cursor, ErrorKind, Read, Seek},
	path::Path,
};

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, Limits, guess_format};
use log::{debug, warn};

use crate::{png_decoder::PngDecoder, tga::TGA_MAX_DIMENSION};

pub use crate::{
	cli::{Args, Mode},
	convert::{Conversion, convert_file, convert_stream},
	error::Error,
	tga::{TgaOptions, encode_tga, tga_pixels, write_tga},
};


const MAGIC_LEN: usize = 16;

/// Largest decoded pixel buffer accepted, in bytes (2 GiB).
pub const MAX_DECODE_BYTES: u64 = 2 * 1024 * 1024 * 1024;


/// Decode an image, detecting its format from the leading magic bytes.
pub fn load_image_from_reader<R: BufRead + Seek>(reader: R) -> Result<(ImageFormat, DynamicImage), Error> {
	load_with_hint(reader, None)
}


/// Decode an image file. The extension is only consulted when the content has
/// no recognizable magic bytes (TGA, for instance).
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(ImageFormat, DynamicImage), Error> {
	let path = path.as_ref();
	if !path.exists() {
		return Err(Error::InputNotFound(path.to_path_buf()));
	}

	let file = File::open(path)?;
	let reader = BufReader::new(file);

	load_with_hint(reader, ImageFormat::from_path(path).ok())
}


/// Decode an image from a non-seekable stream such as stdin.
pub fn load_image_from_stream<R: Read>(mut reader: R) -> Result<(ImageFormat, DynamicImage), Error> {
	let mut data = Vec::new();
	reader.read_to_end(&mut data)?;
	debug!("Read {} bytes from input stream", data.len());

	load_image_from_reader(Cursor::new(data))
}


fn load_with_hint<R: BufRead + Seek>(mut reader: R, hint: Option<ImageFormat>) -> Result<(ImageFormat, DynamicImage), Error> {
	// Guess format
	let mut buf = [0; MAGIC_LEN];
	let len = read_magic(&mut reader, &mut buf)?;
	reader.rewind()?;
	if len == 0 {
		return Err(Error::EmptyInput);
	}

	let format = match (guess_format(&buf[..len]), hint) {
		(Ok(format), _) => format,
		(Err(_), Some(format)) => format,
		// TGA has no magic bytes, so it is the last thing to try on an unnamed stream
		(Err(_), None) => {
			return decode_with_format(reader, ImageFormat::Tga).map_err(|e| {
				debug!("Input is not a TGA either: {}", e);
				Error::UnsupportedFormat
			});
		},
	};

	decode_with_format(reader, format)
}


fn decode_with_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> Result<(ImageFormat, DynamicImage), Error> {
	match format {
		ImageFormat::Png => {
			let decoder = PngDecoder::with_limits(reader, decode_limits())?;
			if decoder.is_animated() {
				warn!("Animated PNG, converting the default image only");
			}
			if decoder.source_bit_depth() > 8 {
				debug!("Reducing {}-bit PNG channels to 8 bits", decoder.source_bit_depth());
			}
			Ok((ImageFormat::Png, decode(decoder)?))
		},
		_ => {
			let mut reader = ImageReader::with_format(reader, format);
			// Limits are applied in `decode`, after the dimension check
			reader.no_limits();
			Ok((format, decode(reader.into_decoder()?)?))
		},
	}
}


/// Allocation policy shared by every decoder.
///
/// Dimensions are left open here; `decode` rejects anything a TGA header
/// cannot hold with `Error::TooBig` before the buffer is reserved.
pub fn decode_limits() -> Limits {
	let mut limits = Limits::no_limits();
	limits.max_alloc = Some(MAX_DECODE_BYTES);
	limits
}


/// Reject what cannot become a TGA before any pixel buffer is allocated.
fn decode<D: ImageDecoder>(mut decoder: D) -> Result<DynamicImage, Error> {
	let (width, height) = decoder.dimensions();
	if width > TGA_MAX_DIMENSION || height > TGA_MAX_DIMENSION {
		return Err(Error::TooBig(width, height));
	}

	let mut limits = decode_limits();
	limits.reserve(decoder.total_bytes())?;
	decoder.set_limits(limits)?;

	Ok(DynamicImage::from_decoder(decoder)?)
}


/// Fill `buf` from the reader, stopping early at EOF. Returns the number of bytes read.
fn read_magic<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(e) if e.kind() == ErrorKind::Interrupted => continue,
			Err(e) => return Err(e.into()),
		}
	}
	Ok(filled)
}
