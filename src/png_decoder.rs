use std::io::{BufRead, Seek};

use image::{
	ColorType, ExtendedColorType, ImageDecoder, ImageError, ImageFormat, ImageResult, Limits,
	error::{DecodingError, LimitError, LimitErrorKind, ParameterError, ParameterErrorKind, UnsupportedError, UnsupportedErrorKind},
};

use crate::error::Error;


/// PNG decoder that always yields 8-bit samples.
///
/// TGA stores 8 bits per channel, so palette and sub-byte images are expanded
/// and 16-bit images are stripped to their high byte while decoding instead of
/// materializing a 16-bit buffer first.
pub(crate) struct PngDecoder<R: BufRead + Seek> {
	color_type: ColorType,
	source_bit_depth: u8,
	reader: png::Reader<R>,
}


impl<R: BufRead + Seek> PngDecoder<R> {
	/// `limits.max_alloc` also bounds the `png` reader's own buffers, which
	/// cannot be changed after construction.
	pub(crate) fn with_limits(r: R, limits: Limits) -> Result<PngDecoder<R>, Error> {
		limits.check_support(&image::LimitSupport::default())?;

		let max_bytes = usize::try_from(limits.max_alloc.unwrap_or(u64::MAX)).unwrap_or(usize::MAX);
		let mut decoder = png::Decoder::new_with_limits(r, png::Limits { bytes: max_bytes });

		let info = decoder.read_header_info()?;
		limits.check_dimensions(info.width, info.height)?;
		let source_bit_depth = info.bit_depth as u8;

		decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
		let reader = decoder.read_info()?;
		let (color_type, bits) = reader.output_color_type();
		let color_type = match (color_type, bits) {
			(png::ColorType::Grayscale, png::BitDepth::Eight) => ColorType::L8,
			(png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => ColorType::La8,
			(png::ColorType::Rgb, png::BitDepth::Eight) => ColorType::Rgb8,
			(png::ColorType::Rgba, png::BitDepth::Eight) => ColorType::Rgba8,

			// EXPAND and STRIP_16 should leave nothing else behind
			(_, bits) => return Err(unsupported_color(ExtendedColorType::Unknown(bits as u8))),
		};

		Ok(PngDecoder {
			color_type,
			source_bit_depth,
			reader,
		})
	}

	/// Returns if the image contains an animation.
	///
	/// Only the default image is decoded; the remaining frames are ignored.
	pub fn is_animated(&self) -> bool {
		self.reader.info().is_animated()
	}

	/// Bit depth declared in the file header, before any transformation.
	pub fn source_bit_depth(&self) -> u8 {
		self.source_bit_depth
	}
}


impl<R: BufRead + Seek> ImageDecoder for PngDecoder<R> {
	fn dimensions(&self) -> (u32, u32) {
		self.reader.info().size()
	}

	fn color_type(&self) -> ColorType {
		self.color_type
	}

	fn read_image(mut self, buf: &mut [u8]) -> ImageResult<()> {
		assert_eq!(u64::try_from(buf.len()), Ok(self.total_bytes()));
		self.reader.next_frame(buf).map_err(error_from_png)?;
		Ok(())
	}

	fn read_image_boxed(self: Box<Self>, buf: &mut [u8]) -> ImageResult<()> {
		(*self).read_image(buf)
	}

	// Only validates: the output buffer is reserved by the caller and the
	// reader keeps the limit it was built with.
	fn set_limits(&mut self, limits: Limits) -> ImageResult<()> {
		limits.check_support(&image::LimitSupport::default())?;
		let info = self.reader.info();
		limits.check_dimensions(info.width, info.height)?;
		Ok(())
	}
}


fn unsupported_color(ect: ExtendedColorType) -> Error {
	Error::Unsupported(UnsupportedError::from_format_and_kind(
		ImageFormat::Png.into(),
		UnsupportedErrorKind::Color(ect),
	))
}


fn error_from_png(err: png::DecodingError) -> ImageError {
	match err {
		png::DecodingError::IoError(err) => ImageError::IoError(err),
		err @ png::DecodingError::Format(_) => ImageError::Decoding(DecodingError::new(ImageFormat::Png.into(), err)),
		err @ png::DecodingError::Parameter(_) => ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::Generic(err.to_string()))),
		png::DecodingError::LimitsExceeded => ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory)),
	}
}
