use std::{error::Error as StdError, path::PathBuf};

pub enum Error {
	InputNotFound(PathBuf),
	EmptyInput,
	UnsupportedFormat,
	Io(std::io::Error),
	PngDecoding(png::DecodingError),
	TooBig(u32, u32), // TGA header stores dimensions as u16
	Decoding(image::error::DecodingError),
	Encoding(image::error::EncodingError),
	Parameter(image::error::ParameterError),
	Limits(image::error::LimitError),
	Unsupported(image::error::UnsupportedError),
	Usage(String),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Io(err)
	}
}

impl From<png::DecodingError> for Error {
	fn from(err: png::DecodingError) -> Self {
		match err {
			png::DecodingError::IoError(io_err) => Error::Io(io_err),
			_ => Error::PngDecoding(err),
		}
	}
}

impl From<image::ImageError> for Error {
	fn from(err: image::ImageError) -> Self {
		match err {
			image::ImageError::IoError(io_err) => Error::Io(io_err),
			image::ImageError::Decoding(err) => Error::Decoding(err),
			image::ImageError::Encoding(err) => Error::Encoding(err),
			image::ImageError::Parameter(err) => Error::Parameter(err),
			image::ImageError::Limits(err) => Error::Limits(err),
			image::ImageError::Unsupported(err) => Error::Unsupported(err),
		}
	}
}

impl StdError for Error {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::InputNotFound(path) => write!(f, "input file not found: {}", path.display()),
			Error::EmptyInput => write!(f, "no image data on input"),
			Error::UnsupportedFormat => write!(f, "unsupported image format"),
			Error::Io(err) => write!(f, "I/O error: {}", err),
			Error::PngDecoding(err) => write!(f, "PNG decoding error: {}", err),
			Error::TooBig(w, h) => write!(f, "image {}x{} exceeds the 65535x65535 TGA limit", w, h),
			Error::Decoding(err) => write!(f, "decoding error: {}", err),
			Error::Encoding(err) => write!(f, "TGA encoding error: {}", err),
			Error::Parameter(err) => write!(f, "parameter error: {}", err),
			Error::Limits(err) => write!(f, "limits error: {}", err),
			Error::Unsupported(err) => write!(f, "unsupported error: {}", err),
			Error::Usage(msg) => write!(f, "{}", msg),
		}
	}
}

impl std::fmt::Debug for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Display::fmt(self, f)
	}
}
