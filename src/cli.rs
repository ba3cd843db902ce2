use std::path::PathBuf;

use clap::Parser;

use crate::{error::Error, tga::TgaOptions};


#[derive(Parser, Debug)]
#[command(
	name = "img2tga",
	version,
	about = "Convert JPEG, PNG, BMP and other raster images to TGA",
	override_usage = "img2tga [-r] <INPUT> <OUTPUT.tga>\n       cat <INPUT> | img2tga [-r] > <OUTPUT.tga>"
)]
pub struct Args {
	/// Enable RLE compression for the output TGA file
	#[arg(short = 'r', long = "rle")]
	pub rle: bool,

	/// Input image followed by the output TGA path. Omit both to read stdin and write stdout
	#[arg(value_name = "FILE")]
	pub paths: Vec<PathBuf>,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
	Files { input: PathBuf, output: PathBuf },
	Stream,
	/// Nothing to convert: no paths and stdin is an interactive terminal.
	Usage,
}


impl Args {
	pub fn options(&self) -> TgaOptions {
		TgaOptions { rle: self.rle }
	}

	pub fn mode(&self, stdin_is_terminal: bool) -> Result<Mode, Error> {
		match self.paths.as_slice() {
			[input, output] => Ok(Mode::Files {
				input: input.clone(),
				output: output.clone(),
			}),
			[] if stdin_is_terminal => Ok(Mode::Usage),
			[] => Ok(Mode::Stream),
			_ => Err(Error::Usage(format!("invalid number of arguments: expected 0 or 2 paths, got {}", self.paths.len()))),
		}
	}
}
