use std::io::Cursor;

use anyhow::Result;
use assert_cmd::Command;
use clap::Parser;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use img2tga::{Args, Error, Mode};
use predicates::prelude::*;
use tempfile::TempDir;


fn img2tga() -> Command {
	Command::cargo_bin("img2tga").unwrap()
}


fn sample_png() -> Result<Vec<u8>> {
	let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(24, 16, |x, y| Rgb([x as u8 * 10, y as u8 * 15, 90])));
	let mut buf = Cursor::new(Vec::new());
	img.write_to(&mut buf, ImageFormat::Png)?;
	Ok(buf.into_inner())
}


fn mode_of(argv: &[&str], stdin_is_terminal: bool) -> Result<Mode, Error> {
	let args = Args::try_parse_from(std::iter::once("img2tga").chain(argv.iter().copied())).unwrap();
	args.mode(stdin_is_terminal)
}


#[test]
fn two_paths_select_file_mode() {
	let mode = mode_of(&["-r", "in.jpg", "out.tga"], true).unwrap();
	assert_eq!(
		mode,
		Mode::Files {
			input: "in.jpg".into(),
			output: "out.tga".into(),
		}
	);
}


#[test]
fn no_paths_select_stream_or_usage() {
	assert_eq!(mode_of(&[], false).unwrap(), Mode::Stream);
	assert_eq!(mode_of(&["-r"], false).unwrap(), Mode::Stream);
	assert_eq!(mode_of(&[], true).unwrap(), Mode::Usage);
}


#[test]
fn wrong_path_count_is_a_usage_error() {
	assert!(matches!(mode_of(&["only.png"], false), Err(Error::Usage(_))));
	assert!(matches!(mode_of(&["a", "b", "c"], true), Err(Error::Usage(_))));
}


#[test]
fn rle_flag_reaches_options() {
	let args = Args::try_parse_from(["img2tga", "-r"]).unwrap();
	assert!(args.options().rle);
	let args = Args::try_parse_from(["img2tga", "--rle"]).unwrap();
	assert!(args.options().rle);
	let args = Args::try_parse_from(["img2tga"]).unwrap();
	assert!(!args.options().rle);
}


#[test]
fn help_exits_zero() {
	img2tga().arg("-h").assert().success().stderr(predicate::str::contains("Usage"));
	img2tga().arg("--help").assert().success().stderr(predicate::str::contains("-r"));
}


#[test]
fn unknown_flag_exits_one() {
	img2tga().arg("-x").assert().code(1).stderr(predicate::str::contains("-x"));
}


#[test]
fn single_path_exits_one() {
	img2tga()
		.arg("input.png")
		.assert()
		.code(1)
		.stderr(predicate::str::contains("ERROR: invalid number of arguments"));
}


#[test]
fn missing_input_exits_one() -> Result<()> {
	let dir = TempDir::new()?;
	let output = dir.path().join("out.tga");

	img2tga()
		.arg(dir.path().join("missing.jpg"))
		.arg(&output)
		.assert()
		.code(1)
		.stderr(predicate::str::contains("input file not found"));
	assert!(!output.exists());
	Ok(())
}


#[test]
fn file_mode_converts() -> Result<()> {
	let dir = TempDir::new()?;
	let input = dir.path().join("in.png");
	let output = dir.path().join("out.tga");
	std::fs::write(&input, sample_png()?)?;

	img2tga()
		.arg("-r")
		.arg(&input)
		.arg(&output)
		.assert()
		.success()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("Using RLE compression."))
		.stderr(predicate::str::contains("Successfully converted image to"));

	let tga = image::open(&output)?;
	assert_eq!((tga.width(), tga.height()), (24, 16));
	Ok(())
}


#[test]
fn pipe_mode_writes_only_tga_to_stdout() -> Result<()> {
	let output = img2tga().write_stdin(sample_png()?).assert().success().get_output().stdout.clone();

	let tga = image::load_from_memory_with_format(&output, ImageFormat::Tga)?;
	assert_eq!((tga.width(), tga.height()), (24, 16));
	Ok(())
}


#[test]
fn pipe_mode_rejects_garbage() {
	img2tga()
		.write_stdin("not an image")
		.assert()
		.code(1)
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("ERROR: unsupported image format"));
}


#[test]
fn oversized_header_exits_one() -> Result<()> {
	let mut png = Vec::new();
	{
		let mut encoder = png::Encoder::new(&mut png, 200_000, 200_000);
		encoder.set_color(png::ColorType::Rgba);
		encoder.set_depth(png::BitDepth::Eight);
		let mut writer = encoder.write_header()?;
		writer.write_chunk(png::chunk::IDAT, &[0x78, 0x9c])?;
	}

	img2tga()
		.write_stdin(png)
		.assert()
		.code(1)
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("ERROR: image 200000x200000 exceeds"));
	Ok(())
}
