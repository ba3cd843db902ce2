use std::{
	io::{self, IsTerminal, Write},
	process::ExitCode,
};

use clap::{CommandFactory, Parser, error::ErrorKind};
use img2tga::{Args, Error, Mode, convert_file, convert_stream};


fn main() -> ExitCode {
	init_logging();

	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) => {
			// clap would exit with 2 on bad flags; every failure here is 1
			eprint!("{}", err.render());
			return match err.kind() {
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
				_ => ExitCode::FAILURE,
			};
		},
	};

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("ERROR: {}", e);
			if let Error::Usage(_) = e {
				print_usage();
			}
			ExitCode::FAILURE
		},
	}
}


fn run(args: &Args) -> Result<(), Error> {
	let options = args.options();

	match args.mode(io::stdin().is_terminal())? {
		Mode::Files { input, output } => {
			convert_file(&input, &output, options)?;
		},
		Mode::Stream => {
			convert_stream(io::stdin().lock(), io::stdout().lock(), options)?;
		},
		Mode::Usage => print_usage(),
	}

	Ok(())
}


fn print_usage() {
	let _ = Args::command().write_help(&mut io::stderr());
}


// stdout may carry image data, so all log output goes to stderr
fn init_logging() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
		.target(env_logger::Target::Stderr)
		.init();
}
