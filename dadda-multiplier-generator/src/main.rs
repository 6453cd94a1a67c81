//! SystemVerilog generator for a combinational multiplier that sums its
//! partial products with a Dadda reduction tree. The emitted module takes
//! two width-W operands and a 2-bit `mul_type` selector choosing between
//! unsigned, signed and signed-times-unsigned interpretation.
//!
//! Example:
//!
//!     cargo run -p dadda-multiplier-generator -- 32 >./multiplier_combinational.sv

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let mut args = std::env::args_os();
	let argv0 = args.next().unwrap_or_else(|| env!("CARGO_BIN_NAME").into());
	let (width, output, stats) = parse_args(args, &argv0);

	let multiplier = dadda::Multiplier::generate(width)?;

	if stats {
		eprint!("{}", multiplier.statistics());
	}

	match output {
		Some(path) => {
			// Serialize into memory first so a failed run leaves no partial
			// file behind.
			let mut buffer = Vec::new();
			multiplier.write_module(&mut buffer)?;
			std::fs::write(path, buffer)?;
		},

		None => multiplier.write_module(std::io::stdout().lock())?,
	}

	Ok(())
}

fn parse_args(mut args: impl Iterator<Item = std::ffi::OsString>, argv0: &std::ffi::OsStr) -> (u8, Option<std::path::PathBuf>, bool) {
	let mut width = None;
	let mut output = None;
	let mut stats = false;

	while let Some(opt) = args.next() {
		match opt.to_str() {
			Some("--help") => {
				write_usage(std::io::stdout(), argv0);
				std::process::exit(0);
			},

			Some("--stats") => stats = true,

			Some("-o" | "--output") => match args.next() {
				Some(path) => output = Some(path.into()),
				None => write_usage_and_crash(argv0),
			},

			Some(value) if width.is_none() => match value.parse() {
				Ok(value) => width = Some(value),
				Err(_) => write_usage_and_crash(argv0),
			},

			_ => write_usage_and_crash(argv0),
		}
	}

	(width.unwrap_or(32), output, stats)
}

fn write_usage_and_crash(argv0: &std::ffi::OsStr) -> ! {
	write_usage(std::io::stderr(), argv0);
	std::process::exit(1);
}

fn write_usage(mut w: impl std::io::Write, argv0: &std::ffi::OsStr) {
	_ = writeln!(w, "Usage: {} [--stats] [-o <out.sv>] [<width>]", argv0.to_string_lossy());
}
