use clap::Parser;
use launchjector::{
	config::{config_path, LoaderConfig},
	logger::init_logger,
	paths::exe_dir,
	run,
};
use log::{error, info};
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[command(about = "Starts a game and loads a library into it")]
struct Opt {
	/// Config file to read instead of loader_config.json next to the executable
	#[arg(long)]
	config: Option<PathBuf>,

	/// Keep the console and give the game its own
	#[arg(long)]
	show_console: bool,

	/// Log every step
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let opt = Opt::parse();
	init_logger(opt.verbose);

	let base_dir = exe_dir();
	let path = opt
		.config
		.unwrap_or_else(|| PathBuf::from(config_path(&base_dir)));

	let mut config = match LoaderConfig::load(&path) {
		Ok(config) => config,
		Err(e) => {
			error!("could not read {}: {}", path.display(), e);
			return ExitCode::FAILURE;
		}
	};
	config.show_console |= opt.show_console;

	#[cfg(windows)]
	if !config.show_console {
		if let Err(e) = launchjector::windows_wrapper::console::hide() {
			log::debug!("no console to detach from: {}", e);
		}
	}

	match run(config, &base_dir) {
		Ok(outcome) => {
			match outcome.module {
				Some(module) => {
					info!("done (pid {}, module handle low bits {:#x})", outcome.pid, module)
				}
				None => info!("done (pid {}, loader still running)", outcome.pid),
			}
			ExitCode::SUCCESS
		}
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}
