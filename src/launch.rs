use crate::{
	config::{EntryPoint, LoaderConfig},
	error::Result,
	paths::resolve,
};
use log::warn;
use std::{path::Path, time::Duration};

/// A config with every path made absolute and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
	pub dll_path: String,
	pub game_path: String,
	pub process_name: String,
	pub new_console: bool,
	pub entry_point: EntryPoint,
	pub poll_interval: Duration,
	pub find_timeout: Option<Duration>,
	pub wait_for_loader: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
	pub pid: u32,
	pub module: Option<u32>,
}

impl Plan {
	pub fn new(mut config: LoaderConfig, base_dir: &str) -> Result<Self> {
		config.validate()?;
		let dll_path = resolve(base_dir, &config.dll_path);
		if !Path::new(&dll_path).is_file() {
			warn!("library {} does not exist yet", dll_path);
		}
		Ok(Self {
			game_path: resolve(base_dir, &config.game_path),
			dll_path,
			poll_interval: config.poll_interval(),
			find_timeout: config.find_timeout(),
			process_name: config.process_name,
			new_console: config.show_console,
			entry_point: config.entry_point,
			wait_for_loader: config.wait_for_loader,
		})
	}
}

/// Starts the game, waits for its process to show up and loads the library into it.
pub fn run(config: LoaderConfig, base_dir: &str) -> Result<Outcome> {
	let plan = Plan::new(config, base_dir)?;
	execute(&plan)
}

#[cfg(windows)]
fn execute(plan: &Plan) -> Result<Outcome> {
	use crate::{
		inject::{find_process_id, inject_library},
		poll::poll_until,
		windows_wrapper::{child::ChildProcess, process::Process},
	};
	use log::{debug, error, info};
	use windows::Win32::System::Threading::PROCESS_ALL_ACCESS;

	let child = ChildProcess::spawn(&plan.game_path, plan.new_console)?;
	info!("started {} (pid {})", plan.game_path, child.pid());

	let pid = poll_until(plan.poll_interval, plan.find_timeout, || {
		debug!("looking for process {}", plan.process_name);
		find_process_id(&plan.process_name)
	})?;
	info!("found {} (pid {})", plan.process_name, pid);

	let opened;
	let process = match pid == child.pid() {
		true => child.process(),
		false => {
			opened = Process::from_pid(pid, PROCESS_ALL_ACCESS, false)?;
			&opened
		}
	};

	match inject_library(process, &plan.dll_path, plan.entry_point, plan.wait_for_loader) {
		Ok(injection) => {
			info!("DLL injected successfully! (loader thread {})", injection.thread_id);
			Ok(Outcome {
				pid,
				module: injection.module,
			})
		}
		Err(e) => {
			error!("Failed to inject DLL: {}", e);
			Err(e)
		}
	}
}

#[cfg(not(windows))]
fn execute(_plan: &Plan) -> Result<Outcome> { Err(crate::error::Error::Unsupported) }
