use crate::{
	config::EntryPoint,
	error::{Error, Result},
	paths::exe_name_matches,
	windows_wrapper::{module::Module, process::Process, snapshot::Snapshot, thread::Thread},
};
use log::{debug, info};
use windows::Win32::System::Memory::{MEM_COMMIT, MEM_RESERVE, PAGE_READWRITE};

pub const LOADER_MODULE: &str = "kernel32.dll";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injection {
	pub thread_id: u32,
	/// Exit code of the loader thread if we waited for it: the low 32 bits of the
	/// module handle. On x64 this is 0 for a module based on a 4 GiB boundary, so a
	/// zero is only treated as failure once a module snapshot agrees.
	pub module: Option<u32>,
}

/// First process whose executable name matches `name`, ignoring case.
pub fn find_process_id(name: &str) -> Result<Option<u32>> {
	let snapshot = Snapshot::processes()?;
	let found = snapshot
		.process_entries()
		.find(|entry| exe_name_matches(&entry.exe_file, name))
		.map(|entry| entry.pid);
	Ok(found)
}

/// Whether a module with the file name of `dll_path` is loaded in `pid`.
pub fn module_loaded(pid: u32, dll_path: &str) -> Result<bool> {
	let file = dll_path.rsplit(['\\', '/']).next().unwrap_or(dll_path);
	let snapshot = Snapshot::modules(pid)?;
	let found = snapshot
		.module_entries()
		.any(|entry| exe_name_matches(&entry.exe_path, file));
	Ok(found)
}

pub fn inject_library(
	process: &Process,
	dll_path: &str,
	entry_point: EntryPoint,
	wait: bool,
) -> Result<Injection> {
	let argument = entry_point.encode_path(dll_path);

	let allocated =
		process.virtual_alloc(0, argument.len(), MEM_COMMIT | MEM_RESERVE, PAGE_READWRITE)?;
	debug!("allocated {:#x}B at {:#x}", allocated.size(), allocated.address());

	let written = allocated.write_memory(&argument, 0)?;
	if written != argument.len() {
		return Err(Error::ShortWrite {
			written,
			expected: argument.len(),
		});
	}

	let function = Module::local(LOADER_MODULE)?.export_address(entry_point.export_name())?;
	debug!("{} at {:#x}", entry_point.export_name(), function);

	let thread = Thread::spawn_remote(process, 0, function, allocated.address() as _)?;
	info!("spawned loader thread {}", thread.id());

	if !wait {
		// the remote thread owns the buffer from here on
		allocated.leak();
		return Ok(Injection {
			thread_id: thread.id(),
			module: None,
		});
	}

	if let Err(e) = thread.join() {
		// the thread may still be running, so the buffer has to stay
		allocated.leak();
		return Err(e);
	}
	let code = thread.exit_code()?;
	if code == 0 && !module_loaded(process.pid()?, dll_path)? {
		return Err(Error::RemoteLoadFailed(dll_path.into()));
	}
	Ok(Injection {
		thread_id: thread.id(),
		module: Some(code),
	})
}
