use crate::{
	error::Result,
	windows_wrapper::{process::Process, thread::Thread, to_wide},
};
use std::mem::size_of;
use windows::{
	core::{PCWSTR, PWSTR},
	Win32::System::Threading::{
		CreateProcessW, CREATE_NEW_CONSOLE, PROCESS_CREATION_FLAGS, PROCESS_INFORMATION,
		STARTUPINFOW,
	},
};

/// A process started by us. Both the process and primary thread handles close on drop.
pub struct ChildProcess {
	process: Process,
	_main_thread: Thread,
	pid: u32,
}

impl ChildProcess {
	pub fn spawn(path: &str, new_console: bool) -> Result<Self> {
		let application = to_wide(path);
		let startup = STARTUPINFOW {
			cb: size_of::<STARTUPINFOW>() as _,
			..Default::default()
		};
		let mut info = PROCESS_INFORMATION::default();
		let flags = match new_console {
			true => CREATE_NEW_CONSOLE,
			false => PROCESS_CREATION_FLAGS(0),
		};

		unsafe {
			CreateProcessW(
				PCWSTR(application.as_ptr()),
				PWSTR::null(),
				None,
				None,
				false,
				flags,
				None,
				PCWSTR::null(),
				&startup,
				&mut info,
			)?;
		}

		let (process, main_thread) = unsafe {
			(
				Process::from_raw_handle(info.hProcess),
				Thread::from_raw_handle(info.hThread, info.dwThreadId),
			)
		};
		Ok(Self {
			process,
			_main_thread: main_thread,
			pid: info.dwProcessId,
		})
	}

	pub fn pid(&self) -> u32 { self.pid }

	pub fn process(&self) -> &Process { &self.process }
}
