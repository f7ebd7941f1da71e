use crate::{error::Result, windows_wrapper::from_wide};
use log::warn;
use std::mem::size_of;
use windows::Win32::{
	Foundation::{CloseHandle, HANDLE},
	System::Diagnostics::ToolHelp::{
		CreateToolhelp32Snapshot, Module32FirstW, Module32NextW, Process32FirstW, Process32NextW,
		MODULEENTRY32W, PROCESSENTRY32W, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
	},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
	pub pid: u32,
	pub exe_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
	pub base: usize,
	pub name: String,
	pub exe_path: String,
}

pub struct Snapshot {
	handle: HANDLE,
}

impl Snapshot {
	/// Snapshot of every process on the system.
	pub fn processes() -> Result<Self> {
		let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? };
		Ok(Self { handle })
	}

	/// Snapshot of the modules loaded in `pid`, 32-bit ones included.
	pub fn modules(pid: u32) -> Result<Self> {
		let handle =
			unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)? };
		Ok(Self { handle })
	}

	pub fn process_entries(&self) -> ProcessEntryIter<'_> { ProcessEntryIter::new(self) }

	pub fn module_entries(&self) -> ModuleEntryIter<'_> { ModuleEntryIter::new(self) }
}

impl Drop for Snapshot {
	fn drop(&mut self) {
		if !self.handle.is_invalid() {
			if let Err(e) = unsafe { CloseHandle(self.handle) } {
				warn!("snapshot handle could not be closed: {}", e);
			}
		}
	}
}

pub struct ProcessEntryIter<'a> {
	snapshot: &'a Snapshot,
	entry: PROCESSENTRY32W,
	done_first: bool,
}

impl<'a> ProcessEntryIter<'a> {
	pub fn new(snapshot: &'a Snapshot) -> Self {
		let entry = PROCESSENTRY32W {
			dwSize: size_of::<PROCESSENTRY32W>() as _,
			..PROCESSENTRY32W::default()
		};

		Self {
			snapshot,
			entry,
			done_first: false,
		}
	}

	fn current(&self) -> ProcessEntry {
		ProcessEntry {
			pid: self.entry.th32ProcessID,
			exe_file: from_wide(&self.entry.szExeFile),
		}
	}
}

impl<'a> Iterator for ProcessEntryIter<'a> {
	type Item = ProcessEntry;

	fn next(&mut self) -> Option<Self::Item> {
		let advanced = match self.done_first {
			false => {
				self.done_first = true;
				unsafe { Process32FirstW(self.snapshot.handle, &mut self.entry) }
			}
			true => unsafe { Process32NextW(self.snapshot.handle, &mut self.entry) },
		};
		advanced.ok().map(|_| self.current())
	}
}

pub struct ModuleEntryIter<'a> {
	snapshot: &'a Snapshot,
	entry: MODULEENTRY32W,
	done_first: bool,
}

impl<'a> ModuleEntryIter<'a> {
	pub fn new(snapshot: &'a Snapshot) -> Self {
		let entry = MODULEENTRY32W {
			dwSize: size_of::<MODULEENTRY32W>() as _,
			..MODULEENTRY32W::default()
		};

		Self {
			snapshot,
			entry,
			done_first: false,
		}
	}

	fn current(&self) -> ModuleEntry {
		ModuleEntry {
			base: self.entry.modBaseAddr as _,
			name: from_wide(&self.entry.szModule),
			exe_path: from_wide(&self.entry.szExePath),
		}
	}
}

impl<'a> Iterator for ModuleEntryIter<'a> {
	type Item = ModuleEntry;

	fn next(&mut self) -> Option<Self::Item> {
		let advanced = match self.done_first {
			false => {
				self.done_first = true;
				unsafe { Module32FirstW(self.snapshot.handle, &mut self.entry) }
			}
			true => unsafe { Module32NextW(self.snapshot.handle, &mut self.entry) },
		};
		advanced.ok().map(|_| self.current())
	}
}
