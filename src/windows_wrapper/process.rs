#![allow(clippy::missing_safety_doc)]

use crate::{
	error::{Error, Result},
	windows_wrapper::virtual_alloc::VirtualAlloc,
};
use log::warn;
use windows::Win32::{
	Foundation::{CloseHandle, HANDLE},
	System::{
		Diagnostics::Debug::WriteProcessMemory,
		Memory::{PAGE_PROTECTION_FLAGS, VIRTUAL_ALLOCATION_TYPE},
		Threading::{GetProcessId, OpenProcess, PROCESS_ACCESS_RIGHTS},
	},
};

#[derive(Debug)]
pub struct Process {
	handle: HANDLE,
}

impl Process {
	pub unsafe fn from_raw_handle(handle: HANDLE) -> Self { Self { handle } }

	pub fn from_pid(pid: u32, access: PROCESS_ACCESS_RIGHTS, inherit: bool) -> Result<Self> {
		let handle = unsafe { OpenProcess(access, inherit, pid)? };
		Ok(Self { handle })
	}

	pub fn handle(&self) -> HANDLE { self.handle }

	pub fn pid(&self) -> Result<u32> {
		let pid = unsafe { GetProcessId(self.handle) };
		if pid == 0 {
			return Err(Error::ApiCallFailed("GetProcessId"));
		}
		Ok(pid)
	}

	pub fn virtual_alloc(
		&self,
		address: usize,
		size: usize,
		alloc_type: VIRTUAL_ALLOCATION_TYPE,
		protect: PAGE_PROTECTION_FLAGS,
	) -> Result<VirtualAlloc> {
		VirtualAlloc::alloc(self, address, size, alloc_type, protect)
	}

	pub fn write_memory(&self, buf: &[u8], address: usize) -> Result<usize> {
		let mut bytes_written = 0;
		unsafe {
			WriteProcessMemory(
				self.handle,
				address as _,
				buf.as_ptr() as _,
				buf.len(),
				Some(&mut bytes_written),
			)?;
		}
		Ok(bytes_written)
	}
}

impl Drop for Process {
	fn drop(&mut self) {
		if !self.handle.is_invalid() {
			if let Err(e) = unsafe { CloseHandle(self.handle) } {
				warn!("process handle could not be closed: {}", e);
			}
		}
	}
}
