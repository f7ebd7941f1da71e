use crate::{
	error::{Error, Result},
	windows_wrapper::process::Process,
};
use log::{debug, warn};
use std::{ffi::c_void, mem::forget};
use windows::Win32::System::Memory::{
	VirtualAllocEx, VirtualFreeEx, MEM_RELEASE, PAGE_PROTECTION_FLAGS, VIRTUAL_ALLOCATION_TYPE,
};

/// Memory committed inside another process. Released on drop.
pub struct VirtualAlloc<'a> {
	process: &'a Process,
	address: usize,
	size: usize,
}

impl<'a> VirtualAlloc<'a> {
	pub fn alloc(
		process: &'a Process,
		address: usize,
		size: usize,
		alloc_type: VIRTUAL_ALLOCATION_TYPE,
		protect: PAGE_PROTECTION_FLAGS,
	) -> Result<Self> {
		let hint = (address != 0).then_some(address as *const c_void);
		let address = unsafe { VirtualAllocEx(process.handle(), hint, size, alloc_type, protect) };
		if address.is_null() {
			return Err(Error::ApiCallFailed("VirtualAllocEx"));
		}
		Ok(Self {
			process,
			address: address as _,
			size,
		})
	}

	/// Gives up ownership without freeing, for memory a remote thread may still read.
	pub fn leak(self) -> usize {
		let address = self.address;
		forget(self);
		address
	}

	pub fn address(&self) -> usize { self.address }

	pub fn size(&self) -> usize { self.size }

	pub fn write_memory(&self, data: &[u8], offset: usize) -> Result<usize> {
		self.process.write_memory(data, self.address + offset)
	}
}

impl<'a> Drop for VirtualAlloc<'a> {
	fn drop(&mut self) {
		// MEM_RELEASE requires a size of zero
		let res =
			unsafe { VirtualFreeEx(self.process.handle(), self.address as _, 0, MEM_RELEASE) };
		match res {
			Ok(()) => debug!("released {:#x}B at {:#x}", self.size, self.address),
			Err(e) => warn!("remote allocation at {:#x} could not be freed: {}", self.address, e),
		}
	}
}
