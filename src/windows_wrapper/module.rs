use crate::{
	error::{Error, Result},
	windows_wrapper::to_wide,
};
use std::ffi::CString;
use windows::{
	core::{PCSTR, PCWSTR},
	Win32::{
		Foundation::HMODULE,
		System::LibraryLoader::{GetModuleHandleW, GetProcAddress},
	},
};

/// A module loaded in this process. Not reference counted, so nothing to release.
#[derive(Debug)]
pub struct Module {
	handle: HMODULE,
}

impl Module {
	pub fn local(name: &str) -> Result<Self> {
		let wide = to_wide(name);
		let handle = unsafe { GetModuleHandleW(PCWSTR(wide.as_ptr()))? };
		Ok(Self { handle })
	}

	pub fn export_address(&self, name: &str) -> Result<usize> {
		let export_name = CString::new(name).map_err(|_| Error::StringErr)?;
		let address = unsafe { GetProcAddress(self.handle, PCSTR(export_name.as_ptr() as _)) };
		match address {
			None => Err(Error::ApiCallNone),
			Some(a) => Ok(a as usize),
		}
	}
}
