#![allow(clippy::missing_safety_doc)]

use crate::{
	error::{Error, Result},
	windows_wrapper::process::Process,
};
use log::warn;
use std::{ffi::c_void, mem::transmute};
use windows::Win32::{
	Foundation::{CloseHandle, HANDLE, WAIT_EVENT, WAIT_FAILED},
	System::Threading::{
		CreateRemoteThreadEx, GetExitCodeThread, WaitForSingleObject, INFINITE,
		LPPROC_THREAD_ATTRIBUTE_LIST, LPTHREAD_START_ROUTINE,
	},
};

pub type StartRoutine = LPTHREAD_START_ROUTINE;

pub struct Thread {
	handle: HANDLE,
	id: u32,
}

impl Thread {
	pub unsafe fn from_raw_handle(handle: HANDLE, id: u32) -> Self { Self { handle, id } }

	/// Starts a thread in `process` at `entry`, passing `param` as its only argument.
	pub fn spawn_remote(
		process: &Process,
		stack_size: usize,
		entry: usize,
		param: *const c_void,
	) -> Result<Self> {
		if entry == 0 {
			return Err(Error::ApiCallNone);
		}
		let entry = unsafe { transmute::<usize, StartRoutine>(entry) };
		let mut thread_id = 0;
		let handle = unsafe {
			CreateRemoteThreadEx(
				process.handle(),
				None,
				stack_size,
				entry,
				Some(param),
				0,
				LPPROC_THREAD_ATTRIBUTE_LIST::default(),
				Some(&mut thread_id),
			)?
		};
		Ok(Self {
			handle,
			id: thread_id,
		})
	}

	pub fn id(&self) -> u32 { self.id }

	/// Blocks until the thread exits.
	pub fn join(&self) -> Result<WAIT_EVENT> { self.wait(INFINITE) }

	pub fn wait(&self, milliseconds: u32) -> Result<WAIT_EVENT> {
		let cause = unsafe { WaitForSingleObject(self.handle, milliseconds) };
		if cause == WAIT_FAILED {
			return Err(Error::ApiCallFailed("WaitForSingleObject"));
		}
		Ok(cause)
	}

	pub fn exit_code(&self) -> Result<u32> {
		let mut code = 0;
		unsafe { GetExitCodeThread(self.handle, &mut code)? };
		Ok(code)
	}
}

impl Drop for Thread {
	fn drop(&mut self) {
		if !self.handle.is_invalid() {
			if let Err(e) = unsafe { CloseHandle(self.handle) } {
				warn!("thread handle could not be closed: {}", e);
			}
		}
	}
}
