pub mod child;
pub mod console;
pub mod module;
pub mod process;
pub mod snapshot;
pub mod thread;
pub mod virtual_alloc;

use std::{ffi::OsStr, os::windows::ffi::OsStrExt};

/// UTF-16 copy of `s` with a trailing NUL.
pub fn to_wide(s: &str) -> Vec<u16> { OsStr::new(s).encode_wide().chain(Some(0)).collect() }

/// Reads a NUL terminated UTF-16 buffer, such as `szExeFile`.
pub fn from_wide(buf: &[u16]) -> String {
	let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
	String::from_utf16_lossy(&buf[..len])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wide_round_trip_stops_at_nul() {
		let mut buf = [0u16; 16];
		let wide = to_wide("Game.exe");
		assert_eq!(wide.last(), Some(&0));
		buf[..wide.len()].copy_from_slice(&wide);
		assert_eq!(from_wide(&buf), "Game.exe");
	}
}
