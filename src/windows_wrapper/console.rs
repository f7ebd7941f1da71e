use crate::error::Result;
use windows::Win32::System::Console::FreeConsole;

/// Detaches from the console window the launcher was started with.
pub fn hide() -> Result<()> {
	unsafe { FreeConsole()? };
	Ok(())
}
