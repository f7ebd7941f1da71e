use crate::error::{Error, Result};
use log::debug;
use std::{
	thread::sleep,
	time::{Duration, Instant},
};

/// Calls `probe` until it yields a value, sleeping `interval` between attempts.
pub fn poll_until<T>(
	interval: Duration,
	timeout: Option<Duration>,
	mut probe: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
	let start = Instant::now();
	let mut attempt = 0u64;
	loop {
		attempt += 1;
		debug!("poll attempt {}", attempt);
		if let Some(found) = probe()? {
			return Ok(found);
		}
		if let Some(limit) = timeout {
			if start.elapsed() >= limit {
				return Err(Error::Timeout(limit));
			}
		}
		sleep(interval);
	}
}
