use chrono::Utc;
use env_logger::{Builder, Env};
use std::io::Write;

/// Initialise the logger with UTC timestamps. `RUST_LOG` overrides the default level.
pub fn init_logger(verbose: bool) {
	let filter_level = if verbose { "debug" } else { "info" };

	let _ = Builder::from_env(Env::default().default_filter_or(filter_level))
		.format(|buf, record| {
			writeln!(
				buf,
				"[{} {}] {}",
				Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
				record.level(),
				record.args()
			)
		})
		.try_init();
}
