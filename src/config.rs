use crate::{
	error::{Error, Result},
	paths,
};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fs, io::ErrorKind, path::Path, time::Duration};

pub const CONFIG_FILE_NAME: &str = "loader_config.json";

// Notepad writes one in front of UTF-8 files
const BOM: char = '\u{feff}';

/// Export in `kernel32.dll` the remote thread starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EntryPoint {
	#[default]
	LoadLibraryW,
	LoadLibraryA,
}

impl EntryPoint {
	pub fn export_name(self) -> &'static str {
		match self {
			EntryPoint::LoadLibraryW => "LoadLibraryW",
			EntryPoint::LoadLibraryA => "LoadLibraryA",
		}
	}

	/// NUL terminated argument buffer the loader expects for `path`.
	pub fn encode_path(self, path: &str) -> Vec<u8> {
		match self {
			EntryPoint::LoadLibraryW => path
				.encode_utf16()
				.chain(Some(0))
				.flat_map(u16::to_le_bytes)
				.collect(),
			EntryPoint::LoadLibraryA => path.bytes().chain(Some(0)).collect(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
	pub dll_path: String,
	pub game_path: String,
	pub process_name: String,
	pub show_console: bool,
	pub entry_point: EntryPoint,
	pub poll_interval_ms: u64,
	pub find_timeout_secs: Option<u64>,
	pub wait_for_loader: bool,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			dll_path: r".\UniversalHookX-Coop.dll".into(),
			game_path: r".\Game.exe".into(),
			process_name: "Game.exe".into(),
			show_console: false,
			entry_point: EntryPoint::default(),
			poll_interval_ms: 100,
			find_timeout_secs: None,
			wait_for_loader: true,
		}
	}
}

pub fn config_path(exe_dir: &str) -> String { paths::join(exe_dir, CONFIG_FILE_NAME) }

impl LoaderConfig {
	/// Reads `path`, falling back to defaults when it is missing, empty or not valid JSON.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
			Err(e) => return Err(e.into()),
		};
		let text = match String::from_utf8(bytes) {
			Ok(text) => text,
			Err(e) => {
				warn!(
					"Config {} is not UTF-8, non-ASCII characters will be replaced",
					path.display()
				);
				String::from_utf8_lossy(e.as_bytes()).into_owned()
			}
		};
		if text.trim_start_matches(BOM).trim().is_empty() {
			info!("Config not found: {} (using defaults)", path.display());
			return Ok(Self::default());
		}

		match Self::from_json(&text) {
			Ok(cfg) => {
				debug!("loaded config from {}: {:?}", path.display(), cfg);
				Ok(cfg)
			}
			Err(e) => {
				warn!("Config {} is not valid: {} (using defaults)", path.display(), e);
				Ok(Self::default())
			}
		}
	}

	/// Keys are optional and unknown keys are ignored. A key holding the wrong
	/// JSON type keeps its default.
	pub fn from_json(text: &str) -> Result<Self> {
		let text = text.strip_prefix(BOM).unwrap_or(text);
		let value: Value = serde_json::from_str(text)?;
		let map = match value {
			Value::Object(map) => map,
			_ => return Err(Error::Config("top level is not an object")),
		};

		let mut cfg = Self::default();
		if let Some(v) = string_key(&map, "dll_path") {
			cfg.dll_path = v;
		}
		if let Some(v) = string_key(&map, "game_path") {
			cfg.game_path = v;
		}
		if let Some(v) = string_key(&map, "process_name") {
			cfg.process_name = v;
		}
		if let Some(v) = map.get("show_console").and_then(Value::as_bool) {
			cfg.show_console = v;
		}
		if let Some(v) = map.get("wait_for_loader").and_then(Value::as_bool) {
			cfg.wait_for_loader = v;
		}
		if let Some(v) = map.get("poll_interval_ms").and_then(Value::as_u64) {
			cfg.poll_interval_ms = v;
		}
		if let Some(v) = map.get("find_timeout_secs").and_then(Value::as_u64) {
			cfg.find_timeout_secs = Some(v);
		}
		if let Some(v) = map.get("entry_point") {
			match EntryPoint::deserialize(v) {
				Ok(entry) => cfg.entry_point = entry,
				Err(e) => warn!("ignoring entry_point: {}", e),
			}
		}
		Ok(cfg)
	}

	pub fn validate(&mut self) -> Result<()> {
		if self.game_path.is_empty() || self.process_name.is_empty() {
			return Err(Error::Config("empty game_path or process_name"));
		}
		self.poll_interval_ms = self.poll_interval_ms.max(1);
		Ok(())
	}

	pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }

	pub fn find_timeout(&self) -> Option<Duration> {
		self.find_timeout_secs.map(Duration::from_secs)
	}
}

fn string_key(map: &Map<String, Value>, key: &str) -> Option<String> {
	map.get(key).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_gives_defaults() {
		let dir = tempfile::tempdir().expect("tempdir");
		let cfg = LoaderConfig::load(dir.path().join(CONFIG_FILE_NAME)).expect("load");
		assert_eq!(cfg, LoaderConfig::default());
	}

	#[test]
	fn empty_file_gives_defaults() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs::write(&path, "").expect("write");
		assert_eq!(LoaderConfig::load(&path).expect("load"), LoaderConfig::default());
	}

	#[test]
	fn invalid_json_gives_defaults() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs::write(&path, r#"{"dll_path": "a.dll""#).expect("write");
		assert_eq!(LoaderConfig::load(&path).expect("load"), LoaderConfig::default());
	}

	#[test]
	fn bom_is_ignored() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs::write(&path, "\u{feff}{\"process_name\": \"thing.exe\"}").expect("write");
		let cfg = LoaderConfig::load(&path).expect("load");
		assert_eq!(cfg.process_name, "thing.exe");
	}

	#[test]
	fn bom_only_file_gives_defaults() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs::write(&path, "\u{feff}").expect("write");
		assert_eq!(LoaderConfig::load(&path).expect("load"), LoaderConfig::default());
	}

	#[test]
	fn ansi_file_still_reads_ascii_keys() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		let mut raw = br#"{"dll_path": "C:\\Spiele\\M"#.to_vec();
		raw.push(0xfc);
		raw.extend_from_slice(br#"nchen\\a.dll", "process_name": "thing.exe"}"#);
		fs::write(&path, raw).expect("write");

		let cfg = LoaderConfig::load(&path).expect("load");
		assert_eq!(cfg.process_name, "thing.exe");
		assert_eq!(cfg.dll_path, "C:\\Spiele\\M\u{fffd}nchen\\a.dll");
	}

	#[test]
	fn reads_all_keys() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join(CONFIG_FILE_NAME);
		fs::write(
			&path,
			r#"{
				"dll_path": "mods\\hook.dll",
				"game_path": "C:\\Games\\Thing\\thing.exe",
				"process_name": "thing.exe",
				"show_console": true,
				"entry_point": "LoadLibraryA",
				"poll_interval_ms": 250,
				"find_timeout_secs": 30,
				"wait_for_loader": false
			}"#,
		)
		.expect("write");

		let cfg = LoaderConfig::load(&path).expect("load");
		assert_eq!(cfg.dll_path, r"mods\hook.dll");
		assert_eq!(cfg.game_path, r"C:\Games\Thing\thing.exe");
		assert_eq!(cfg.process_name, "thing.exe");
		assert!(cfg.show_console);
		assert_eq!(cfg.entry_point, EntryPoint::LoadLibraryA);
		assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
		assert_eq!(cfg.find_timeout(), Some(Duration::from_secs(30)));
		assert!(!cfg.wait_for_loader);
	}

	#[test]
	fn wrong_types_keep_defaults() {
		let cfg =
			LoaderConfig::from_json(r#"{"dll_path": 5, "show_console": "yes", "process_name": "x.exe"}"#)
				.expect("parse");
		let defaults = LoaderConfig::default();
		assert_eq!(cfg.dll_path, defaults.dll_path);
		assert_eq!(cfg.show_console, defaults.show_console);
		assert_eq!(cfg.process_name, "x.exe");
	}

	#[test]
	fn unknown_entry_point_is_ignored() {
		let cfg = LoaderConfig::from_json(r#"{"entry_point": "LdrLoadDll"}"#).expect("parse");
		assert_eq!(cfg.entry_point, EntryPoint::LoadLibraryW);
	}

	#[test]
	fn non_object_is_rejected() {
		assert!(matches!(LoaderConfig::from_json("[1, 2]"), Err(Error::Config(_))));
	}

	#[test]
	fn validate_rejects_empty_names() {
		let mut cfg = LoaderConfig {
			process_name: String::new(),
			..LoaderConfig::default()
		};
		assert!(cfg.validate().is_err());

		let mut cfg = LoaderConfig {
			game_path: String::new(),
			..LoaderConfig::default()
		};
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn validate_clamps_zero_interval() {
		let mut cfg = LoaderConfig {
			poll_interval_ms: 0,
			..LoaderConfig::default()
		};
		cfg.validate().expect("valid");
		assert_eq!(cfg.poll_interval_ms, 1);
	}

	#[test]
	fn wide_path_is_nul_terminated() {
		let buf = EntryPoint::LoadLibraryW.encode_path("a");
		assert_eq!(buf, vec![b'a', 0, 0, 0]);
		let buf = EntryPoint::LoadLibraryA.encode_path("ab");
		assert_eq!(buf, b"ab\0".to_vec());
	}

	#[test]
	fn config_sits_next_to_exe() {
		assert_eq!(config_path(r"C:\Games"), r"C:\Games\loader_config.json");
	}
}
