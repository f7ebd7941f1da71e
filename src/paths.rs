//! Windows path handling done on plain strings, so relative config entries
//! resolve the same way regardless of the current directory.

use std::env;

pub fn is_absolute(path: &str) -> bool {
	let bytes = path.as_bytes();
	if bytes.len() < 2 {
		return false;
	}
	(bytes[0].is_ascii_alphabetic() && bytes[1] == b':') || path.starts_with(r"\\")
}

pub fn join(base: &str, rel: &str) -> String {
	if base.is_empty() {
		return rel.into();
	}
	if rel.is_empty() {
		return base.into();
	}
	let mut out = String::from(base);
	if !out.ends_with(['\\', '/']) {
		out.push('\\');
	}
	let rel = rel
		.strip_prefix(r".\")
		.or_else(|| rel.strip_prefix("./"))
		.unwrap_or(rel);
	out.push_str(rel);
	out
}

pub fn resolve(base_dir: &str, path: &str) -> String {
	match is_absolute(path) {
		true => path.into(),
		false => join(base_dir, path),
	}
}

/// Directory holding the running executable.
pub fn exe_dir() -> String {
	env::current_exe()
		.ok()
		.and_then(|p| p.parent().map(|d| d.to_string_lossy().into_owned()))
		.filter(|d| !d.is_empty())
		.unwrap_or_else(|| ".".into())
}

/// Compares the final component of `candidate` against `wanted`, ignoring case
/// (including non-ASCII letters, as Windows file names do).
pub fn exe_name_matches(candidate: &str, wanted: &str) -> bool {
	let file = candidate.rsplit(['\\', '/']).next().unwrap_or(candidate);
	file.to_lowercase() == wanted.to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absolute_forms() {
		assert!(is_absolute(r"C:\Games\game.exe"));
		assert!(is_absolute("d:relative-to-drive"));
		assert!(is_absolute(r"\\server\share\x.dll"));
		assert!(!is_absolute(r".\Game.exe"));
		assert!(!is_absolute(r"\rooted"));
		assert!(!is_absolute("C"));
		assert!(!is_absolute(""));
	}

	#[test]
	fn join_inserts_separator() {
		assert_eq!(join(r"C:\dir", "a.dll"), r"C:\dir\a.dll");
		assert_eq!(join(r"C:\dir\", "a.dll"), r"C:\dir\a.dll");
		assert_eq!(join("C:/dir/", "a.dll"), "C:/dir/a.dll");
	}

	#[test]
	fn join_strips_one_dot_prefix() {
		assert_eq!(join(r"C:\dir", r".\a.dll"), r"C:\dir\a.dll");
		assert_eq!(join(r"C:\dir", "./a.dll"), r"C:\dir\a.dll");
		assert_eq!(join(r"C:\dir", r".\.\a.dll"), r"C:\dir\.\a.dll");
		assert_eq!(join(r"C:\dir", r"..\a.dll"), r"C:\dir\..\a.dll");
	}

	#[test]
	fn join_empty_sides() {
		assert_eq!(join("", "a.dll"), "a.dll");
		assert_eq!(join(r"C:\dir", ""), r"C:\dir");
	}

	#[test]
	fn resolve_keeps_absolute() {
		assert_eq!(resolve(r"C:\dir", r"D:\other\b.dll"), r"D:\other\b.dll");
		assert_eq!(resolve(r"C:\dir", r".\Game.exe"), r"C:\dir\Game.exe");
	}

	#[test]
	fn name_match_ignores_case_and_dirs() {
		assert!(exe_name_matches("GAME.EXE", "Game.exe"));
		assert!(exe_name_matches(r"C:\x\game.exe", "Game.exe"));
		assert!(!exe_name_matches("Game.exe.bak", "Game.exe"));
		assert!(!exe_name_matches("MyGame.exe", "Game.exe"));
	}

	#[test]
	fn name_match_folds_non_ascii() {
		assert!(exe_name_matches("SPIELÄ.EXE", "spielä.exe"));
		assert!(!exe_name_matches("spiela.exe", "spielä.exe"));
	}

	#[test]
	fn exe_dir_is_not_empty() {
		assert!(!exe_dir().is_empty());
	}
}
