pub mod config;
pub mod error;
#[cfg(windows)]
pub mod inject;
pub mod launch;
pub mod logger;
pub mod paths;
pub mod poll;
#[cfg(windows)]
pub mod windows_wrapper;

pub use crate::{
	config::{EntryPoint, LoaderConfig},
	error::{Error, Result},
	launch::{run, Outcome},
};
