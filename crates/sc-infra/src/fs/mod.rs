mod atomic;
mod state_dir;

pub use atomic::{atomic_write, tmp_path_for};
pub use state_dir::{is_dir_writable, resolve_marker_path, resolve_state_dir};
