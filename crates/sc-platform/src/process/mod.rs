mod control;
mod probe;

pub use control::UnixProcessControl;
pub use probe::{is_process_alive, is_zombie_stat};
