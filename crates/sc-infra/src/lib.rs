pub mod daemon;
pub mod echo_guard;
pub mod fs;
pub mod history;
pub mod time;

pub use daemon::FilePidStore;
pub use echo_guard::FileSelfEchoGuard;
pub use history::FileHistoryStore;
pub use time::SystemClock;
