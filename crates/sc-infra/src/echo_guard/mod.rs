mod file_guard;

pub use file_guard::FileSelfEchoGuard;
