mod pid_file;

pub use pid_file::FilePidStore;
