use nix::sys::signal::kill;
use nix::unistd::Pid;

/// A PID counts as alive when a signal-0 probe succeeds and the process is
/// not a zombie.
pub fn is_process_alive(pid: u32) -> bool {
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    if raw <= 0 {
        return false;
    }
    // Signal `None` (0) only checks that the process exists.
    if kill(Pid::from_raw(raw), None).is_err() {
        return false;
    }
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => !is_zombie_stat(&stat),
        // No procfs: trust the signal probe.
        Err(_) => true,
    }
}

/// Parse the state field of `/proc/<pid>/stat`.
///
/// The command name is parenthesised and may itself contain `)`, so the state
/// is the first field after the last `)`.
pub fn is_zombie_stat(stat: &str) -> bool {
    let Some(close) = stat.rfind(')') else {
        return false;
    };
    matches!(
        stat[close + 1..].split_whitespace().next(),
        Some("Z") | Some("X")
    )
}
