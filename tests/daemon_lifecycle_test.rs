//! DaemonLifecycle against the real PID file and process control, with
//! `sleep` standing in for `stashclip daemon run`.

use std::sync::Arc;
use std::time::Duration;

use sc_app::{DaemonLifecycle, DaemonStatus, DaemonTimings, LifecycleError, StartOutcome};
use sc_infra::FilePidStore;
use sc_platform::UnixProcessControl;
use tempfile::TempDir;

fn lifecycle(state_dir: &TempDir, program: &str, args: &[&str]) -> DaemonLifecycle {
    DaemonLifecycle::new(
        Arc::new(UnixProcessControl::new(program, args.iter().copied())),
        Arc::new(FilePidStore::in_dir(state_dir.path())),
        DaemonTimings {
            start_grace: Duration::from_millis(200),
            stop_timeout: Duration::from_secs(3),
            kill_timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(20),
        },
    )
}

#[tokio::test]
async fn start_status_stop_round_trip() {
    let dir = TempDir::new().unwrap();
    let daemon = lifecycle(&dir, "sleep", &["30"]);

    let pid = match daemon.start().await.unwrap() {
        StartOutcome::Started { pid } => pid,
        other => panic!("unexpected start outcome: {other:?}"),
    };
    assert_eq!(daemon.status().unwrap(), DaemonStatus::Running { pid });
    let recorded = std::fs::read_to_string(dir.path().join("daemon.pid")).unwrap();
    assert_eq!(recorded.trim(), pid.to_string());

    assert_eq!(
        daemon.start().await.unwrap(),
        StartOutcome::AlreadyRunning { pid }
    );

    assert_eq!(daemon.stop().await.unwrap(), pid);
    assert_eq!(daemon.status().unwrap(), DaemonStatus::NotRunning);
    assert!(!dir.path().join("daemon.pid").exists());

    assert!(matches!(
        daemon.stop().await,
        Err(LifecycleError::NotRunning)
    ));
}

#[tokio::test]
async fn daemon_that_exits_immediately_fails_to_start() {
    let dir = TempDir::new().unwrap();
    let daemon = lifecycle(&dir, "sh", &["-c", "echo cannot start >&2; exit 1"]);

    let err = daemon.start().await.unwrap_err();

    assert!(matches!(err, LifecycleError::FailedToStayRunning { .. }));
    assert_eq!(daemon.status().unwrap(), DaemonStatus::NotRunning);
    let log = std::fs::read_to_string(dir.path().join("daemon.log")).unwrap();
    assert!(log.contains("cannot start"));
}
