use std::process::ExitStatus;

/// Reported when a status carries neither an exit code nor a signal.
const UNKNOWN_EXIT: i32 = 1;

/// Exit code reported for a finished child.
///
/// A child killed by signal `N` reports `-N`, so `kill -9` surfaces as `-9`
/// in `X-ReturnCode`.
pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| terminating_signal(status).map(|sig| -sig))
        .unwrap_or(UNKNOWN_EXIT)
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}
