// CLASSIFICATION: COMMUNITY
// Filename: fatal.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Process boundary for fatal bring-up failures.
//!
//! Library code returns [`BringUpError`]; only the outermost caller
//! converts it into termination. No unwinding happens here: the
//! co-processor is already partially loaded and nothing can be undone.

use log::error;

use crate::error::BringUpError;

/// Log `err` and abort the process.
pub fn terminate(err: &BringUpError) -> ! {
    error!("[iop] fatal: {err}");
    log::logger().flush();
    std::process::abort()
}

/// Abort with `message` unless `condition` holds.
pub fn fatal_assert(condition: bool, message: &str) {
    if !condition {
        error!("[iop] assertion failed: {message}");
        log::logger().flush();
        std::process::abort();
    }
}

/// Unwrap a bring-up result or terminate.
pub fn or_terminate<T>(result: Result<T, BringUpError>) -> T {
    match result {
        Ok(v) => v,
        Err(err) => terminate(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_assert_returns() {
        fatal_assert(true, "unreachable");
        assert_eq!(or_terminate::<u8>(Ok(3)), 3);
    }
}
