// src/exit.rs
//! Standardized process exit codes for `demandboard`.
//!
//! Provides a stable contract for the scheduler that runs the collector.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum BoardExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Command-line input could not be used (unknown sort key, missing token).
    InvalidInput = 2,
    /// Collection aborted; the previously published snapshot is untouched.
    CollectAborted = 3,
    /// The snapshot could not be loaded for viewing.
    LoadFailed = 4,
}

impl BoardExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for BoardExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            BoardExit::Success,
            BoardExit::Error,
            BoardExit::InvalidInput,
            BoardExit::CollectAborted,
            BoardExit::LoadFailed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
