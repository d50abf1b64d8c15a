//! Exit code constants for the antrun CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config or project file)
//! - 2: Build failure (missing gantfile, unknown target, failed task)
//! - 3: Runner failure (process could not start, output could not be read, timeout)
//! - 4: Verification failure (transcript or exit code differs from the expectation)
//!
//! `antrun run` is the exception: when the child process completes, antrun
//! exits with the child's own exit code.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or unreadable project file.
pub const USER_ERROR: i32 = 1;

/// Build failure: a target or one of its tasks failed.
pub const BUILD_FAILURE: i32 = 2;

/// Runner failure: the external process could not be supervised to completion.
pub const RUNNER_FAILURE: i32 = 3;

/// Verification failure: `run --expect`/`--expect-exit` did not match.
pub const VERIFICATION_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            BUILD_FAILURE,
            RUNNER_FAILURE,
            VERIFICATION_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_have_expected_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(BUILD_FAILURE, 2);
        assert_eq!(RUNNER_FAILURE, 3);
        assert_eq!(VERIFICATION_FAILURE, 4);
    }
}
