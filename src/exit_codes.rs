//! Exit code constants for the siteconf CLI.
//!
//! - 0: Success
//! - 1: User error (unreadable file, malformed document, bad arguments)
//! - 2: Validation failure (the document parsed but breaks a config rule)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unreadable file, unparsable document, or bad arguments.
pub const USER_ERROR: i32 = 1;

/// Validation failure: URL, locale, strategy, module or prerender rule violated.
pub const VALIDATION_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
    }
}
