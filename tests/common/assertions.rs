//! Custom assertion macros
//!
//! Assertions over `(StatusCode, serde_json::Value)` responses with
//! messages that include the response body.

/// Assert a response status, printing the body on failure
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {{
        let (status, body) = &$response;
        assert_eq!(*status, $status, "unexpected status, body: {}", body);
    }};
}

/// Assert an error response: status plus the uniform `{error, status}` envelope
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr) => {{
        let (status, body) = &$response;
        assert_eq!(*status, $status, "unexpected status, body: {}", body);
        assert!(body["error"].is_string(), "missing error message: {}", body);
        assert_eq!(body["status"], $status.as_u16(), "envelope status mismatch: {}", body);
    }};
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{:?}' to contain '{:?}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that two values are approximately equal (for floating point)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {
        let diff: f64 = ($left - $right).abs();
        assert!(
            diff < $epsilon,
            "Values are not approximately equal: {} vs {} (diff: {})",
            $left,
            $right,
            diff
        );
    };
}
