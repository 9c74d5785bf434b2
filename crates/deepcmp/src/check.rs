//! Equality assertions for tests.
//!
//! [`check_equal`] turns a non-empty diff into a [`DeepCmpError::NotEqual`];
//! [`assert_deep_eq!`](crate::assert_deep_eq) panics with the verbose diff.

use crate::compare::{default_comparator, Comparator};
use crate::errors::{DeepCmpError, Result};
use crate::logging_facility::schema::OP_CHECK_EQUAL;
use crate::value::Reflect;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Checks that two values are deeply equal using the default comparator.
///
/// # Errors
///
/// Returns [`DeepCmpError::NotEqual`] carrying the differences.
pub fn check_equal(v1: &dyn Reflect, v2: &dyn Reflect) -> Result<()> {
    check_equal_with(default_comparator(), v1, v2)
}

/// Checks that two values are deeply equal using `comparator`.
///
/// # Errors
///
/// Returns [`DeepCmpError::NotEqual`] carrying the differences.
pub fn check_equal_with(comparator: &Comparator, v1: &dyn Reflect, v2: &dyn Reflect) -> Result<()> {
    let start = Instant::now();
    log_op_start!(OP_CHECK_EQUAL);

    let diff = comparator.compare(v1, v2);
    let duration_ms = start.elapsed().as_millis() as u64;
    if diff.is_empty() {
        log_op_end!(OP_CHECK_EQUAL, duration_ms = duration_ms);
        return Ok(());
    }

    let differences = diff.len();
    let err = DeepCmpError::NotEqual { diff };
    log_op_error!(OP_CHECK_EQUAL, err, duration_ms = duration_ms, differences = differences);
    Err(err)
}

/// Asserts that two values are deeply equal.
///
/// On failure, panics with every difference in verbose form. An optional
/// trailing format string adds context.
///
/// ```
/// use deepcmp::assert_deep_eq;
///
/// assert_deep_eq!(vec![1, 2], vec![1, 2]);
/// assert_deep_eq!((1, "a"), (1, "a"), "tuples should match");
/// ```
///
/// ```should_panic
/// use deepcmp::assert_deep_eq;
///
/// assert_deep_eq!(vec![1, 2], vec![1, 3]);
/// ```
#[macro_export]
macro_rules! assert_deep_eq {
    ($left:expr, $right:expr $(,)?) => {{
        let diff = $crate::compare(&$left, &$right);
        if !diff.is_empty() {
            panic!("assertion failed: values are not deeply equal\n{:#}", diff);
        }
    }};
    ($left:expr, $right:expr, $($arg:tt)+) => {{
        let diff = $crate::compare(&$left, &$right);
        if !diff.is_empty() {
            panic!(
                "assertion failed: values are not deeply equal: {}\n{:#}",
                format_args!($($arg)+),
                diff
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_check_equal_ok() {
        assert!(check_equal(&vec!["a", "b"], &vec!["a", "b"]).is_ok());
    }

    #[test]
    fn test_check_equal_reports_diff() {
        let err = check_equal(&vec![1, 2], &vec![1, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotEqual);
        assert_eq!(err.diff().map(|d| d.to_string()), Some("[1]: int not equal".to_string()));
    }

    #[test]
    fn test_check_equal_with_custom_limits() {
        let comparator = Comparator {
            slice_max_differences: 1,
            ..Comparator::new()
        };
        let err = check_equal_with(&comparator, &vec![0, 0, 0], &vec![1, 1, 1]).unwrap_err();
        assert_eq!(err.diff().map(|d| d.len()), Some(1));
    }

    #[test]
    #[should_panic(expected = "[2]: int not equal")]
    fn test_assert_deep_eq_panics_with_diff() {
        assert_deep_eq!([1, 2, 3], [1, 2, 4]);
    }
}
