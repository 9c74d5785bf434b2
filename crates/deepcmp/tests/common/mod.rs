use deepcmp::{Diff, Difference, Reflect};

/// Render each difference as `path|message|v1|v2` for compact assertions
#[allow(dead_code)]
pub fn rows(diff: &Diff) -> Vec<String> {
    diff.iter().map(row).collect()
}

/// Render one difference as `path|message|v1|v2`
#[allow(dead_code)]
pub fn row(d: &Difference) -> String {
    format!("{}|{}|{}|{}", d.path, d.message, d.v1, d.v2)
}

/// Rendered paths of every difference, in report order
#[allow(dead_code)]
pub fn paths(diff: &Diff) -> Vec<String> {
    diff.iter().map(|d| d.path.to_string()).collect()
}

/// Assert that a diff holds exactly one difference with the given parts
#[allow(dead_code)]
pub fn assert_single(diff: &Diff, path: &str, message: &str, v1: &str, v2: &str) {
    assert_eq!(diff.len(), 1, "expected one difference, got:\n{diff:#}");
    assert_eq!(row(&diff[0]), format!("{path}|{message}|{v1}|{v2}"));
}

/// Box a value as a dynamically typed reflect value
#[allow(dead_code)]
pub fn boxed<T: Reflect>(value: T) -> Box<dyn Reflect> {
    Box::new(value)
}
