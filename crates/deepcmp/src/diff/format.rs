//! Human-readable rendering.
//!
//! `{}` prints one `path: message` line per difference. The alternate form
//! `{:#}` also prints the two values on tab-indented lines.

use super::model::{Diff, Difference};
use std::fmt;

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if f.alternate() && (!self.v1.is_empty() || !self.v2.is_empty()) {
            write!(f, "\n\tv1={}\n\tv2={}", self.v1, self.v2)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<none>");
        }
        for (i, difference) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            if f.alternate() {
                write!(f, "{difference:#}")?;
            } else {
                write!(f, "{difference}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::diff::{messages, Diff, Difference};
    use crate::path::{Path, PathElem};

    fn at(elems: Vec<PathElem>, d: Difference) -> Difference {
        d.with_path(elems.into_iter().collect::<Path>())
    }

    #[test]
    fn test_empty_diff_renders_none() {
        assert_eq!(Diff::new().to_string(), "<none>");
        assert_eq!(format!("{:#}", Diff::new()), "<none>");
    }

    #[test]
    fn test_verbose_rendering() {
        let diff: Diff = vec![
            at(
                vec![PathElem::Field("String".into())],
                Difference::new(messages::STRING_NOT_EQUAL, "\"aaa\"", "\"bbb\""),
            ),
            at(
                vec![PathElem::Map("c".into())],
                Difference::new(messages::MAP_KEY_NOT_DEFINED, "true", "false"),
            ),
        ]
        .into();
        assert_eq!(
            diff.to_string(),
            ".String: string not equal\n[c]: map key not defined"
        );
        assert_eq!(
            format!("{diff:#}"),
            ".String: string not equal\n\tv1=\"aaa\"\n\tv2=\"bbb\"\n[c]: map key not defined\n\tv1=true\n\tv2=false"
        );
    }

    #[test]
    fn test_verbose_omits_empty_values() {
        let d = Difference::new(messages::TYPE_NOT_EQUAL, "", "");
        assert_eq!(format!("{d:#}"), ".: type not equal");
    }
}
