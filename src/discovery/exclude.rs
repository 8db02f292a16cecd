use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled exclusion patterns.
///
/// `*` stays within one path component, `**` crosses components. Patterns are
/// tested against both the path relative to the scan root and the absolute path.
#[derive(Debug, Clone)]
pub struct Exclusions {
    set: GlobSet,
}

impl Exclusions {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = normalize(pattern.as_ref());
            if pattern.is_empty() {
                continue;
            }
            builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    pub fn none() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    pub fn is_excluded(&self, relative: &Path, absolute: &Path) -> bool {
        !self.set.is_empty() && (self.set.is_match(relative) || self.set.is_match(absolute))
    }
}

fn normalize(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    if pattern.len() > 1 {
        pattern.trim_end_matches('/')
    } else {
        pattern
    }
}
