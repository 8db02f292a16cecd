use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::DiscoveryError;

/// File name of the Swift Package Manager lockfile.
const LOCKFILE_NAME: &str = "Package.resolved";

/// `Package.resolved`, either the v1 layout (pins nested under `object`)
/// or the v2/v3 layout (top-level `pins`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageResolved {
    V1 { object: ObjectV1 },
    V2 { pins: Vec<PinV2> },
}

#[derive(Debug, Deserialize)]
struct ObjectV1 {
    pins: Vec<PinV1>,
}

#[derive(Debug, Deserialize)]
struct PinV1 {
    package: String,
    #[serde(rename = "repositoryURL")]
    repository_url: String,
}

#[derive(Debug, Deserialize)]
struct PinV2 {
    identity: String,
    location: String,
}

impl PackageResolved {
    /// `(declared name, repository url)` for every pin.
    fn pins(&self) -> Vec<(&str, &str)> {
        match self {
            PackageResolved::V1 { object } => object
                .pins
                .iter()
                .map(|p| (p.package.as_str(), p.repository_url.as_str()))
                .collect(),
            PackageResolved::V2 { pins } => pins
                .iter()
                .map(|p| (p.identity.as_str(), p.location.as_str()))
                .collect(),
        }
    }
}

pub fn is_lockfile(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(LOCKFILE_NAME)
}

/// Read a lockfile into the set of lowercase names its packages may appear under.
///
/// Each pin contributes its declared name and the last segment of its
/// repository URL without extension (`.../Alamofire.git` → `alamofire`).
pub fn resolve(path: &Path) -> Result<HashSet<String>, DiscoveryError> {
    let unreadable = |reason: String| DiscoveryError::UnreadableLockfile {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    let resolved: PackageResolved =
        serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;

    let names = resolved
        .pins()
        .into_iter()
        .flat_map(|(package, url)| [package.to_lowercase(), url_stem(url).to_lowercase()])
        .collect();

    Ok(names)
}

/// Last path segment of a repository URL with any extension removed.
fn url_stem(url: &str) -> &str {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url);
    match segment.rfind('.') {
        Some(i) if i > 0 => &segment[..i],
        _ => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_lockfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", content).unwrap();
        f
    }

    #[test]
    fn test_resolve_v1() {
        let f = write_lockfile(
            r#"{
  "object": {
    "pins": [
      {
        "package": "Alamofire",
        "repositoryURL": "https://github.com/Alamofire/Alamofire.git",
        "state": { "branch": null, "revision": "abc", "version": "5.6.1" }
      },
      {
        "package": "SwiftLog",
        "repositoryURL": "https://github.com/apple/swift-log.git",
        "state": { "branch": null, "revision": "def", "version": "1.4.2" }
      }
    ]
  },
  "version": 1
}"#,
        );
        let names = resolve(f.path()).unwrap();
        assert_eq!(names.len(), 3);
        assert!(names.contains("alamofire"));
        assert!(names.contains("swiftlog"));
        assert!(names.contains("swift-log"));
    }

    #[test]
    fn test_resolve_v2() {
        let f = write_lockfile(
            r#"{
  "pins": [
    {
      "identity": "kingfisher",
      "kind": "remoteSourceControl",
      "location": "https://github.com/onevcat/Kingfisher",
      "state": { "revision": "abc", "version": "7.0.0" }
    }
  ],
  "version": 2
}"#,
        );
        let names = resolve(f.path()).unwrap();
        assert_eq!(names.len(), 1);
        assert!(names.contains("kingfisher"));
    }

    #[test]
    fn test_malformed_is_error() {
        let f = write_lockfile("{ \"object\": { \"pins\": [ { \"package\": 1 } ] } }");
        let err = resolve(f.path()).unwrap_err();
        assert!(matches!(err, DiscoveryError::UnreadableLockfile { .. }));

        let err = resolve(Path::new("/nonexistent/Package.resolved")).unwrap_err();
        assert!(matches!(err, DiscoveryError::UnreadableLockfile { .. }));
    }

    #[test]
    fn test_url_stem() {
        assert_eq!(url_stem("https://github.com/Alamofire/Alamofire.git"), "Alamofire");
        assert_eq!(url_stem("https://github.com/onevcat/Kingfisher/"), "Kingfisher");
        assert_eq!(url_stem("git@github.com:apple/swift-nio.git"), "swift-nio");
        assert_eq!(url_stem("local-package"), "local-package");
    }

    #[test]
    fn test_is_lockfile() {
        assert!(is_lockfile(Path::new("/project/Package.resolved")));
        assert!(!is_lockfile(Path::new("/project/Package.swift")));
    }
}
