//! Match a literal or single-wildcard version spec against a version index.

use crate::error::{CatalogError, Result};

use super::{sorted_versions, ResolvedVersion, VersionIndex};

/// Wildcard character accepted in version specs.
pub const GLOB: char = '*';

/// Resolves `spec` to one entry of `index`.
///
/// - no wildcard: exact lookup, `InvalidVersion` if absent;
/// - one wildcard: the highest key (reverse string order) starting with the
///   text before the wildcard, `NoMatchingVersions` if none;
/// - more than one wildcard: `MultipleVersionGlob`.
pub fn resolve(index: &VersionIndex, spec: &str) -> Result<ResolvedVersion> {
    let key = if spec.contains(GLOB) {
        resolve_glob(index, spec)?
    } else {
        spec.to_string()
    };
    let record = index.get(&key).ok_or(CatalogError::InvalidVersion)?;
    Ok(ResolvedVersion {
        code: record.code.clone(),
        major_version: record.major_version.clone(),
        version: key,
    })
}

/// Glob-only entry point: returns the matching display version.
///
/// Fails `NoVersionGlob` when `glob` has no wildcard at all.
pub fn resolve_glob(index: &VersionIndex, glob: &str) -> Result<String> {
    match glob.matches(GLOB).count() {
        0 => return Err(CatalogError::NoVersionGlob),
        1 => {}
        _ => return Err(CatalogError::MultipleVersionGlob),
    }
    let prefix = glob.split(GLOB).next().unwrap_or_default();
    sorted_versions(index)
        .into_iter()
        .find(|key| key.starts_with(prefix))
        .ok_or(CatalogError::NoMatchingVersions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionRecord;

    fn index(keys: &[&str]) -> VersionIndex {
        keys.iter()
            .map(|k| {
                (
                    k.to_string(),
                    VersionRecord {
                        code: format!("CODE-{k}"),
                        name: k.to_string(),
                        major_version: format!("{}_x", &k[..k.find('.').unwrap_or(k.len())]),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn literal_returns_key_unchanged() {
        let idx = index(&["10.2.1", "10.2.5", "11.1.1"]);
        let r = resolve(&idx, "10.2.1").unwrap();
        assert_eq!(r.version, "10.2.1");
        assert_eq!(r.code, "CODE-10.2.1");
        assert_eq!(r.major_version, "10_x");
    }

    #[test]
    fn literal_missing_is_invalid_version() {
        let idx = index(&["10.2.1"]);
        assert!(matches!(resolve(&idx, "666"), Err(CatalogError::InvalidVersion)));
    }

    #[test]
    fn bare_glob_returns_lexicographic_maximum() {
        let idx = index(&["10.2.1", "11.1.1", "9.4.0"]);
        // "9.4.0" > "11.1.1" in string order.
        assert_eq!(resolve(&idx, "*").unwrap().version, "9.4.0");
    }

    #[test]
    fn prefix_glob_returns_highest_match() {
        let idx = index(&["10.2.0", "10.2.5", "10.3.0", "11.1.1"]);
        let r = resolve(&idx, "10.2.*").unwrap();
        assert_eq!(r.version, "10.2.5");
        assert_eq!(r.code, "CODE-10.2.5");
    }

    #[test]
    fn prefix_glob_without_match() {
        let idx = index(&["10.2.0"]);
        assert!(matches!(
            resolve(&idx, "12.*"),
            Err(CatalogError::NoMatchingVersions)
        ));
    }

    #[test]
    fn bare_glob_on_empty_index() {
        let idx = VersionIndex::new();
        assert!(matches!(resolve(&idx, "*"), Err(CatalogError::NoMatchingVersions)));
    }

    #[test]
    fn multiple_globs_rejected_regardless_of_contents() {
        let idx = index(&["10.2.0", "10.2.5"]);
        for spec in ["10.*.*", "**", "*.2.*"] {
            assert!(matches!(resolve(&idx, spec), Err(CatalogError::MultipleVersionGlob)));
        }
        assert!(matches!(
            resolve(&VersionIndex::new(), "1*2*"),
            Err(CatalogError::MultipleVersionGlob)
        ));
    }

    #[test]
    fn glob_entry_point_requires_wildcard() {
        let idx = index(&["10.2.0"]);
        assert!(matches!(resolve_glob(&idx, "10.2.0"), Err(CatalogError::NoVersionGlob)));
        assert_eq!(resolve_glob(&idx, "10*").unwrap(), "10.2.0");
    }

    #[test]
    fn text_after_wildcard_is_ignored() {
        let idx = index(&["8.0.2", "8.0.3"]);
        assert_eq!(resolve(&idx, "8.0*LE").unwrap().version, "8.0.3");
    }
}
