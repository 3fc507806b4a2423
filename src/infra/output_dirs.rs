use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A slash-separated directory glob such as `**/client`.
///
/// `**` spans any number of path components (including none), `*` and `?`
/// work inside a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirPattern {
    segments: Vec<String>,
}

impl DirPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let segments: Vec<String> = pattern
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            bail!("empty directory pattern '{pattern}'");
        }
        if segments.iter().all(|s| s == "**") {
            bail!("directory pattern '{pattern}' would match every directory");
        }

        Ok(Self { segments })
    }

    /// `relative` is a path relative to the search root
    pub fn matches(&self, relative: &Path) -> bool {
        let components: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let components: Vec<&str> = components.iter().map(String::as_str).collect();

        match_segments(&self.segments, &components)
    }
}

fn match_segments(pattern: &[String], components: &[&str]) -> bool {
    match pattern.split_first() {
        None => components.is_empty(),
        Some((first, rest)) if first == "**" => {
            (0..=components.len()).any(|skip| match_segments(rest, &components[skip..]))
        }
        Some((first, rest)) => match components.split_first() {
            Some((component, remaining)) => {
                let pattern: Vec<char> = first.chars().collect();
                let text: Vec<char> = component.chars().collect();
                wildcard(&pattern, &text) && match_segments(rest, remaining)
            }
            None => false,
        },
    }
}

fn wildcard(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((&'*', rest)) => (0..=text.len()).any(|skip| wildcard(rest, &text[skip..])),
        Some((&'?', rest)) => !text.is_empty() && wildcard(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && wildcard(rest, &text[1..]),
    }
}

/// Directories under `root` matching `pattern`, outermost first.
///
/// A matching directory is not descended into, so nested matches are
/// reported once through their outermost ancestor.
pub fn find_matching_dirs(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = DirPattern::parse(pattern)?;
    let mut found = Vec::new();

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("walking {:?}", root))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let is_match = entry
            .path()
            .strip_prefix(root)
            .map(|rel| pattern.matches(rel))
            .unwrap_or(false);

        if is_match {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn double_star_matches_any_depth() {
        let pattern = DirPattern::parse("**/client").unwrap();
        assert!(pattern.matches(Path::new("client")));
        assert!(pattern.matches(Path::new("a/client")));
        assert!(pattern.matches(Path::new("b/x/client")));
        assert!(!pattern.matches(Path::new("a/client/src")));
        assert!(!pattern.matches(Path::new("clients")));
    }

    #[test]
    fn single_star_stays_in_one_component() {
        let pattern = DirPattern::parse("*/gen-*").unwrap();
        assert!(pattern.matches(Path::new("a/gen-csharp")));
        assert!(!pattern.matches(Path::new("a/b/gen-csharp")));
        assert!(!pattern.matches(Path::new("gen-csharp")));
    }

    #[test]
    fn question_mark_matches_one_char() {
        let pattern = DirPattern::parse("v?").unwrap();
        assert!(pattern.matches(Path::new("v1")));
        assert!(!pattern.matches(Path::new("v10")));
    }

    #[test]
    fn rejects_degenerate_patterns() {
        assert!(DirPattern::parse("").is_err());
        assert!(DirPattern::parse("/").is_err());
        assert!(DirPattern::parse("**").is_err());
    }

    #[test]
    fn finds_outermost_matches_only() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/client/client")).unwrap();
        fs::create_dir_all(root.join("b/x/client")).unwrap();
        fs::create_dir_all(root.join("c")).unwrap();
        fs::write(root.join("c/client"), "a file, not a dir").unwrap();

        let found = find_matching_dirs(root, "**/client").unwrap();
        assert_eq!(found, vec![root.join("a/client"), root.join("b/x/client")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let result = find_matching_dirs(&temp.path().join("nope"), "**/client");
        assert!(result.is_err());
    }
}
