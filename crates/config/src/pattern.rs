use glob::{MatchOptions, Pattern, PatternError};
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};

/// Newtype for [glob::Pattern] so we can define ser/de for it. Used to exclude
/// files and directories from the documentation source tree.
#[derive(
    Clone,
    Debug,
    derive_more::Display,
    derive_more::Deref,
    Serialize,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
)]
#[serde(try_from = "String", into = "String")]
pub struct ExcludePattern(Pattern);

/// `*` and `?` stay within one path component; only `**` crosses directories
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl ExcludePattern {
    /// Does this pattern exclude the given path? The path should be relative
    /// to the documentation directory. A path is excluded if the pattern
    /// matches the path itself or any of its ancestor directories, so
    /// excluding a directory excludes everything below it.
    pub fn excludes(&self, relative: &Path) -> bool {
        relative
            .ancestors()
            // The last ancestor of a relative path is the empty path
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| {
                self.0.matches_path_with(ancestor, MATCH_OPTIONS)
            })
    }
}

impl From<ExcludePattern> for String {
    fn from(value: ExcludePattern) -> Self {
        value.to_string()
    }
}

impl FromStr for ExcludePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl TryFrom<String> for ExcludePattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_test::{Token, assert_de_tokens, assert_de_tokens_error};

    #[rstest]
    #[case::exact("_build", "_build", true)]
    #[case::ancestor("_build", "_build/source/index.rst", true)]
    #[case::file("Thumbs.db", "Thumbs.db", true)]
    #[case::nested_file_not_anchored("Thumbs.db", "images/Thumbs.db", false)]
    #[case::wildcard("**/.DS_Store", "images/.DS_Store", true)]
    #[case::extension("drafts/*.rst", "drafts/unfinished.rst", true)]
    #[case::star_one_level("drafts/*.rst", "drafts/a/b.rst", false)]
    #[case::star_dir("drafts/*", "drafts/a/b.rst", true)]
    #[case::recursive("drafts/**/*.rst", "drafts/a/b.rst", true)]
    #[case::sibling("_build", "_builder/index.rst", false)]
    #[case::no_match("_build", "index.rst", false)]
    fn test_excludes(
        #[case] pattern: &str,
        #[case] path: &str,
        #[case] expected: bool,
    ) {
        let pattern: ExcludePattern = pattern.parse().unwrap();
        assert_eq!(pattern.excludes(Path::new(path)), expected);
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(
            &"_build".parse::<ExcludePattern>().unwrap(),
            &[Token::Str("_build")],
        );
        assert_de_tokens_error::<ExcludePattern>(
            &[Token::Str("***")],
            "Pattern syntax error near position 2: \
                wildcards are either regular `*` or recursive `**`",
        );
    }
}
