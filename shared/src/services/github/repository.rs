use crate::utils::error::AppError;
use regex_lite::Regex;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Accepts any URL containing `github.com/<owner>/<name>`, ignoring trailing path
    /// segments, query strings, anchors and a `.git` suffix.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let re =
            Regex::new(r"(?i)github\.com/([^/?#]+)/([^/?#]+)([/?#]|$)").expect("Valid regex");

        let invalid = || AppError::InvalidInput("Invalid repository URL".to_string());

        let caps = re.captures(url).ok_or_else(invalid)?;

        let owner = caps[1].to_string();
        let name = caps[2].strip_suffix(".git").unwrap_or(&caps[2]).to_string();

        // Both end up as GitHub API path segments
        if !is_valid_segment(&owner) || !is_valid_segment(&name) {
            return Err(invalid());
        }

        Ok(Self { owner, name })
    }

    pub fn pull_request_path(&self, number: PrNumber) -> String {
        format!("/repos/{}/{}/pulls/{number}", self.owner, self.name)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrNumber(pub u64);

impl PrNumber {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| AppError::InvalidInput("Invalid pull request number".to_string()))
    }
}

impl fmt::Display for PrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> (String, String) {
        let repo = Repository::from_url(url).unwrap();
        (repo.owner, repo.name)
    }

    #[test]
    fn parses_plain_repository_url() {
        assert_eq!(
            parse("https://github.com/acme/widgets"),
            ("acme".to_string(), "widgets".to_string())
        );
    }

    #[test]
    fn strips_git_suffix() {
        assert_eq!(
            parse("https://github.com/acme/widgets.git"),
            ("acme".to_string(), "widgets".to_string())
        );
    }

    #[test]
    fn ignores_trailing_path_segments() {
        assert_eq!(
            parse("https://github.com/acme/widgets/pull/5"),
            ("acme".to_string(), "widgets".to_string())
        );
        assert_eq!(
            parse("https://github.com/acme/widgets/"),
            ("acme".to_string(), "widgets".to_string())
        );
    }

    #[test]
    fn ignores_query_strings_and_anchors() {
        for url in [
            "https://github.com/acme/widgets?tab=readme-ov-file",
            "https://github.com/acme/widgets#readme",
            "https://github.com/acme/widgets.git?ref=main",
            "https://github.com/acme/widgets/pull/5#discussion_r1",
        ] {
            assert_eq!(parse(url), ("acme".to_string(), "widgets".to_string()), "{url}");
        }
    }

    #[test]
    fn matches_host_case_insensitively_without_scheme() {
        assert_eq!(
            parse("GitHub.com/Acme/Widgets"),
            ("Acme".to_string(), "Widgets".to_string())
        );
    }

    #[test]
    fn rejects_urls_without_owner_and_name() {
        for url in [
            "not a url",
            "",
            "https://github.com/acme",
            "https://github.com/acme/",
            "https://gitlab.com/acme/widgets",
            "https://github.com/acme/.git",
            "https://github.com/acme/..",
            "https://github.com/../widgets",
            "https://github.com/acme/wid%2Fgets",
            "https://github.com/acme/wid gets",
        ] {
            let err = Repository::from_url(url).unwrap_err();
            assert!(
                matches!(&err, AppError::InvalidInput(msg) if msg == "Invalid repository URL"),
                "{url} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn builds_pull_request_path() {
        let repo = Repository::from_url("https://github.com/acme/widgets").unwrap();

        assert_eq!(
            repo.pull_request_path(PrNumber(17)),
            "/repos/acme/widgets/pulls/17"
        );
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn pr_number_must_be_a_positive_integer() {
        assert_eq!(PrNumber::parse(" 42 ").unwrap(), PrNumber(42));
        assert!(PrNumber::parse("0").is_err());
        assert!(PrNumber::parse("").is_err());
        assert!(PrNumber::parse("1/../../user").is_err());
        assert!(PrNumber::parse("4.5").is_err());
    }
}
