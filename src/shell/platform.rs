//! Environment detection.

/// Variables set by common CI providers.
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
];

/// Whether the process runs under CI, where spinners and color are off.
pub fn is_ci() -> bool {
    is_ci_with(|name| std::env::var_os(name).is_some())
}

fn is_ci_with(is_set: impl Fn(&str) -> bool) -> bool {
    CI_MARKERS.iter().any(|name| is_set(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_any_marker() {
        assert!(is_ci_with(|name| name == "BUILDKITE"));
        assert!(is_ci_with(|name| name == "CI"));
    }

    #[test]
    fn clean_environment_is_not_ci() {
        assert!(!is_ci_with(|_| false));
    }
}
