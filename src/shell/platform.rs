//! Platform detection.

/// Check if running in a CI environment.
///
/// Used to force non-interactive output in `main()`, so CI logs never
/// receive spinner frames or color codes.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key))
}

/// CI detection with a custom env var lookup (for testing).
pub fn is_ci_with<F>(env_fn: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ]
    .iter()
    .any(|key| env_fn(key).is_ok())
}
