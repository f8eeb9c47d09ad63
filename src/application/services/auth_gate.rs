/// Checks a caller-supplied key against the configured secret.
///
/// An empty configured secret disables the check entirely.
pub fn is_authorized(configured: &str, supplied: Option<&str>) -> bool {
    configured.is_empty() || supplied == Some(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_secret_requires_exact_match() {
        assert!(is_authorized("S", Some("S")));
        assert!(!is_authorized("S", Some("")));
        assert!(!is_authorized("S", Some("T")));
        assert!(!is_authorized("S", Some("s")));
        assert!(!is_authorized("S", Some("S ")));
        assert!(!is_authorized("S", None));
    }

    #[test]
    fn test_empty_secret_allows_everything() {
        assert!(is_authorized("", None));
        assert!(is_authorized("", Some("")));
        assert!(is_authorized("", Some("anything")));
    }
}
