use kftrain_models::Configuration;

/// Applies command-line overrides on top of an environment-derived configuration.
pub fn build_configuration(
    base: Configuration,
    host: Option<String>,
    no_client_side_validation: bool,
    debug: bool,
) -> Configuration {
    let mut configuration = base;
    if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
        configuration.host = host;
    }
    if no_client_side_validation {
        configuration.client_side_validation = false;
    }
    if debug {
        configuration.debug = true;
    }
    configuration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_base() {
        let base = Configuration::default();
        assert_eq!(build_configuration(base.clone(), None, false, false), base);
    }

    #[test]
    fn test_overrides_apply() {
        let cfg = build_configuration(
            Configuration::default(),
            Some("https://kf.example.com".to_string()),
            true,
            true,
        );
        assert_eq!(cfg.host, "https://kf.example.com");
        assert!(!cfg.client_side_validation);
        assert!(cfg.debug);
    }

    #[test]
    fn test_blank_host_is_ignored() {
        let cfg = build_configuration(Configuration::default(), Some(" ".to_string()), false, false);
        assert_eq!(cfg.host, Configuration::default().host);
    }
}
