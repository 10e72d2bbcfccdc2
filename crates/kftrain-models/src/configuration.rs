pub const DEFAULT_HOST: &str = "http://localhost";

/// Client settings attached to every model instance.
///
/// Models hold it behind an `Arc`; there is no process-wide default, callers
/// build one (or use `Configuration::default()`) and pass it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URL of the Training API server.
    pub host: String,

    /// When false, `Model::validate` accepts everything.
    pub client_side_validation: bool,

    pub debug: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            client_side_validation: true,
            debug: false,
        }
    }
}

// ── Environment parsing ─────────────────────────────────────────────

impl Configuration {
    /// Read `KFTRAIN_HOST`, `KFTRAIN_CLIENT_SIDE_VALIDATION` and `KFTRAIN_DEBUG`.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("KFTRAIN_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let client_side_validation = bool_var(
            "KFTRAIN_CLIENT_SIDE_VALIDATION",
            lookup("KFTRAIN_CLIENT_SIDE_VALIDATION"),
            defaults.client_side_validation,
        );
        let debug = bool_var("KFTRAIN_DEBUG", lookup("KFTRAIN_DEBUG"), defaults.debug);

        Self {
            host,
            client_side_validation,
            debug,
        }
    }
}

fn bool_var(key: &str, raw: Option<String>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            tracing::warn!(key, value=%other, default, "invalid boolean, using default");
            default
        }
    }
}
