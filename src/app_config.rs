use std::collections::HashMap;

/// Server configuration.
#[derive(Debug, Clone, serde::Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Server host (default: '127.0.0.1')
    pub host: String,
    /// Server port (default: 5000)
    pub port: u16,
    /// List of addresses to be specified in the 'Access-Control-Allow-Origin' header.
    /// Separate addresses with spaces.
    ///
    /// Example: "http://localhost:5173 http://127.0.0.1:5173"
    ///
    /// If no addresses are given, the header value will be "*".
    pub allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    /// Read configuration from `.env` and `POTATO_*` environment variables.
    pub fn from_env() -> anyhow::Result<AppConfig> {
        let _ = dotenvy::dotenv();
        Self::load(None)
    }

    /// Address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the configuration, optionally from an explicit variable map
    /// instead of the process environment.
    fn load(vars: Option<HashMap<String, String>>) -> anyhow::Result<AppConfig> {
        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .add_source(
                config::Environment::with_prefix("POTATO")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("allowed_origins")
                    .source(vars),
            )
            .build()?;

        let mut cfg: AppConfig = config.try_deserialize()?;

        // Drop blank entries; an empty list or a wildcard means any origin
        cfg.allowed_origins = cfg.allowed_origins.and_then(|origins| {
            let origins: Vec<String> = origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
                None
            } else {
                Some(origins)
            }
        });

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_dev_server() {
        let cfg = AppConfig::load(Some(HashMap::new())).unwrap();

        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.allowed_origins, None);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = AppConfig::load(Some(vars(&[
            ("POTATO_HOST", "0.0.0.0"),
            ("POTATO_PORT", "8080"),
            (
                "POTATO_ALLOWED_ORIGINS",
                "http://localhost:5173 http://127.0.0.1:5173",
            ),
        ])))
        .unwrap();

        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(
            cfg.allowed_origins,
            Some(vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ])
        );
    }

    #[test]
    fn blank_origin_entries_are_dropped() {
        let cfg = AppConfig::load(Some(vars(&[(
            "POTATO_ALLOWED_ORIGINS",
            "http://a  http://b",
        )])))
        .unwrap();

        assert_eq!(
            cfg.allowed_origins,
            Some(vec!["http://a".to_string(), "http://b".to_string()])
        );
    }

    #[test]
    fn wildcard_origin_means_any() {
        let cfg = AppConfig::load(Some(vars(&[("POTATO_ALLOWED_ORIGINS", "*")]))).unwrap();

        assert_eq!(cfg.allowed_origins, None);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = AppConfig::load(Some(vars(&[("POTATO_PORT", "not-a-port")])));
        assert!(result.is_err());
    }
}
