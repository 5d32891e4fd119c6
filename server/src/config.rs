use anyhow::{Result, bail};

const DEFAULT_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub service_name: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "acce-server".into(),
            cors_allowed_origins: vec![DEFAULT_ORIGIN.into()],
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let service_name = std::env::var("SERVICE_NAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "acce-server".into());

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGIN.into()),
        );
        if let Some(bad) = cors_allowed_origins
            .iter()
            .find(|origin| !origin.starts_with("http://") && !origin.starts_with("https://"))
        {
            bail!("CORS_ALLOWED_ORIGINS entry `{bad}` must start with http:// or https://");
        }

        Ok(Self {
            service_name,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
