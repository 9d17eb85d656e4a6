use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const MODEL_REL_PATH: &str = "model/model.json";

/// Optional preferred font files for blueprint labels.
#[derive(Debug, Clone, Default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub bind_ip: IpAddr,
    pub port: u16,
    pub fonts: FontConfig,
    /// Log a summary of every feature vector before prediction.
    pub log_predictions: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let model_path = var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(resolve_model_path);
        let port = var("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let bind_ip = var("BIND_ADDR")
            .and_then(|s| s.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Self {
            model_path,
            bind_ip,
            port,
            fonts: FontConfig {
                regular: var("FONT_PATH").map(PathBuf::from),
                bold: var("FONT_BOLD_PATH").map(PathBuf::from),
            },
            log_predictions: var("LOG_PRED").as_deref() == Some("1"),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }
}

fn resolve_model_path() -> PathBuf {
    // Common run paths: crate root, or the parent of an `app/` directory.
    // Otherwise look next to the executable.
    let mut candidates = vec![
        PathBuf::from(MODEL_REL_PATH),
        PathBuf::from("app").join(MODEL_REL_PATH),
    ];
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        candidates.push(exe.join(MODEL_REL_PATH));
    }

    for c in candidates {
        if c.exists() {
            return c;
        }
    }

    // Fallback to default relative path; model loading will error
    PathBuf::from(MODEL_REL_PATH)
}
