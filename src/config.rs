use std::time::Duration;

use crate::gateway::discord::Credentials;
use crate::gateway::supervisor::ReconnectPolicy;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

pub struct Config {
    pub port: u16,
    pub ws_port: u16,
    pub credentials: Credentials,
    pub channel_id: u64,
    pub gemini: Option<GeminiConfig>,
    /// Answer failed submissions with 200 and `{success:false}` only.
    pub legacy_status: bool,
    pub reconnect: ReconnectPolicy,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn env_port(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let token = std::env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN is required");
        let channel_id: u64 = std::env::var("CHANNEL_ID")
            .expect("CHANNEL_ID is required")
            .trim()
            .parse()
            .ok()
            .filter(|id| *id != 0)
            .expect("CHANNEL_ID must be a non-zero numeric channel id");

        let gemini = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .map(|api_key| GeminiConfig {
                api_key,
                model: std::env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: std::env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            });

        let max_delay = std::env::var("RELAY_RECONNECT_MAX_DELAY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let defaults = ReconnectPolicy::default();
        let reconnect = ReconnectPolicy {
            enabled: env_flag("RELAY_GATEWAY_RECONNECT"),
            max_delay: Duration::from_secs(max_delay).max(defaults.initial_delay),
            ..defaults
        };

        Self {
            port: env_port("PORT", 3000),
            ws_port: env_port("WS_PORT", 8080),
            credentials: Credentials { token },
            channel_id,
            gemini,
            legacy_status: env_flag("RELAY_LEGACY_STATUS"),
            reconnect,
        }
    }

    /// Whether pushes get their own listener next to the API.
    pub fn separate_push_listener(&self) -> bool {
        self.ws_port != self.port
    }
}
