//! Server configuration.

use std::num::NonZeroUsize;

/// Host the relay binds to when none is given
pub const DEFAULT_HOST: &str = "localhost";
/// Port the relay binds to when none is given
pub const DEFAULT_PORT: u16 = 8989;

/// Runtime configuration of the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind the chat listener to
    pub host: String,
    /// Port number to bind the chat listener to (0 picks a free port)
    pub port: u16,
    /// Maximum number of history records kept; `None` keeps everything
    pub history_limit: Option<NonZeroUsize>,
    /// Address of the read-only status HTTP endpoint; `None` disables it
    pub status_addr: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            history_limit: None,
            status_addr: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string handed to the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: 既定値は localhost:8989、履歴は無制限、ステータス API は無効
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "localhost:8989");
        assert_eq!(config.history_limit, None);
        assert_eq!(config.status_addr, None);
    }

    #[test]
    fn test_bind_addr_uses_overrides() {
        // テスト項目: ホストとポートを上書きすると bind アドレスに反映される
        // given (前提条件):
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 2525,
            ..ServerConfig::default()
        };

        // when (操作):
        let addr = config.bind_addr();

        // then (期待する結果):
        assert_eq!(addr, "0.0.0.0:2525");
    }
}
