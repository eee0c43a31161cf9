use anyhow::{Context, Result};

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port. Zero asks the OS for an ephemeral port.
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `PORT` is the only configuration surface; when unset the server binds
    /// an ephemeral port.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {:?}", raw))?,
            Err(_) => 0,
        };

        Ok(Self { port })
    }

    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_is_loopback_with_port() {
        let config = Config { port: 8080 };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn port_zero_requests_an_ephemeral_port() {
        let config = Config { port: 0 };
        assert_eq!(config.bind_addr(), "127.0.0.1:0");
    }
}
