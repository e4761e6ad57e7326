//! Listener configuration for the HTTP server

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`; unset values fall back to the defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("HOST is not an IP address: {host}"))?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let cfg = ServerConfig::from_lookup(|k| match k {
            "HOST" => Some("127.0.0.1".into()),
            "PORT" => Some("8080".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_port() {
        assert!(ServerConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string())).is_err());
    }
}
