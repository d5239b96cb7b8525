use std::net::{Ipv4Addr, SocketAddr};

pub const PORT: u16 = 9090;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/todos.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
}

impl Config {
    /// Listens on port 9090 on all interfaces. `DATABASE_URL` (a `.env` file
    /// is honoured) may point away from `./data/todos.db`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT)),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        }
    }
}
