use crate::errors::ServerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub rate_limit_burst: u32,
    pub rate_limit_replenish_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let store = match lookup("NOTES_STORE").as_deref() {
            None | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                log::error!("unknown NOTES_STORE {other:?}, expected postgres or memory");
                return Err(ServerError::EnvironmentError);
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store == StoreKind::Postgres && database_url.is_none() {
            log::error!("env DATABASE_URL is required for the postgres store");
            return Err(ServerError::EnvironmentError);
        }

        let rate_limit_burst: u32 = lookup("RATE_LIMIT_BURST")
            .unwrap_or_else(|| "120".to_string())
            .parse()?;
        let rate_limit_replenish_secs: u64 = lookup("RATE_LIMIT_REPLENISH_SECS")
            .unwrap_or_else(|| "1".to_string())
            .parse()?;
        // the rate limiter cannot be built from a zero quota
        if rate_limit_burst == 0 || rate_limit_replenish_secs == 0 {
            log::error!("RATE_LIMIT_BURST and RATE_LIMIT_REPLENISH_SECS must be positive");
            return Err(ServerError::EnvironmentError);
        }

        Ok(Config {
            port: lookup("PORT").unwrap_or_else(|| "3000".to_string()).parse()?,
            store,
            database_url,
            rate_limit_burst,
            rate_limit_replenish_secs,
        })
    }
}
