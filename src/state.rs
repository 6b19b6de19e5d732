use crate::ledger::{Ledger, StreakState};
use std::{env, sync::Arc, time::Duration};
use tokio::sync::Mutex;

pub const DEFAULT_PARTNER_API_BASE: &str = "https://pokeapi.co/api/v2";

const DEFAULT_HABITS: [&str; 5] = [
    "Wake up on time",
    "Drink water",
    "Read or study",
    "Exercise",
    "Lights out early",
];

const PARTNER_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the session owns: the ledger and the streak beside it.
/// Constructed at startup, dropped with the process.
#[derive(Debug, Default)]
pub struct Session {
    pub ledger: Ledger,
    pub streak: StreakState,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub default_habits: Arc<Vec<String>>,
    pub partner_api_base: String,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        default_habits: Vec<String>,
        partner_api_base: String,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(PARTNER_TIMEOUT).build()?;
        Ok(Self {
            session: Arc::new(Mutex::new(Session::default())),
            default_habits: Arc::new(default_habits),
            partner_api_base,
            http,
        })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(default_habits_from_env(), partner_api_base_from_env())
    }
}

pub fn default_habits_from_env() -> Vec<String> {
    match env::var("DEFAULT_HABITS") {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        Err(_) => DEFAULT_HABITS.iter().map(|name| name.to_string()).collect(),
    }
}

pub fn partner_api_base_from_env() -> String {
    env::var("PARTNER_API_BASE").unwrap_or_else(|_| DEFAULT_PARTNER_API_BASE.to_string())
}
