use std::{env, path::PathBuf, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("SESSION_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn telemetry_url() -> String {
    env::var("TELEMETRY_URL").unwrap_or_else(|_| "http://localhost:8000/getUserData".to_string())
}

pub fn telemetry_timeout() -> Duration {
    let millis = env::var("TELEMETRY_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

// Optional JSON level layout; the built-in demo layout is used when unset.
pub fn level_file() -> Option<PathBuf> {
    env::var_os("LEVEL_FILE").map(PathBuf::from)
}

pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
