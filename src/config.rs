// src/config.rs

use std::{env, str::FromStr};

/// Env fallback untuk secret kalau `-k/--key` tidak diberikan.
pub const SECRET_ENV: &str = "STREAM_TOKEN_SECRET";

/// Waktu mulai token: epoch detik, atau "now" (jam sistem saat generate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartTime {
    Now,
    At(i64),
}

impl FromStr for StartTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("now") {
            return Ok(StartTime::Now);
        }
        s.parse::<i64>()
            .map(StartTime::At)
            .map_err(|_| format!("expected epoch seconds or \"now\", got {s:?}"))
    }
}

/// Input untuk satu kali pembuatan token.
///
/// `secret` dan `stream_id` wajib non-empty; sisanya opsional.
/// Field opsional yang tidak diisi tidak pernah muncul di token.
#[derive(Clone, Debug, Default)]
pub struct TokenConfig {
    pub secret: String,
    pub stream_id: String,
    pub vod_stream_id: Option<String>,
    pub ip: Option<String>,
    pub start_time: Option<StartTime>,
    pub end_time: Option<i64>,
    pub lifetime_seconds: Option<i64>,
}

pub fn secret_from_env() -> Option<String> {
    env::var(SECRET_ENV).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_start_time_now_any_case() {
        assert_eq!("now".parse::<StartTime>(), Ok(StartTime::Now));
        assert_eq!("NOW".parse::<StartTime>(), Ok(StartTime::Now));
        assert_eq!("Now".parse::<StartTime>(), Ok(StartTime::Now));
    }

    #[test]
    fn parse_start_time_seconds() {
        assert_eq!("1578935505".parse::<StartTime>(), Ok(StartTime::At(1578935505)));
        // angka negatif tetap lolos parse; ditolak saat generate
        assert_eq!("-5".parse::<StartTime>(), Ok(StartTime::At(-5)));
    }

    #[test]
    fn parse_start_time_garbage() {
        assert!("later".parse::<StartTime>().is_err());
        assert!("".parse::<StartTime>().is_err());
    }
}
