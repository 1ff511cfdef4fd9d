// src/token.rs

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::config::{StartTime, TokenConfig};
use crate::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Sumber waktu (epoch detik). Production pakai jam sistem, test pakai nilai tetap.
pub type Clock = fn() -> i64;

fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Penandatangan token akses untuk satu stream terproteksi.
///
/// Token: field `key=value` digabung `~`, urutan tetap
/// (`vod_stream_id`, `ip`, `st`, `exp`, `hmac`). Signature = HMAC-SHA256
/// atas field yang tampil plus `stream_id=<id>` tersembunyi di ujung;
/// verifier menyusun ulang string yang sama persis.
pub struct TokenSigner {
    cfg: TokenConfig,
    clock: Clock,
}

impl TokenSigner {
    pub fn new(cfg: TokenConfig) -> Result<Self, TokenError> {
        Self::with_clock(cfg, unix_now)
    }

    /// Konstruktor dengan jam injeksi. Field wajib divalidasi di sini,
    /// sebelum komputasi apa pun.
    pub fn with_clock(cfg: TokenConfig, clock: Clock) -> Result<Self, TokenError> {
        if cfg.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if cfg.stream_id.is_empty() {
            return Err(TokenError::MissingStreamId);
        }
        Ok(Self { cfg, clock })
    }

    pub fn generate_token(&self) -> Result<String, TokenError> {
        // 1) resolve start: "now" -> jam sistem, angka harus > 0
        let start = match self.cfg.start_time {
            Some(StartTime::Now) => Some((self.clock)()),
            Some(StartTime::At(s)) if s <= 0 => return Err(TokenError::InvalidStartTime),
            Some(StartTime::At(s)) => Some(s),
            None => None,
        };

        if matches!(self.cfg.end_time, Some(e) if e <= 0) {
            return Err(TokenError::InvalidEndTime);
        }
        if matches!(self.cfg.lifetime_seconds, Some(l) if l <= 0) {
            return Err(TokenError::InvalidLifetime);
        }

        // 2) resolve window: end_time menang atas lifetime
        let (start, end) = match self.cfg.end_time {
            Some(end) => {
                if matches!(start, Some(s) if s >= end) {
                    return Err(TokenError::StartAfterExpiration);
                }
                (start, end)
            }
            None => {
                let lifetime = self
                    .cfg
                    .lifetime_seconds
                    .ok_or(TokenError::MissingExpiration)?;
                // tanpa start eksplisit, expiry dihitung dari "now";
                // start hasil default ini tidak pernah dipancarkan sebagai `st`
                let s = start.unwrap_or_else(|| (self.clock)());
                (Some(s), s.saturating_add(lifetime))
            }
        };

        if matches!(start, Some(s) if end < s) {
            return Err(TokenError::AlreadyExpired);
        }

        debug!(?start, end, "token window resolved");

        // 3) field yang tampil, urutan tetap
        let mut fields: Vec<String> = Vec::new();
        if let Some(vod) = non_empty(self.cfg.vod_stream_id.as_deref()) {
            fields.push(format!("vod_stream_id={vod}"));
        }
        if let Some(ip) = non_empty(self.cfg.ip.as_deref()) {
            fields.push(format!("ip={ip}"));
        }
        if self.cfg.start_time.is_some() {
            if let Some(s) = start {
                fields.push(format!("st={s}"));
            }
        }
        fields.push(format!("exp={end}"));

        // 4) signing material = field tampil + stream_id (tidak ikut tampil)
        let mut hash_source = fields.clone();
        hash_source.push(format!("stream_id={}", self.cfg.stream_id));

        let mut mac = HmacSha256::new_from_slice(self.cfg.secret.as_bytes())
            .expect("HMAC key must be valid");
        mac.update(hash_source.join("~").as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());

        fields.push(format!("hmac={digest}"));
        Ok(fields.join("~"))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
