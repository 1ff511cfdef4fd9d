// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod token;

use config::{StartTime, TokenConfig};
use token::TokenSigner;

/// Prefix parameter query yang diharapkan edge di depan token.
const TOKEN_PREFIX: &str = "hdnts";

const EXAMPLES: &str = "\
Examples:

  # Generate a token that is valid for 1 hour (3600 seconds) and protects
  # the stream id YourStreamId with a secret value of demosecret123abc
  gen_token -l 3600 -u YourStreamId -k demosecret123abc
  hdnts=exp=1579792240~hmac=efe1cef703a1951c7e01e49257ae33487adcf80ec91db2d264130fbe0daeb7ed

  # Generate a token that is valid from 1578935505 to 1578935593
  # seconds after 1970-01-01 00:00 UTC (Unix epoch time)
  gen_token -s 1578935505 -e 1578935593 -u YourStreamId -k demosecret123abc
  hdnts=st=1578935505~exp=1578935593~hmac=aaf01da130e5554eeb74159e9794c58748bc9f6b5706593775011964612b6d99
";

/// Generate signed access tokens for protected stream targets.
///
/// Requests against a protected stream target must carry a parameter block
/// generated by this tool, otherwise the edge blocks the request. Every token
/// is tied to one stream id and has a limited lifetime; optionally it can be
/// bound to a client IP address or given an explicit start time. The stream
/// target configuration has to match these optional parameters in some cases.
#[derive(Parser, Debug)]
#[command(name = "gen_token", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Token expires after SECONDS. --lifetime or --end-time is mandatory.
    #[arg(short = 'l', long, value_name = "SECONDS", allow_negative_numbers = true)]
    lifetime: Option<i64>,

    /// Token expiration in Unix epoch seconds. --end-time overrides --lifetime.
    #[arg(short = 'e', long, value_name = "SECONDS", allow_negative_numbers = true)]
    end_time: Option<i64>,

    /// Stream id to validate the token against.
    #[arg(short = 'u', long, value_name = "STREAMID")]
    stream_id: Option<String>,

    /// VOD stream id, emitted as a visible token field.
    #[arg(long, value_name = "STREAMID")]
    vod_stream_id: Option<String>,

    /// Secret required to generate the token. Do not share this secret.
    /// Falls back to the STREAM_TOKEN_SECRET environment variable.
    #[arg(short = 'k', long, value_name = "SECRET")]
    key: Option<String>,

    /// Start time in Unix epoch seconds. Use 'now' for the current time.
    #[arg(short = 's', long, value_name = "TIME", allow_negative_numbers = true)]
    start_time: Option<StartTime>,

    /// The token is only valid for this IP address.
    #[arg(short = 'i', long, value_name = "ADDR")]
    ip: Option<String>,
}

fn main() -> Result<()> {
    // Log ke stderr supaya stdout tetap bersih (hanya token).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = TokenConfig {
        // secret dan stream id yang kosong ditolak oleh TokenSigner
        secret: cli.key.or_else(config::secret_from_env).unwrap_or_default(),
        stream_id: cli.stream_id.unwrap_or_default(),
        vod_stream_id: cli.vod_stream_id,
        ip: cli.ip,
        start_time: cli.start_time,
        end_time: cli.end_time,
        lifetime_seconds: cli.lifetime,
    };

    let token = TokenSigner::new(cfg)?.generate_token()?;
    println!("{TOKEN_PREFIX}={token}");
    Ok(())
}
