//! # CLI
//!
//! Flags and subcommands of `demo-harness`, one subcommand per scenario.
//!
//! Requests are checked here, before anything is dialed: IPs must parse and durations must be
//! valid. The scenarios send whatever they are given.
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use demo_core::config::{ClientConfig, DEFAULT_ADDRESS, Security};
use demo_core::pb::demo::CheckIps;
use demo_core::scenarios::default_check_ips;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "demo-harness", version, about = "Runs gRPC demo scenarios against a server")]
pub struct Cli {
    /// Server address, either `host:port` or a full URI (e.g. http://localhost:50051)
    #[arg(short, long, env = "DEMO_GRPC_ADDRESS", default_value = DEFAULT_ADDRESS, global = true)]
    pub address: String,

    /// Dial with TLS instead of plain-text HTTP/2
    #[arg(long, global = true)]
    pub secure: bool,

    /// Give up connecting after this many seconds
    #[arg(long = "connect-timeout-secs", value_parser = parse_secs, global = true)]
    pub connect_timeout: Option<Duration>,

    /// Deadline for every call, in seconds
    #[arg(long = "timeout-secs", value_parser = parse_secs, global = true)]
    pub timeout: Option<Duration>,

    /// How reports are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Unary call to hello.HelloService/TickInfo
    Tick {
        #[arg(long, default_value = "hewe")]
        name: String,
        #[arg(long, default_value_t = 30)]
        age: i32,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        adult: bool,
    },

    /// CheckIfBlack (map reply) followed by GetContactInfo (union reply)
    Batch {
        #[command(flatten)]
        check: CheckArgs,
    },

    /// Client streaming upload of `count` copies of one location
    Upload {
        #[arg(long, default_value_t = 11.323, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = 92.24, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 3)]
        count: usize,
    },

    /// Server streaming download of locations until end of stream
    Pull,

    /// Call CheckIfBlack on a fixed interval, logging failures instead of aborting
    ///
    /// Runs until Ctrl-C unless `--max-attempts` is given.
    Probe {
        #[command(flatten)]
        check: CheckArgs,
        /// Pause before every call, in seconds. Must be greater than zero
        #[arg(long = "interval-secs", value_parser = parse_interval, default_value = "2")]
        interval: Duration,
        #[arg(long)]
        max_attempts: Option<u64>,
    },

    /// Run tick, batch, upload and pull in sequence, each on its own connection
    All,
}

/// The `CheckIfBlack` request shared by `batch` and `probe`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long, default_value = "testListAndMap")]
    pub name: String,
    /// IP to check, repeatable. Defaults to the sample batch of three IPs
    #[arg(long = "ip", value_parser = parse_ip)]
    pub ips: Vec<String>,
}

impl CheckArgs {
    pub fn into_request(self) -> CheckIps {
        if self.ips.is_empty() {
            CheckIps {
                name: self.name,
                ..default_check_ips()
            }
        } else {
            CheckIps {
                name: self.name,
                ips: self.ips,
            }
        }
    }
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let security = if self.secure {
            Security::Tls
        } else {
            Security::Insecure
        };

        let mut config = ClientConfig::new(self.address.clone()).with_security(security);

        if let Some(timeout) = self.connect_timeout {
            config = config.with_connect_timeout(timeout);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_request_timeout(timeout);
        }

        config
    }
}

fn parse_secs(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|e| format!("Invalid number of seconds '{value}': {e}"))?;

    Duration::try_from_secs_f64(secs).map_err(|e| format!("Invalid duration '{value}': {e}"))
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let interval = parse_secs(value)?;

    if interval.is_zero() {
        return Err("The interval must be greater than zero".to_string());
    }

    Ok(interval)
}

fn parse_ip(value: &str) -> Result<String, String> {
    value
        .parse::<IpAddr>()
        .map(|_| value.to_string())
        .map_err(|_| format!("Invalid IP address: '{value}'"))
}
