//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_ID, MEMORY_CACHE_COMPONENT};

/// Connection settings shared by every binary, with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Base URL of the wwebjs-api service
    #[arg(long, env = "WWEBJS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent as x-api-key
    #[arg(long, env = "WWEBJS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Default session ID
    #[arg(
        short = 's',
        long,
        env = "WWEBJS_SESSION_ID",
        default_value = DEFAULT_SESSION_ID,
        global = true
    )]
    pub session_id: String,

    /// Request timeout in seconds
    #[arg(long, env = "WWEBJS_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Cache responses of read-only endpoints
    #[arg(long, env = "WWEBJS_ENABLE_CACHE")]
    pub enable_cache: bool,

    #[arg(long, env = "WWEBJS_CACHE_COMPONENT", default_value = MEMORY_CACHE_COMPONENT)]
    pub cache_component: String,

    /// Cache entry lifetime in seconds
    #[arg(long, env = "WWEBJS_CACHE_TTL", default_value_t = 300)]
    pub cache_ttl: u64,
}

impl From<ApiArgs> for ClientConfig {
    fn from(args: ApiArgs) -> Self {
        Self {
            base_url: args.base_url,
            api_key: args.api_key.filter(|key| !key.is_empty()),
            default_session_id: args.session_id,
            timeout: args.timeout,
            enable_cache: args.enable_cache,
            cache_component: args.cache_component,
            cache_ttl: args.cache_ttl,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wwebjs", version, about = "WhatsApp Web REST client console")]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Session management
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Messaging
    Message {
        #[command(subcommand)]
        command: MessageCommand,
    },
    /// Contact information
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },
    /// Check API health
    Ping,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SessionCommand {
    /// Start a new session and print its QR code
    Start { session: Option<String> },
    /// Get session status
    Status { session: Option<String> },
    /// Get QR code for authentication
    Qr { session: Option<String> },
    /// Stop a session
    Stop { session: Option<String> },
    /// List all sessions
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum MessageCommand {
    /// Send a text message to a chat ID or phone number
    Send {
        chat_id: String,
        text: String,
        session: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ContactCommand {
    /// List contacts
    List { session: Option<String> },
}
