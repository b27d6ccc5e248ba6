//! Liveroom TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Watch a room as an audience member
//! liveroom-tui --room lounge --nickname mira
//!
//! # Broadcast as the host
//! liveroom-tui --room lounge --nickname mira --host
//!
//! # Exercise the denial path
//! liveroom-tui --deny camera
//! ```

use clap::Parser;
use liveroom_core::ClientRole;
use liveroom_session::{Permission, PermissionSet, RoomProfile};
use liveroom_tui::sdk::{SdkConfig, spawn_sdk};
use liveroom_tui::{Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Liveroom terminal UI client
#[derive(Parser, Debug)]
#[command(name = "liveroom-tui")]
#[command(about = "Terminal shell for live room sessions")]
#[command(version)]
struct Args {
    /// Room name to enter
    #[arg(long, default_value = "lounge")]
    room: String,

    /// Nickname shown in chat and presence lines
    #[arg(long, default_value = "guest")]
    nickname: String,

    /// Enter as the broadcasting host instead of an audience member
    #[arg(long)]
    host: bool,

    /// Permission the simulated platform should refuse (repeatable)
    #[arg(long, value_enum)]
    deny: Vec<DeniedPermission>,

    /// Make the messaging channel join fail, to exercise the error path
    #[arg(long)]
    fail_join: bool,

    /// Stderr log level: trace, debug, info, warn, or error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// CLI spelling of a deniable permission.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DeniedPermission {
    /// Camera capture permission
    Camera,
    /// Microphone capture permission
    Microphone,
    /// Storage access permission
    Storage,
}

impl From<DeniedPermission> for Permission {
    fn from(value: DeniedPermission) -> Self {
        match value {
            DeniedPermission::Camera => Permission::Camera,
            DeniedPermission::Microphone => Permission::Microphone,
            DeniedPermission::Storage => Permission::Storage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Logs go to stderr so redirecting them keeps the alternate screen clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(filter)
        .init();

    let denied: PermissionSet = args.deny.iter().copied().map(Permission::from).collect();

    let role = if args.host { ClientRole::Broadcaster } else { ClientRole::Audience };
    let profile = RoomProfile {
        room_name: args.room.clone(),
        channel: args.room,
        nickname: args.nickname,
        uid: 0,
        role,
        beauty_enabled: true,
    };

    let sdk = spawn_sdk(SdkConfig {
        denied,
        fail_messaging_join: args.fail_join,
        ..SdkConfig::default()
    });
    let driver = TerminalDriver::new(sdk)?;

    Ok(Runtime::new(driver, profile).run().await?)
}
