//! In-process simulated SDK boundary.
//!
//! Stands in for the real media and messaging engines: commands arrive on a
//! channel and the matching callbacks flow back, while a scripted cast of
//! room members supplies chat, gift, seat, and presence traffic. No network,
//! so the full shell runs deterministically against a real terminal.

use liveroom_app::sdk_channel;
use liveroom_core::{
    ClientRole, GIFT_CATALOG, GiftId, OwnerState, PkSnapshot, RankEntry, SeatInfo, SeatOccupant,
    SeatState, Uid,
};
use liveroom_session::signal::{self, ChannelMessage};
use liveroom_session::{PermissionSet, SdkCommand, SdkEvent};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Capacity of the command queue into the simulated engines.
const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Media uid of the simulated room owner.
const OWNER_UID: Uid = 1;

/// Guest seats the simulated room exposes.
const SEAT_COUNT: u8 = 4;

/// Entries kept on the gift rank board.
const RANK_SIZE: usize = 3;

const PK_ROUND_SECONDS: u32 = 60;
const PK_TICK_SECONDS: u32 = 5;
const PK_OPPONENT: &str = "aurora";

/// Scripted members, joining in random order.
const MEMBER_NAMES: [&str; 8] = ["petra", "jon", "ada", "silas", "noor", "kiran", "tove", "remy"];

const CHAT_LINES: [&str; 6] = [
    "hello everyone",
    "the stream looks great today",
    "where is this filmed?",
    "lol",
    "can you do the song from last week?",
    "greetings from the night shift",
];

const REPLY_LINES: [&str; 4] =
    ["good point", "haha yes", "agreed!", "someone asked that earlier too"];

/// Tuning knobs for the simulated SDK.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Permissions the simulated platform refuses to grant.
    pub denied: PermissionSet,

    /// Make every messaging channel join fail, to exercise the error path.
    pub fail_messaging_join: bool,

    /// Pace of the scripted room traffic.
    pub traffic_period: Duration,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            denied: PermissionSet::empty(),
            fail_messaging_join: false,
            traffic_period: Duration::from_millis(2500),
        }
    }
}

/// Handle to the running simulated SDK.
pub struct SdkHandle {
    /// Send SDK commands to the simulated engines.
    pub commands: mpsc::Sender<SdkCommand>,
    /// Receive marshaled SDK callbacks.
    pub events: mpsc::Receiver<SdkEvent>,
    /// Abort handle to stop the SDK task.
    abort_handle: tokio::task::AbortHandle,
}

impl SdkHandle {
    /// Stop the SDK task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn the in-process simulated SDK.
///
/// Returns a handle with channels for command and callback transport. The
/// engines run as a tokio task until stopped.
pub fn spawn_sdk(config: SdkConfig) -> SdkHandle {
    let (command_tx, command_rx) = mpsc::channel::<SdkCommand>(COMMAND_QUEUE_CAPACITY);
    let (event_tx, event_rx) = sdk_channel();

    let handle = tokio::spawn(run_engines(config, command_rx, event_tx));

    SdkHandle { commands: command_tx, events: event_rx, abort_handle: handle.abort_handle() }
}

type SendError = mpsc::error::SendError<SdkEvent>;

async fn run_engines(
    config: SdkConfig,
    mut commands: mpsc::Receiver<SdkCommand>,
    events: mpsc::Sender<SdkEvent>,
) {
    let mut traffic = tokio::time::interval(config.traffic_period);
    let mut engines = Engines::new(config, events);

    loop {
        tokio::select! {
            maybe_command = commands.recv() => {
                match maybe_command {
                    Some(command) => {
                        if engines.apply(command).await.is_err() {
                            break;
                        }
                    },
                    None => break,
                }
            }
            _ = traffic.tick() => {
                if engines.emit_traffic().await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Simulated media and messaging engines plus the scripted room.
struct Engines {
    config: SdkConfig,
    events: mpsc::Sender<SdkEvent>,
    role: ClientRole,
    messaging_joined: bool,
    owner_paused: bool,
    present: Vec<&'static str>,
    absent: Vec<&'static str>,
    rank: Vec<RankEntry>,
    seats: Vec<SeatInfo>,
    pk: Option<PkSnapshot>,
    pending_replies: u32,
}

impl Engines {
    fn new(config: SdkConfig, events: mpsc::Sender<SdkEvent>) -> Self {
        let seats = (0..SEAT_COUNT)
            .map(|index| SeatInfo { index, state: SeatState::Open, occupant: None })
            .collect();

        Self {
            config,
            events,
            role: ClientRole::Audience,
            messaging_joined: false,
            owner_paused: false,
            present: Vec::new(),
            absent: MEMBER_NAMES.to_vec(),
            rank: Vec::new(),
            seats,
            pk: None,
            pending_replies: 0,
        }
    }

    async fn emit(&self, event: SdkEvent) -> Result<(), SendError> {
        self.events.send(event).await
    }

    /// Encode a payload through the real codec and deliver it as channel
    /// text, the same shape the messaging engine hands to callbacks.
    async fn send_payload(&self, message: &ChannelMessage) -> Result<(), SendError> {
        let json = match signal::encode(message) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "payload encoding failed");
                return Ok(());
            },
        };
        self.emit(SdkEvent::ChannelText { json }).await
    }

    async fn apply(&mut self, command: SdkCommand) -> Result<(), SendError> {
        tracing::debug!(?command, "sdk command");

        match command {
            SdkCommand::RequestPermissions { permissions } => {
                let mut granted = PermissionSet::empty();
                let mut denied = PermissionSet::empty();
                for permission in permissions.iter() {
                    if self.config.denied.contains(permission) {
                        denied.insert(permission);
                    } else {
                        granted.insert(permission);
                    }
                }
                self.emit(SdkEvent::PermissionResult { granted, denied }).await?;
            },
            SdkCommand::ConfigureMedia { role } => {
                self.role = role;
            },
            SdkCommand::JoinMedia { uid, .. } => {
                let assigned = if uid == 0 { rand::rng().random_range(1000..10_000) } else { uid };
                self.emit(SdkEvent::MediaJoined { uid: assigned }).await?;
                // The owner is already publishing when a watcher joins.
                if self.role == ClientRole::Audience {
                    self.emit(SdkEvent::RemoteVideoState { uid: OWNER_UID, live: true }).await?;
                }
            },
            SdkCommand::JoinMessaging { .. } => {
                if self.config.fail_messaging_join {
                    self.emit(SdkEvent::MessagingJoinFailed {
                        reason: "simulated login rejection".to_owned(),
                    })
                    .await?;
                } else {
                    self.messaging_joined = true;
                    self.emit(SdkEvent::MessagingJoined).await?;
                    self.emit(SdkEvent::MemberCount { count: self.member_count() }).await?;
                }
            },
            SdkCommand::LeaveMessaging => {
                self.messaging_joined = false;
                self.emit(SdkEvent::MessagingLeft).await?;
            },
            SdkCommand::SendChannelMessage { .. } => {
                // The channel does not loop messages back; a scripted member
                // answers on the next traffic tick instead.
                self.pending_replies = self.pending_replies.saturating_add(1);
            },
            SdkCommand::InitMessaging
            | SdkCommand::RegisterVideoChannel
            | SdkCommand::LeaveMedia
            | SdkCommand::StartCapture
            | SdkCommand::StopCapture
            | SdkCommand::SwitchCamera
            | SdkCommand::SetPreProcess { .. }
            | SdkCommand::BindRemoteVideo { .. }
            | SdkCommand::ReleaseRemoteVideo { .. }
            | SdkCommand::CloseScreen => {},
        }

        Ok(())
    }

    async fn emit_traffic(&mut self) -> Result<(), SendError> {
        if !self.messaging_joined {
            return Ok(());
        }

        if self.pending_replies > 0 {
            self.pending_replies -= 1;
            return self.reply_to_chat().await;
        }

        self.tick_pk().await?;

        let roll = rand::rng().random_range(0..12);
        match roll {
            0 | 1 => self.member_joins().await,
            2 => self.member_leaves().await,
            3..=6 => self.member_chats().await,
            7 | 8 => self.member_sends_gift().await,
            9 => self.seat_changes().await,
            _ => self.owner_state_flips().await,
        }
    }

    async fn member_joins(&mut self) -> Result<(), SendError> {
        if self.absent.is_empty() {
            return Ok(());
        }
        let index = rand::rng().random_range(0..self.absent.len());
        let nickname = self.absent.swap_remove(index);
        self.present.push(nickname);

        self.emit(SdkEvent::MemberJoined { nickname: nickname.to_owned() }).await?;
        self.emit(SdkEvent::MemberCount { count: self.member_count() }).await
    }

    async fn member_leaves(&mut self) -> Result<(), SendError> {
        if self.present.is_empty() {
            return Ok(());
        }
        let index = rand::rng().random_range(0..self.present.len());
        let nickname = self.present.swap_remove(index);
        self.absent.push(nickname);

        self.emit(SdkEvent::MemberLeft { nickname: nickname.to_owned() }).await?;
        self.emit(SdkEvent::MemberCount { count: self.member_count() }).await
    }

    async fn member_chats(&self) -> Result<(), SendError> {
        let Some(from) = self.random_member() else {
            return Ok(());
        };
        let text = pick(&CHAT_LINES);
        self.send_payload(&ChannelMessage::Chat { from: from.to_owned(), text: text.to_owned() })
            .await
    }

    async fn reply_to_chat(&self) -> Result<(), SendError> {
        let Some(from) = self.random_member() else {
            return Ok(());
        };
        let text = pick(&REPLY_LINES);
        self.send_payload(&ChannelMessage::Chat { from: from.to_owned(), text: text.to_owned() })
            .await
    }

    async fn member_sends_gift(&mut self) -> Result<(), SendError> {
        let Some(from) = self.random_member() else {
            return Ok(());
        };
        let gift = GiftId(rand::rng().random_range(0..GIFT_CATALOG.len()) as u8);

        self.add_points(from, gift);
        self.send_payload(&ChannelMessage::Gift { from: from.to_owned(), gift }).await?;

        let mut entries = self.rank.clone();
        entries.truncate(RANK_SIZE);
        self.send_payload(&ChannelMessage::GiftRank { entries }).await
    }

    async fn seat_changes(&mut self) -> Result<(), SendError> {
        let Some(nickname) = self.random_member() else {
            return Ok(());
        };
        let index = usize::from(rand::rng().random_range(0..SEAT_COUNT));
        let Some(seat) = self.seats.get_mut(index) else {
            return Ok(());
        };

        match seat.state {
            SeatState::Taken => {
                seat.state = SeatState::Open;
                seat.occupant = None;
            },
            SeatState::Open | SeatState::Locked => {
                seat.state = SeatState::Taken;
                seat.occupant = Some(SeatOccupant {
                    uid: OWNER_UID + 100 + index as Uid,
                    nickname: nickname.to_owned(),
                    muted: false,
                });
            },
        }

        self.send_payload(&ChannelMessage::SeatState { seats: self.seats.clone() }).await
    }

    async fn tick_pk(&mut self) -> Result<(), SendError> {
        let Some(mut snapshot) = self.pk.take() else {
            if rand::rng().random_range(0..8) == 0 {
                let snapshot = PkSnapshot {
                    opponent_room: PK_OPPONENT.to_owned(),
                    our_points: 0,
                    their_points: 0,
                    seconds_left: PK_ROUND_SECONDS,
                };
                self.pk = Some(snapshot.clone());
                return self.send_payload(&ChannelMessage::Pk(snapshot)).await;
            }
            return Ok(());
        };

        snapshot.seconds_left = snapshot.seconds_left.saturating_sub(PK_TICK_SECONDS);
        snapshot.our_points += rand::rng().random_range(0..40);
        snapshot.their_points += rand::rng().random_range(0..40);
        if snapshot.seconds_left > 0 {
            self.pk = Some(snapshot.clone());
        }
        self.send_payload(&ChannelMessage::Pk(snapshot)).await
    }

    async fn owner_state_flips(&mut self) -> Result<(), SendError> {
        // When we broadcast, we are the owner; nobody flips our state.
        if self.role == ClientRole::Broadcaster {
            return Ok(());
        }

        self.owner_paused = !self.owner_paused;
        let state = if self.owner_paused { OwnerState::Paused } else { OwnerState::Online };

        self.send_payload(&ChannelMessage::OwnerState { state }).await?;
        self.emit(SdkEvent::RemoteVideoState { uid: OWNER_UID, live: !self.owner_paused }).await
    }

    fn random_member(&self) -> Option<&'static str> {
        if self.present.is_empty() {
            return None;
        }
        self.present.get(rand::rng().random_range(0..self.present.len())).copied()
    }

    fn add_points(&mut self, nickname: &str, gift: GiftId) {
        let Some(info) = gift.info() else {
            return;
        };
        match self.rank.iter_mut().find(|entry| entry.nickname == nickname) {
            Some(entry) => entry.points += info.points,
            None => {
                self.rank.push(RankEntry { nickname: nickname.to_owned(), points: info.points });
            },
        }
        self.rank.sort_by(|a, b| b.points.cmp(&a.points));
    }

    fn member_count(&self) -> u32 {
        // Us, the owner when we are watching, and the scripted members.
        let owner = u32::from(self.role == ClientRole::Audience);
        1 + owner + self.present.len() as u32
    }
}

fn pick(lines: &'static [&'static str]) -> &'static str {
    lines.get(rand::rng().random_range(0..lines.len())).copied().unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use liveroom_session::Permission;

    use super::*;

    async fn next_event(handle: &mut SdkHandle) -> SdkEvent {
        tokio::time::timeout(Duration::from_secs(2), handle.events.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn join_commands_answer_with_callbacks() {
        let mut handle = spawn_sdk(SdkConfig::default());

        handle
            .commands
            .send(SdkCommand::JoinMessaging { channel: "lounge".to_owned() })
            .await
            .unwrap();

        assert!(matches!(next_event(&mut handle).await, SdkEvent::MessagingJoined));
        assert!(matches!(next_event(&mut handle).await, SdkEvent::MemberCount { .. }));

        handle.stop();
    }

    #[tokio::test]
    async fn denied_permissions_split_the_result() {
        let mut denied = PermissionSet::empty();
        denied.insert(Permission::Camera);
        let mut handle = spawn_sdk(SdkConfig { denied, ..SdkConfig::default() });

        handle
            .commands
            .send(SdkCommand::RequestPermissions { permissions: PermissionSet::all() })
            .await
            .unwrap();

        let SdkEvent::PermissionResult { granted, denied } = next_event(&mut handle).await else {
            panic!("expected a permission result");
        };
        assert!(!granted.contains(Permission::Camera));
        assert!(granted.contains(Permission::Microphone));
        assert!(granted.contains(Permission::Storage));
        assert!(denied.contains(Permission::Camera));

        handle.stop();
    }

    #[tokio::test]
    async fn failed_messaging_join_reports_the_reason() {
        let config = SdkConfig { fail_messaging_join: true, ..SdkConfig::default() };
        let mut handle = spawn_sdk(config);

        handle
            .commands
            .send(SdkCommand::JoinMessaging { channel: "lounge".to_owned() })
            .await
            .unwrap();

        assert!(matches!(next_event(&mut handle).await, SdkEvent::MessagingJoinFailed { .. }));

        handle.stop();
    }

    #[tokio::test]
    async fn scripted_members_generate_traffic() {
        let config =
            SdkConfig { traffic_period: Duration::from_millis(10), ..SdkConfig::default() };
        let mut handle = spawn_sdk(config);

        handle
            .commands
            .send(SdkCommand::JoinMessaging { channel: "lounge".to_owned() })
            .await
            .unwrap();

        // Drain until a scripted member shows up.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            assert!(std::time::Instant::now() < deadline, "no scripted traffic arrived");
            if matches!(next_event(&mut handle).await, SdkEvent::MemberJoined { .. }) {
                break;
            }
        }

        handle.stop();
    }
}
