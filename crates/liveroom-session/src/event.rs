//! Session events, SDK commands, and actions.

use liveroom_core::{
    ClientRole, FeedMessage, GiftId, OwnerState, PkSnapshot, Presence, RankEntry, SeatInfo, Uid,
};

use crate::permission::PermissionSet;
use crate::session::SessionPhase;

/// Events the caller feeds into the session.
///
/// Two things flow in here: SDK callbacks, already marshaled onto a single
/// consumer, and user intents (send chat, toggle capture, close). The
/// session itself performs no IO; every effect comes back out as a
/// [`SessionAction`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User entered the room screen.
    ///
    /// `granted` carries the permissions already held. When any are
    /// missing, the session asks for the rest before initializing.
    Enter {
        /// Permissions already granted by the platform.
        granted: PermissionSet,
    },

    /// Callback delivered by the SDK boundary.
    Sdk(SdkEvent),

    /// User wants to send a chat line to the room.
    SendChat {
        /// Chat text.
        text: String,
    },

    /// User wants to start local capture.
    StartCapture,

    /// User wants to stop local capture.
    StopCapture,

    /// User wants to switch between front and rear cameras.
    SwitchCamera,

    /// User toggled the beauty filter.
    SetBeauty {
        /// Whether the filter should be on.
        enabled: bool,
    },

    /// User is leaving the room screen.
    Close,
}

/// Callbacks arriving from the SDK boundary.
///
/// The driver marshals these from whatever threads the SDKs use onto the
/// single consumer before handing them to the session.
#[derive(Debug, Clone)]
pub enum SdkEvent {
    /// Platform answered a permission request.
    PermissionResult {
        /// Permissions the user granted.
        granted: PermissionSet,
        /// Permissions the user denied.
        denied: PermissionSet,
    },

    /// Messaging channel join completed.
    MessagingJoined,

    /// Messaging channel join failed.
    MessagingJoinFailed {
        /// SDK diagnostic.
        reason: String,
    },

    /// Messaging channel was left.
    MessagingLeft,

    /// Media transport join completed.
    MediaJoined {
        /// Uid the transport assigned us.
        uid: Uid,
    },

    /// A member joined the messaging channel.
    MemberJoined {
        /// Nickname of the member.
        nickname: String,
    },

    /// A member left the messaging channel.
    MemberLeft {
        /// Nickname of the member.
        nickname: String,
    },

    /// Messaging channel member count changed.
    MemberCount {
        /// Current member count.
        count: u32,
    },

    /// Text payload arrived on the messaging channel.
    ChannelText {
        /// Raw JSON payload.
        json: String,
    },

    /// A remote uid started or stopped publishing video.
    RemoteVideoState {
        /// Remote uid.
        uid: Uid,
        /// Whether the uid is publishing.
        live: bool,
    },
}

/// Commands the session asks the SDK boundary to run.
///
/// The driver owns the actual SDK handles; the session only names the
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCommand {
    /// Ask the platform for runtime permissions.
    RequestPermissions {
        /// Permissions still missing.
        permissions: PermissionSet,
    },

    /// Create the messaging client and register its handler.
    InitMessaging,

    /// Register the local video channel with the media engine.
    RegisterVideoChannel,

    /// Configure the media engine for our role.
    ConfigureMedia {
        /// Broadcaster publishes, audience only subscribes.
        role: ClientRole,
    },

    /// Join the media transport channel.
    JoinMedia {
        /// Channel name.
        channel: String,
        /// Uid to join as, 0 asks the transport to assign one.
        uid: Uid,
    },

    /// Leave the media transport channel.
    LeaveMedia,

    /// Join the messaging channel.
    JoinMessaging {
        /// Channel name.
        channel: String,
    },

    /// Leave the messaging channel.
    LeaveMessaging,

    /// Start local camera capture and preview.
    StartCapture,

    /// Stop local camera capture and preview.
    StopCapture,

    /// Switch between front and rear cameras.
    SwitchCamera,

    /// Enable or disable the capture pre-process filter.
    SetPreProcess {
        /// Whether the filter should be on.
        enabled: bool,
    },

    /// Attach a remote uid's video stream to the stage.
    BindRemoteVideo {
        /// Remote uid.
        uid: Uid,
    },

    /// Detach a remote uid's video stream from the stage.
    ReleaseRemoteVideo {
        /// Remote uid.
        uid: Uid,
    },

    /// Send an encoded payload on the messaging channel.
    SendChannelMessage {
        /// Encoded JSON payload.
        json: String,
    },

    /// Leave the room screen.
    ///
    /// Emitted after teardown commands so the caller dismisses the screen
    /// only once the SDK work is queued.
    CloseScreen,
}

/// State changes the session reports to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomUpdate {
    /// Bootstrap phase changed.
    PhaseChanged {
        /// New phase.
        phase: SessionPhase,
    },

    /// Both channels are joined; the room is live.
    RoomEntered,

    /// A feed message should be appended.
    Feed(FeedMessage),

    /// Messaging channel member count changed.
    MemberCount {
        /// Current member count.
        count: u32,
    },

    /// Gift rank standings changed.
    Rank {
        /// Ranked members, best first.
        entries: Vec<RankEntry>,
    },

    /// Guest seat layout changed.
    Seats {
        /// All seats, in position order.
        seats: Vec<SeatInfo>,
    },

    /// PK battle standing changed.
    Pk {
        /// Current snapshot.
        snapshot: PkSnapshot,
    },

    /// Room owner's media state changed.
    OwnerState {
        /// New owner state.
        state: OwnerState,
    },

    /// A remote uid appeared on or left the stage.
    StageChanged {
        /// Remote uid.
        uid: Uid,
        /// Whether the uid is publishing.
        live: bool,
    },

    /// The user denied a required permission; the session is over.
    PermissionDenied {
        /// Permissions that were denied.
        denied: PermissionSet,
    },

    /// Something went wrong but the session continues.
    Error {
        /// Human-readable description.
        message: String,
    },
}

/// Actions the session produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Run an SDK command.
    Command(SdkCommand),

    /// Report a state change to the presentation layer.
    Update(RoomUpdate),

    /// Emit a diagnostic line.
    Log {
        /// Text to log.
        message: String,
    },
}

impl SessionAction {
    /// Convenience constructor for feed updates.
    #[must_use]
    pub fn feed(message: FeedMessage) -> Self {
        Self::Update(RoomUpdate::Feed(message))
    }

    /// Convenience constructor for chat feed updates.
    #[must_use]
    pub fn chat(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self::feed(FeedMessage::Chat { author: author.into(), text: text.into() })
    }

    /// Convenience constructor for gift feed updates.
    #[must_use]
    pub fn gift(author: impl Into<String>, gift: GiftId) -> Self {
        Self::feed(FeedMessage::Gift { author: author.into(), gift })
    }

    /// Convenience constructor for presence feed updates.
    #[must_use]
    pub fn presence(nickname: impl Into<String>, presence: Presence) -> Self {
        Self::feed(FeedMessage::System { nickname: nickname.into(), presence })
    }
}
