//! Render mapping for feed messages.
//!
//! [`render_row`] is the presentation adapter: a pure function from a
//! [`FeedMessage`] to a [`RenderRow`] of styled segments. Frontends map
//! [`Emphasis`] to their own styling; nothing here depends on a UI toolkit,
//! so the mapping is testable without one.

use crate::{FeedMessage, Presence};

/// Template appended after the nickname of a join notice.
const JOINED_TEMPLATE: &str = " joined the room";

/// Template appended after the nickname of a leave notice.
const LEFT_TEMPLATE: &str = " left the room";

/// Fixed body of a gift acknowledgment.
const GIFT_TEMPLATE: &str = "sent a gift";

/// View kind selector for a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Join/leave notice.
    System,
    /// Chat line.
    Chat,
    /// Gift acknowledgment.
    Gift,
}

/// Styling class of a rendered segment.
///
/// The reference styling distinguishes the author (bold white) from the
/// muted body (rgb 196,196,196); notices render dimmer still.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Message author, visually distinguished from the body.
    Author,
    /// Message body, muted relative to the author.
    Body,
    /// System notice.
    Notice,
}

/// One styled run of text in a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text content of the run.
    pub text: String,
    /// Styling class.
    pub emphasis: Emphasis,
}

/// Framework-independent rendering of one feed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    /// View kind the row should be rendered as.
    pub kind: RowKind,
    /// Styled text runs, in display order.
    pub segments: Vec<Segment>,
    /// Gift icon glyph. `None` for non-gift rows.
    pub icon: Option<&'static str>,
}

/// Map a feed message to its render row.
///
/// Chat renders as `"{author}: {text}"` with the author distinguished; gifts
/// substitute the fixed gift body and resolve their catalog icon; system
/// notices pick the join or leave template.
pub fn render_row(message: &FeedMessage) -> RenderRow {
    match message {
        FeedMessage::System { nickname, presence } => {
            let template = match presence {
                Presence::Joined => JOINED_TEMPLATE,
                Presence::Left => LEFT_TEMPLATE,
            };
            RenderRow {
                kind: RowKind::System,
                segments: vec![Segment {
                    text: format!("{nickname}{template}"),
                    emphasis: Emphasis::Notice,
                }],
                icon: None,
            }
        },
        FeedMessage::Chat { author, text } => RenderRow {
            kind: RowKind::Chat,
            segments: vec![
                Segment { text: format!("{author}: "), emphasis: Emphasis::Author },
                Segment { text: text.clone(), emphasis: Emphasis::Body },
            ],
            icon: None,
        },
        FeedMessage::Gift { author, gift } => RenderRow {
            kind: RowKind::Gift,
            segments: vec![
                Segment { text: format!("{author}: "), emphasis: Emphasis::Author },
                Segment { text: GIFT_TEMPLATE.to_string(), emphasis: Emphasis::Body },
            ],
            icon: Some(gift.icon()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GIFT_CATALOG, GiftId, UNKNOWN_GIFT_ICON};

    fn row_text(row: &RenderRow) -> String {
        row.segments.iter().map(|segment| segment.text.as_str()).collect()
    }

    #[test]
    fn chat_row_distinguishes_author_from_body() {
        let message =
            FeedMessage::Chat { author: "mira".to_string(), text: "hello there".to_string() };
        let row = render_row(&message);

        assert_eq!(row.kind, RowKind::Chat);
        assert_eq!(row_text(&row), "mira: hello there");
        assert_eq!(row.segments[0].emphasis, Emphasis::Author);
        assert_eq!(row.segments[1].emphasis, Emphasis::Body);
        assert_eq!(row.icon, None);
    }

    #[test]
    fn gift_row_resolves_catalog_icon() {
        for (index, entry) in GIFT_CATALOG.iter().enumerate() {
            let message = FeedMessage::Gift { author: "jon".to_string(), gift: GiftId(index as u8) };
            let row = render_row(&message);

            assert_eq!(row.kind, RowKind::Gift);
            assert_eq!(row_text(&row), "jon: sent a gift");
            assert_eq!(row.icon, Some(entry.icon), "gift index {index} resolves its own icon");
        }
    }

    #[test]
    fn gift_row_out_of_range_uses_fallback_icon() {
        let message = FeedMessage::Gift { author: "jon".to_string(), gift: GiftId(200) };
        let row = render_row(&message);

        assert_eq!(row.icon, Some(UNKNOWN_GIFT_ICON));
    }

    #[test]
    fn system_row_uses_join_template() {
        let message =
            FeedMessage::System { nickname: "petra".to_string(), presence: Presence::Joined };
        let row = render_row(&message);

        assert_eq!(row.kind, RowKind::System);
        assert_eq!(row_text(&row), "petra joined the room");
        assert_eq!(row.segments[0].emphasis, Emphasis::Notice);
    }

    #[test]
    fn system_row_uses_leave_template() {
        let message =
            FeedMessage::System { nickname: "petra".to_string(), presence: Presence::Left };
        let row = render_row(&message);

        assert_eq!(row_text(&row), "petra left the room");
    }
}
