//! Static gift catalog.
//!
//! Gifts travel as catalog indices on the messaging channel; the catalog
//! resolves an index to a display name, icon, and point value. Unknown
//! indices resolve to `None` and render with [`UNKNOWN_GIFT_ICON`] rather
//! than being trusted as array positions.

use serde::{Deserialize, Serialize};

/// Index of a gift in [`GIFT_CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftId(pub u8);

/// Catalog entry for one gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftInfo {
    /// Display name.
    pub name: &'static str,
    /// Icon glyph shown next to the gift message.
    pub icon: &'static str,
    /// Point value credited to the gift rank.
    pub points: u32,
}

/// Icon used when a gift index is not in the catalog.
pub const UNKNOWN_GIFT_ICON: &str = "🎁";

/// The gift catalog, indexed by [`GiftId`].
pub const GIFT_CATALOG: [GiftInfo; 8] = [
    GiftInfo { name: "Rose", icon: "🌹", points: 20 },
    GiftInfo { name: "Ice Cream", icon: "🍦", points: 30 },
    GiftInfo { name: "Cheers", icon: "🍻", points: 40 },
    GiftInfo { name: "Cake", icon: "🎂", points: 200 },
    GiftInfo { name: "Ring", icon: "💍", points: 500 },
    GiftInfo { name: "Watch", icon: "⌚", points: 1000 },
    GiftInfo { name: "Crystal", icon: "💎", points: 1500 },
    GiftInfo { name: "Rocket", icon: "🚀", points: 3000 },
];

impl GiftId {
    /// Catalog entry for this id. `None` if the index is out of range.
    pub fn info(self) -> Option<&'static GiftInfo> {
        GIFT_CATALOG.get(usize::from(self.0))
    }

    /// Icon for this id, falling back to [`UNKNOWN_GIFT_ICON`].
    pub fn icon(self) -> &'static str {
        self.info().map_or(UNKNOWN_GIFT_ICON, |info| info.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_resolves_its_own_entry() {
        for (index, entry) in GIFT_CATALOG.iter().enumerate() {
            let id = GiftId(index as u8);
            assert_eq!(id.info(), Some(entry));
            assert_eq!(id.icon(), entry.icon);
        }
    }

    #[test]
    fn out_of_range_index_resolves_to_none() {
        let id = GiftId(GIFT_CATALOG.len() as u8);

        assert_eq!(id.info(), None);
        assert_eq!(id.icon(), UNKNOWN_GIFT_ICON);
    }

    #[test]
    fn max_index_resolves_to_fallback() {
        assert_eq!(GiftId(u8::MAX).icon(), UNKNOWN_GIFT_ICON);
    }
}
