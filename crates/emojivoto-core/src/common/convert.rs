//! Conversions between tally types and their protobuf messages.

use crate::proto;
use emojivoto_tally::{Emoji, ResultEntry};

impl From<ResultEntry> for proto::VotingResult {
    fn from(entry: ResultEntry) -> Self {
        Self {
            shortcode: entry.choice,
            votes: entry.count,
            share: entry.share,
        }
    }
}

impl From<&Emoji> for proto::Emoji {
    fn from(emoji: &Emoji) -> Self {
        Self {
            unicode: emoji.unicode.to_owned(),
            shortcode: emoji.shortcode.to_owned(),
        }
    }
}
