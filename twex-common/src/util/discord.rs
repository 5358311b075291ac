use std::fmt::Display;

use time::OffsetDateTime;
use twilight_model::id::marker::{ChannelMarker, RoleMarker, UserMarker};
use twilight_model::id::Id;

use super::regex;

fn capture_id(re: &::regex::Regex, text: &str) -> Option<u64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn raw_id(text: &str) -> Option<u64> {
    if regex::RAW_ID.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Extracts a user ID from a `<@id>`/`<@!id>` mention or a bare ID.
pub fn user_mention_to_id(text: &str) -> Option<Id<UserMarker>> {
    capture_id(&regex::USER_MENTION, text)
        .or_else(|| raw_id(text))
        .and_then(Id::new_checked)
}

/// Extracts a channel ID from a `<#id>` mention or a bare ID.
pub fn channel_mention_to_id(text: &str) -> Option<Id<ChannelMarker>> {
    capture_id(&regex::CHANNEL_MENTION, text)
        .or_else(|| raw_id(text))
        .and_then(Id::new_checked)
}

/// Extracts a role ID from a `<@&id>` mention or a bare ID.
pub fn role_mention_to_id(text: &str) -> Option<Id<RoleMarker>> {
    capture_id(&regex::ROLE_MENTION, text)
        .or_else(|| raw_id(text))
        .and_then(Id::new_checked)
}

/// The display styles Discord knows, like `R` for relative time.
pub const TIMESTAMP_STYLES: [char; 7] = ['t', 'T', 'd', 'D', 'f', 'F', 'R'];

/// A parsed `<t:seconds:style>` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscordTimestamp {
    pub unix_seconds: i64,
    pub style: Option<char>,
}

impl DiscordTimestamp {
    pub fn datetime(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.unix_seconds).ok()
    }
}

impl Display for DiscordTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.style {
            Some(style) => write!(f, "<t:{}:{style}>", self.unix_seconds),
            None => write!(f, "<t:{}>", self.unix_seconds),
        }
    }
}

/// Parses `<t:seconds>` or `<t:seconds:style>`. A style Discord doesn't know is dropped.
pub fn parse_discord_timestamp(text: &str) -> Option<DiscordTimestamp> {
    let captures = regex::DISCORD_TIMESTAMP.captures(text)?;
    let unix_seconds = captures.get(1)?.as_str().parse().ok()?;
    let style = captures
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .filter(|style| TIMESTAMP_STYLES.contains(style));

    Some(DiscordTimestamp { unix_seconds, style })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: u64 = 571661221854707713;

    #[test]
    fn user_mentions() {
        assert_eq!(user_mention_to_id(&format!("<@{ID}>")), Some(Id::new(ID)));
        assert_eq!(user_mention_to_id(&format!("<@!{ID}>")), Some(Id::new(ID)));
        assert_eq!(user_mention_to_id(&ID.to_string()), Some(Id::new(ID)));
        assert_eq!(user_mention_to_id(&format!("<#{ID}>")), None);
        assert_eq!(user_mention_to_id("apples"), None);
    }

    #[test]
    fn channel_and_role_mentions() {
        assert_eq!(channel_mention_to_id(&format!("<#{ID}>")), Some(Id::new(ID)));
        assert_eq!(role_mention_to_id(&format!("<@&{ID}>")), Some(Id::new(ID)));
        assert_eq!(role_mention_to_id(&format!("<@{ID}>")), None);
    }

    #[test]
    fn zero_id_is_rejected() {
        assert_eq!(user_mention_to_id("000000000000000000"), None);
    }

    #[test]
    fn timestamps() {
        assert_eq!(
            parse_discord_timestamp("<t:1700000000:R>"),
            Some(DiscordTimestamp {
                unix_seconds: 1700000000,
                style: Some('R')
            })
        );
        assert_eq!(
            parse_discord_timestamp("<t:1700000000>"),
            Some(DiscordTimestamp {
                unix_seconds: 1700000000,
                style: None
            })
        );
        assert_eq!(parse_discord_timestamp("<t:abc>"), None);
    }

    #[test]
    fn unknown_timestamp_styles_are_dropped() {
        let timestamp = parse_discord_timestamp("<t:1700000000:x>").unwrap();

        assert_eq!(timestamp.style, None);
        assert_eq!(timestamp.to_string(), "<t:1700000000>");
        assert_eq!(
            parse_discord_timestamp("<t:1700000000:F>").unwrap().to_string(),
            "<t:1700000000:F>"
        );
        assert_eq!(timestamp.datetime().map(|d| d.year()), Some(2023));
    }
}
