use std::fmt::Display;

use async_trait::async_trait;
use twilight_model::application::command::CommandOption;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

const MAX_RGB: u32 = 0xffffff;

/// Colours that can be given by name. Each name's words are looked up under
/// `utils.colors.<name>`, so translations can add their own.
const NAMED: &[(&str, u32)] = &[
    ("gold", 0xf1c40f),
    ("teal", 0x1abc9c),
    ("darkpurple", 0x71368a),
    ("darkblue", 0x206694),
    ("salmon", 0xffa07a),
    ("lavender", 0xd1d1ff),
    ("lightred", 0xff4c4c),
    ("yellow", 0xfbf606),
    ("pink", 0xff69b4),
    ("lime", 0x00ff00),
    ("cyan", 0x08f8fc),
    ("white", 0xffffff),
    ("black", 0x010101),
    ("orange", 0xe67e22),
    ("blue", 0x3498db),
    ("purple", 0x8b00ff),
    ("green", 0x2ecc71),
    ("red", 0xe74c3c),
];

/// An RGB colour, as used for embeds and roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

fn parse_number(token: &str) -> Option<u32> {
    let value = if let Some(hex) = token.strip_prefix('#') {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        token.parse().ok()?
    };

    (value <= MAX_RGB).then_some(value)
}

fn is_numeric(token: &str) -> bool {
    token.starts_with('#')
        || token.starts_with("0x")
        || token.starts_with("0X")
        || token.chars().all(|c| c.is_ascii_digit())
}

fn named(cx: &CommandCtxt<'_>, token: &str) -> Option<u32> {
    let wanted = token.to_lowercase();

    NAMED.iter().find_map(|(name, rgb)| {
        let words = cx.translate(&format!("{}.{name}", keys::COLORS_PREFIX), &[]);
        words
            .split(',')
            .any(|word| word.trim().to_lowercase() == wanted)
            .then_some(*rgb)
    })
}

/// A colour given as `#rrggbb`, `0xrrggbb`, a decimal number or a name in the user's locale.
#[derive(Clone, Debug, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SingleParse for ColorConverter {
    type Output = Color;

    fn signature_type(&self) -> &str {
        keys::COLOR_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Color>> {
        if is_numeric(token) {
            return parse_number(token)
                .map(|rgb| Some(Color(rgb)))
                .ok_or_else(|| ConverterError::Relayed(cx.translate(keys::COLOR_UNKNOWN_OR_FAILED, &[&token])));
        }

        named(cx, token)
            .map(|rgb| Some(Color(rgb)))
            .ok_or_else(|| ConverterError::Relayed(cx.translate(keys::COLOR_UNKNOWN, &[&token])))
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        StringBuilder::new(name, description).required(true).build()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, CommandData, Source};
    use crate::i18n::{BundledTranslations, DEFAULT_BUNDLE, TranslationsProvider};

    async fn color(cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Color>> {
        ColorConverter.parse_token(cx, token).await
    }

    #[tokio::test]
    async fn numeric_forms() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        assert_eq!(color(&cx, "#ff8800").await.unwrap(), Some(Color(0xff8800)));
        assert_eq!(color(&cx, "0x5865F2").await.unwrap(), Some(Color(0x5865f2)));
        assert_eq!(color(&cx, "255").await.unwrap(), Some(Color(255)));
        assert_eq!(Color(255).to_string(), "#0000ff");

        for token in ["#ggg", "0x1000000", "16777216"] {
            let error = color(&cx, token).await.unwrap_err();
            assert!(error.to_string().starts_with(&format!("`{token}` is not a valid colour.")));
        }
    }

    #[tokio::test]
    async fn names_follow_the_locale() {
        let mut translations = BundledTranslations::default();
        translations
            .register(DEFAULT_BUNDLE, "de", "utils.colors.red = \"rot\"")
            .unwrap();
        let data = CommandData::new(Source::RawMessage, "test", Arc::new(translations));

        let english = CommandCtxt::new(&data);
        assert_eq!(color(&english, "Red").await.unwrap(), Some(Color(0xe74c3c)));
        assert_eq!(color(&english, "violet").await.unwrap(), Some(Color(0x8b00ff)));
        assert_eq!(
            color(&english, "rot").await.unwrap_err().to_string(),
            "`rot` is not a colour this bot knows."
        );

        let data = data.with_locale("de");
        let german = CommandCtxt::new(&data);
        assert_eq!(color(&german, "rot").await.unwrap(), Some(Color(0xe74c3c)));
        // untranslated names fall back to English
        assert_eq!(color(&german, "blue").await.unwrap(), Some(Color(0x3498db)));
    }

    #[test]
    fn every_name_is_translated() {
        let translations = BundledTranslations::default();

        for (name, _) in NAMED {
            let key = format!("{}.{name}", keys::COLORS_PREFIX);
            assert!(translations.get(&key, DEFAULT_BUNDLE, "en").is_some(), "{key}");
        }
    }
}
