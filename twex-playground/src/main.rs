use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use twex_common::util::tracing_init;
use twex_core::command::converters::coalescing::{CoalescingConverter, CoalescingParse};
use twex_core::command::converters::impls::{BooleanConverter, CoalescingStringConverter, DurationCoalescingConverter};
use twex_core::command::converters::single::SingleParse;
use twex_core::command::converters::wrappers::{CoalescingToDefaultingConverter, SingleToDefaultingConverter};
use twex_core::command::errors::{ErrorSeverity, GetErrorSeverity};
use twex_core::durations::TIME_UNITS;
use twex_core::i18n::BundledTranslations;
use twex_core::{
    ArgumentKey, Arguments, ArgumentsError, ChatCommandParser, CommandArguments, CommandCtxt, CommandData, Source,
    slash_command_options,
};

struct Remind {
    when: ArgumentKey<CoalescingConverter<DurationCoalescingConverter>>,
    // before `message`, which would otherwise swallow it
    repeat: ArgumentKey<SingleToDefaultingConverter<BooleanConverter>>,
    message: ArgumentKey<CoalescingToDefaultingConverter<CoalescingStringConverter>>,
}

impl CommandArguments for Remind {
    fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
        Ok(Self {
            when: args.arg(
                "when",
                "How long until the reminder",
                DurationCoalescingConverter::new().coalescing(),
            ),
            repeat: args.arg(
                "repeat",
                "Whether the reminder repeats",
                BooleanConverter::new().single().to_defaulting(false)?,
            ),
            message: args.arg(
                "message",
                "What to be reminded of",
                CoalescingStringConverter::new()
                    .coalescing()
                    .to_defaulting("something".to_owned())?,
            ),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_init();

    let translations = Arc::new(BundledTranslations::from_config()?);
    TIME_UNITS.invalidate_all();

    let data = CommandData::new(Source::RawMessage, "remind", translations);
    let cx = CommandCtxt::new(&data);

    info!("Usage: remind {}", ChatCommandParser::signature::<Remind>(&cx)?);
    println!("{}", serde_json::to_string_pretty(&slash_command_options::<Remind>()?)?);

    let parser = ChatCommandParser::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parser.parse::<Remind>(&cx, &line).await {
            Ok(parsed) => {
                let when = parsed.get(&parsed.when)?;
                println!(
                    "in {} (~{}s): {} (repeating: {})",
                    when.localized(data.translations.as_ref(), cx.locale()),
                    when.approximate_seconds(),
                    parsed.get(&parsed.message)?,
                    parsed.get(&parsed.repeat)?
                );
            },
            Err(e) if e.get_severity() == ErrorSeverity::Low => println!("{e}"),
            Err(e) => error!("{e:?}"),
        }
    }

    Ok(())
}
