//! Keys of the built-in `twex` bundle.

pub const ERROR_IN_ARGUMENT: &str = "argument_parser.error.error_in_argument";
pub const INVALID_VALUE: &str = "argument_parser.error.invalid_value";
pub const NO_FILLED_ARGUMENTS: &str = "argument_parser.error.no_filled_arguments";
pub const SOME_FILLED_ARGUMENTS: &str = "argument_parser.error.some_filled_arguments";
pub const NOT_ALL_VALID: &str = "argument_parser.error.not_all_valid";
pub const REQUIRES_ONE_VALUE: &str = "argument_parser.error.requires_one_value";

pub const CHECKS_RESPONSE_TEMPLATE: &str = "checks.response_template";
pub const PARAGRAPH_JOINER: &str = "common.paragraph_joiner";

pub const BOOLEAN_SIGNATURE_TYPE: &str = "converters.boolean.signature_type";
pub const BOOLEAN_INVALID: &str = "converters.boolean.error.invalid";

pub const NUMBER_SIGNATURE_TYPE: &str = "converters.number.signature_type";
pub const NUMBER_INVALID_DEFAULT_BASE: &str = "converters.number.error.invalid.default_base";
pub const NUMBER_INVALID_OTHER_BASE: &str = "converters.number.error.invalid.other_base";
pub const NUMBER_TOO_SMALL: &str = "converters.number.error.invalid.too_small";
pub const NUMBER_TOO_LARGE: &str = "converters.number.error.invalid.too_large";

pub const DECIMAL_SIGNATURE_TYPE: &str = "converters.decimal.signature_type";
pub const DECIMAL_INVALID: &str = "converters.decimal.error.invalid";
pub const DECIMAL_TOO_SMALL: &str = "converters.decimal.error.too_small";
pub const DECIMAL_TOO_LARGE: &str = "converters.decimal.error.too_large";

pub const STRING_SIGNATURE_TYPE: &str = "converters.string.signature_type";
pub const STRING_TOO_SHORT: &str = "converters.string.error.invalid.too_short";
pub const STRING_TOO_LONG: &str = "converters.string.error.invalid.too_long";

pub const CHOICE_INVALID: &str = "converters.choice.invalid_choice";

pub const USER_SIGNATURE_TYPE: &str = "converters.user.signature_type";
pub const USER_INVALID: &str = "converters.user.error.invalid";
pub const CHANNEL_SIGNATURE_TYPE: &str = "converters.channel.signature_type";
pub const CHANNEL_INVALID: &str = "converters.channel.error.invalid";
pub const ROLE_SIGNATURE_TYPE: &str = "converters.role.signature_type";
pub const ROLE_INVALID: &str = "converters.role.error.invalid";

pub const EMAIL_SIGNATURE_TYPE: &str = "converters.email.signature_type";
pub const EMAIL_INVALID: &str = "converters.email.error.invalid";

pub const DURATION_SIGNATURE_TYPE: &str = "converters.duration.signature_type";
pub const DURATION_HELP: &str = "converters.duration.help";
pub const DURATION_BAD_UNIT_PAIRS: &str = "converters.duration.error.bad_unit_pairs";
pub const DURATION_INVALID_UNIT: &str = "converters.duration.error.invalid_unit";
pub const DURATION_INVALID_VALUE: &str = "converters.duration.error.invalid_value";
pub const DURATION_POSITIVE_ONLY: &str = "converters.duration.error.positive_only";

pub const TIMESTAMP_SIGNATURE_TYPE: &str = "converters.timestamp.signature_type";
pub const TIMESTAMP_INVALID: &str = "converters.timestamp.error.invalid";

pub const COLOR_SIGNATURE_TYPE: &str = "converters.color.signature_type";
pub const COLOR_UNKNOWN: &str = "converters.color.error.unknown";
pub const COLOR_UNKNOWN_OR_FAILED: &str = "converters.color.error.unknown_or_failed";

pub const BOOLEANS_TRUE: &str = "utils.booleans.true";
pub const BOOLEANS_FALSE: &str = "utils.booleans.false";

pub const DURATIONS_SECONDS: &str = "utils.durations.seconds";
pub const DURATIONS_MINUTES: &str = "utils.durations.minutes";
pub const DURATIONS_HOURS: &str = "utils.durations.hours";
pub const DURATIONS_DAYS: &str = "utils.durations.days";
pub const DURATIONS_WEEKS: &str = "utils.durations.weeks";
pub const DURATIONS_MONTHS: &str = "utils.durations.months";
pub const DURATIONS_YEARS: &str = "utils.durations.years";
pub const DURATIONS_IGNORED_WORDS: &str = "utils.durations.ignored_words";

pub const DURATIONS_FORMAT_SEPARATOR: &str = "utils.durations.format.separator";
pub const DURATIONS_FORMAT_SECONDS_ONE: &str = "utils.durations.format.seconds.one";
pub const DURATIONS_FORMAT_SECONDS_OTHER: &str = "utils.durations.format.seconds.other";
pub const DURATIONS_FORMAT_MINUTES_ONE: &str = "utils.durations.format.minutes.one";
pub const DURATIONS_FORMAT_MINUTES_OTHER: &str = "utils.durations.format.minutes.other";
pub const DURATIONS_FORMAT_HOURS_ONE: &str = "utils.durations.format.hours.one";
pub const DURATIONS_FORMAT_HOURS_OTHER: &str = "utils.durations.format.hours.other";
pub const DURATIONS_FORMAT_DAYS_ONE: &str = "utils.durations.format.days.one";
pub const DURATIONS_FORMAT_DAYS_OTHER: &str = "utils.durations.format.days.other";
pub const DURATIONS_FORMAT_WEEKS_ONE: &str = "utils.durations.format.weeks.one";
pub const DURATIONS_FORMAT_WEEKS_OTHER: &str = "utils.durations.format.weeks.other";
pub const DURATIONS_FORMAT_MONTHS_ONE: &str = "utils.durations.format.months.one";
pub const DURATIONS_FORMAT_MONTHS_OTHER: &str = "utils.durations.format.months.other";
pub const DURATIONS_FORMAT_YEARS_ONE: &str = "utils.durations.format.years.one";
pub const DURATIONS_FORMAT_YEARS_OTHER: &str = "utils.durations.format.years.other";

/// Comma-separated names for each colour, keyed by `utils.colors.<colour>`.
pub const COLORS_PREFIX: &str = "utils.colors";

pub const ALL: &[&str] = &[
    ERROR_IN_ARGUMENT,
    INVALID_VALUE,
    NO_FILLED_ARGUMENTS,
    SOME_FILLED_ARGUMENTS,
    NOT_ALL_VALID,
    REQUIRES_ONE_VALUE,
    CHECKS_RESPONSE_TEMPLATE,
    PARAGRAPH_JOINER,
    BOOLEAN_SIGNATURE_TYPE,
    BOOLEAN_INVALID,
    NUMBER_SIGNATURE_TYPE,
    NUMBER_INVALID_DEFAULT_BASE,
    NUMBER_INVALID_OTHER_BASE,
    NUMBER_TOO_SMALL,
    NUMBER_TOO_LARGE,
    DECIMAL_SIGNATURE_TYPE,
    DECIMAL_INVALID,
    DECIMAL_TOO_SMALL,
    DECIMAL_TOO_LARGE,
    STRING_SIGNATURE_TYPE,
    STRING_TOO_SHORT,
    STRING_TOO_LONG,
    CHOICE_INVALID,
    USER_SIGNATURE_TYPE,
    USER_INVALID,
    CHANNEL_SIGNATURE_TYPE,
    CHANNEL_INVALID,
    ROLE_SIGNATURE_TYPE,
    ROLE_INVALID,
    EMAIL_SIGNATURE_TYPE,
    EMAIL_INVALID,
    DURATION_SIGNATURE_TYPE,
    DURATION_HELP,
    DURATION_BAD_UNIT_PAIRS,
    DURATION_INVALID_UNIT,
    DURATION_INVALID_VALUE,
    DURATION_POSITIVE_ONLY,
    TIMESTAMP_SIGNATURE_TYPE,
    TIMESTAMP_INVALID,
    COLOR_SIGNATURE_TYPE,
    COLOR_UNKNOWN,
    COLOR_UNKNOWN_OR_FAILED,
    BOOLEANS_TRUE,
    BOOLEANS_FALSE,
    DURATIONS_SECONDS,
    DURATIONS_MINUTES,
    DURATIONS_HOURS,
    DURATIONS_DAYS,
    DURATIONS_WEEKS,
    DURATIONS_MONTHS,
    DURATIONS_YEARS,
    DURATIONS_IGNORED_WORDS,
    DURATIONS_FORMAT_SEPARATOR,
    DURATIONS_FORMAT_SECONDS_ONE,
    DURATIONS_FORMAT_SECONDS_OTHER,
    DURATIONS_FORMAT_MINUTES_ONE,
    DURATIONS_FORMAT_MINUTES_OTHER,
    DURATIONS_FORMAT_HOURS_ONE,
    DURATIONS_FORMAT_HOURS_OTHER,
    DURATIONS_FORMAT_DAYS_ONE,
    DURATIONS_FORMAT_DAYS_OTHER,
    DURATIONS_FORMAT_WEEKS_ONE,
    DURATIONS_FORMAT_WEEKS_OTHER,
    DURATIONS_FORMAT_MONTHS_ONE,
    DURATIONS_FORMAT_MONTHS_OTHER,
    DURATIONS_FORMAT_YEARS_ONE,
    DURATIONS_FORMAT_YEARS_OTHER,
];
