//! The built-in converters.

pub mod boolean;
pub mod choice;
pub mod coalescing_string;
pub mod color;
pub mod decimal;
pub mod duration;
pub mod email;
pub mod int;
pub mod mention;
pub mod string;
pub mod timestamp;

pub use boolean::BooleanConverter;
pub use choice::{ChoiceEnum, EnumConverter};
pub use coalescing_string::CoalescingStringConverter;
pub use color::{Color, ColorConverter};
pub use decimal::DecimalConverter;
pub use duration::{DurationCoalescingConverter, DurationConverter};
pub use email::EmailConverter;
pub use int::IntConverter;
pub use mention::{ChannelConverter, RoleConverter, UserConverter};
pub use string::StringConverter;
pub use timestamp::TimestampConverter;
