use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref USER_MENTION: Regex = Regex::new(r"^<@!?(\d{15,20})>$").unwrap();
    pub static ref CHANNEL_MENTION: Regex = Regex::new(r"^<#(\d{15,20})>$").unwrap();
    pub static ref ROLE_MENTION: Regex = Regex::new(r"^<@&(\d{15,20})>$").unwrap();
    pub static ref RAW_ID: Regex = Regex::new(r"^\d{15,20}$").unwrap();
    pub static ref DISCORD_TIMESTAMP: Regex = Regex::new(r"^<t:(-?\d{1,13})(?::([a-zA-Z]))?>$").unwrap();
    pub static ref EMAIL: Regex = Regex::new(r"^[\w.+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap();
}
