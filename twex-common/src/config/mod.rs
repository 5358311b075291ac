pub mod config;

static CONFIG_LOCATION: &str = "./config.toml";

use lazy_static::lazy_static;

use crate::config::config::TwexConfig;

lazy_static! {
    pub static ref CONFIG: TwexConfig = match TwexConfig::load(CONFIG_LOCATION) {
        Ok(config) => config,
        Err(e) => panic!("Failed to load {CONFIG_LOCATION}: {e:?}"),
    };
}
