//! Shared core for the zone slider clock
//!
//! Fixed-offset time arithmetic, the ordered zone list, and config files.

pub mod config;
pub mod time_model;
pub mod zone_list;

pub use config::{load_config, save_config, ConfigError};
pub use time_model::{displayed_time, DisplayedTime, Meridiem, TimeModel};
pub use zone_list::{default_zones, TimeZoneEntry, ZoneList, ZoneListError};
