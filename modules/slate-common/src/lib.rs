pub mod config;
pub mod types;

pub use config::Config;
pub use types::{
    master_title, normalize_master, FormValues, MasterItem, UpdateNotification, KNOWN_MASTERS,
    MASTER_UPDATE_KEY,
};
