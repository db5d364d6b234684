pub mod collate;
pub mod config_cmd;
pub mod format;
