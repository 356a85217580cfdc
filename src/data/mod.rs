pub mod config;
pub mod persistence;
pub mod script;

pub use config::PickerConfig;
pub use persistence::Persistable;
pub use script::{Script, Step};
