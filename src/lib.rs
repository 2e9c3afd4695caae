pub mod config;
pub mod contact;
pub mod contact_index;
pub mod contact_list;
pub mod history;
pub mod logging;
pub mod server;
pub mod shell;
pub mod store;
pub mod table_display;

pub use contact::ContactRecord;
pub use store::{ContactStore, SearchOutcome, SharedStore};
