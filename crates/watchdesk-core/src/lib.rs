pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod selection;
pub mod source;
pub mod store;
pub mod summary;
pub mod types;

pub use confirm::{confirm_dialog, ConfirmDialog};
pub use dashboard::*;
pub use error::*;
pub use filter::*;
pub use navigation::*;
pub use selection::*;
pub use source::*;
pub use store::*;
pub use summary::*;
pub use types::*;
