//! Copying datasets into and out of iRODS.
//!
//! A dataset with uuid `U` lives in the collection `<zone>/U`, holding one
//! object per content identifier plus `manifest.json`, `dtool` (the admin
//! metadata) and `README.yml`.

mod get;
mod put;
pub mod report;

pub use get::get_dataset;
pub use put::put_dataset;
pub use report::{Invocation, TransferReport};
