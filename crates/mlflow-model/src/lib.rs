mod config;
mod database;
mod error;
mod image;
mod inputs;
mod object_storage;
mod relation;
mod status;
mod version;

pub use config::*;
pub use database::*;
pub use error::*;
pub use image::*;
pub use inputs::*;
pub use object_storage::*;
pub use relation::*;
pub use status::*;
pub use version::*;
