//! Line lifecycle commands

pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod seed;

pub use delete::DeleteLine;
pub use get::{GetDefaultLine, GetLine};
pub use init::InitLine;
pub use list::ListLines;
pub use seed::SeedSampleLines;
