//! Column lifecycle commands

mod delete;
mod get;
mod list;
mod mv;
mod save;

pub use delete::DeleteColumn;
pub use get::GetColumn;
pub use list::ListColumns;
pub use mv::{MoveColumnDown, MoveColumnUp};
pub use save::SaveColumn;
