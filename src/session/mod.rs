//! Editing Session
//!
//! The edit-command surface a front end drives, and the session that owns a
//! chain while it is being edited.

mod command;
mod editor;

pub use command::EditCommand;
pub use editor::EditSession;
