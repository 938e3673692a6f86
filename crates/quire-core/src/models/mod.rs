//! Records returned by the Quire API

mod note;
mod project;
mod search;
mod user;

pub use note::{CreateNoteInput, Note};
pub use project::{ArchiveState, CreateProjectInput, Project, UpdateProjectInput};
pub use search::SearchHit;
pub use user::{ChangePasswordInput, PasswordChange, UpdateUserInput, User};
