pub mod command;
pub mod notebook;
pub mod preprocess;
pub mod search;
pub mod session;

pub use command::{Command, parse_command};
pub use notebook::Notebook;
pub use search::{Completion, run_search};
pub use session::{Resolution, Session, SubmitOutcome, Ticket};
