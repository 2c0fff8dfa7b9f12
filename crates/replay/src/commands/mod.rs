//! Subcommands of the `replay` binary.

mod actions;
mod audit;
mod check_content;
mod run;

pub use actions::Actions;
pub use audit::Audit;
pub use check_content::CheckContent;
pub use run::Run;
