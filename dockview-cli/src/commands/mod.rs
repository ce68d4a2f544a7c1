//! One-shot subcommands that print to stdout and exit.

mod doctor;
mod ls;

pub use doctor::run_doctor;
pub use ls::write_listing;
