//! Command registrations.
//!
//! Each file in this directory registers one or more commands.
//! The linkme distributed slice collects them at link time.

mod buffer;
mod cabi;
mod edit;
mod help;
mod quit;
mod write;
