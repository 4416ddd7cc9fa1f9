//! Text object registrations.
//!
//! Each file in this directory registers one or more text objects.
//! The linkme distributed slice collects them at link time.

mod argument;
mod line;
mod number;
mod paragraph;
mod quotes;
mod surround;
mod word;
