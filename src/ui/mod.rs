//! View models for the journal screens: create form, entry list, entry card.
//!
//! Views are plain values with a `Display` impl so the terminal front end and
//! tests can render them without a widget toolkit.

pub use self::card::{CardView, EntryCard, CLOSE_PROMPT};
pub use self::create::{CreateForm, CreateView};
pub use self::list::ListView;

mod card;
mod create;
mod list;

pub const CONNECT_WALLET: &str = "Please connect your wallet to create a journal entry.";

/// Asks the user to accept a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Shortens long identifiers to `abcd..wxyz`.
pub fn ellipsify(s: &str, len: usize) -> String {
    if s.chars().count() <= 30 {
        return s.to_string();
    }
    let head: String = s.chars().take(len).collect();
    let tail: String = s.chars().rev().take(len).collect::<Vec<_>>().into_iter().rev().collect();
    format!("{head}..{tail}")
}
