//! Game logic for the "find the hidden character" picture game.
//!
//! Everything here is plain Rust so it can be exercised natively; the
//! browser binding lives in the `waldo-wasm` crate and only feeds pointer
//! positions, timestamps and HTTP bodies into these types.

pub mod api;
pub mod character;
pub mod click;
pub mod config;
pub mod error;
pub mod found;
pub mod menu;
pub mod scores;
pub mod session;
pub mod stopwatch;

pub use api::{Backend, Method, Request, UserId};
pub use character::CharacterId;
pub use click::{ElementBox, NormalizedClick, normalize};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use found::{CompletionTracker, FoundState};
pub use menu::{HideTicket, Selection, TargetMenu};
pub use scores::ScoreEntry;
pub use session::{Completion, GameSession, ScoreRecord, VerifyOutcome};
pub use stopwatch::Stopwatch;
