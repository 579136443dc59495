use chrono::{DateTime, Utc};

use crate::api::UserId;
use crate::character::CharacterId;
use crate::error::{GameError, Result};
use crate::found::{CompletionTracker, FoundState};
use crate::stopwatch::Stopwatch;

/// Captured once, when the last character is found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub end_date: DateTime<Utc>,
    pub duration_seconds: u64,
}

/// What a finished verification did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Found,
    /// Confirmed again for a character that was already found.
    AlreadyFound,
    NotFound,
    /// The request failed; nothing changed and the user may click again.
    Failed,
    /// This confirmation found the last character.
    Completed(Completion),
}

/// Score ready to be posted for a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub nickname: String,
    pub duration_seconds: u64,
    pub end_date: DateTime<Utc>,
}

/// One play-through: from entering the game page to posting the score.
#[derive(Clone, Debug, Default)]
pub struct GameSession {
    user_id: Option<UserId>,
    found: FoundState,
    tracker: CompletionTracker,
    stopwatch: Stopwatch,
    completion: Option<Completion>,
    in_flight: [u32; 3],
}

impl GameSession {
    /// New session with the stopwatch already running.
    pub fn begin(now_ms: f64) -> Self {
        let mut session = Self::default();
        session.stopwatch.start(now_ms);
        session
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Attach the id handed out by the server. It is set once per session.
    pub fn register(&mut self, user_id: UserId) -> Result<()> {
        if self.user_id.is_some() {
            return Err(GameError::AlreadyRegistered);
        }
        log::info!("registered as user {}", user_id);
        self.user_id = Some(user_id);
        Ok(())
    }

    pub fn found(&self) -> &FoundState {
        &self.found
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.stopwatch.tick(now_ms);
    }

    pub fn verification_started(&mut self, character: CharacterId) {
        self.in_flight[character.index()] += 1;
    }

    /// Whether a verification for `character` has been sent and not yet
    /// applied.
    pub fn is_pending(&self, character: CharacterId) -> bool {
        self.in_flight[character.index()] > 0
    }

    /// Fold a verification result into the session. Results may arrive in
    /// any order; the completion check runs after every flag update.
    pub fn apply_verification(
        &mut self,
        character: CharacterId,
        result: &Result<bool>,
        now_ms: f64,
    ) -> VerifyOutcome {
        let slot = &mut self.in_flight[character.index()];
        *slot = slot.saturating_sub(1);

        match result {
            Err(err) => {
                log::warn!("verification for {} failed: {}", character.slug(), err);
                VerifyOutcome::Failed
            }
            Ok(false) => {
                log::debug!("{} not at the clicked spot", character.slug());
                VerifyOutcome::NotFound
            }
            Ok(true) => {
                if !self.found.mark(character) {
                    return VerifyOutcome::AlreadyFound;
                }
                log::info!("found {} ({}/3)", character.slug(), self.found.found_count());
                if self.tracker.evaluate(&self.found) {
                    VerifyOutcome::Completed(self.complete(now_ms))
                } else {
                    VerifyOutcome::Found
                }
            }
        }
    }

    fn complete(&mut self, now_ms: f64) -> Completion {
        self.stopwatch.stop(now_ms);
        let completion = Completion {
            end_date: DateTime::from_timestamp_millis(now_ms as i64).unwrap_or_default(),
            duration_seconds: self.stopwatch.elapsed_seconds(),
        };
        log::info!("all characters found in {}s", completion.duration_seconds);
        self.completion = Some(completion);
        completion
    }

    /// Build the score for this session. The nickname is passed through
    /// as-is, empty included.
    pub fn score_record(&self, nickname: &str) -> Result<ScoreRecord> {
        let completion = self.completion.ok_or(GameError::NotComplete)?;
        let user_id = self.user_id.clone().ok_or(GameError::NotRegistered)?;
        Ok(ScoreRecord {
            user_id,
            nickname: nickname.to_string(),
            duration_seconds: completion.duration_seconds,
            end_date: completion.end_date,
        })
    }
}
