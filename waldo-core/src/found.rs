use crate::character::CharacterId;

/// Per-character found flags. Flags only ever go from false to true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoundState {
    flags: [bool; 3],
}

impl FoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_found(&self, character: CharacterId) -> bool {
        self.flags[character.index()]
    }

    /// Returns true if the flag was newly set.
    pub(crate) fn mark(&mut self, character: CharacterId) -> bool {
        let flag = &mut self.flags[character.index()];
        let newly = !*flag;
        *flag = true;
        newly
    }

    pub fn all_found(&self) -> bool {
        CharacterId::ALL.iter().all(|c| self.is_found(*c))
    }

    pub fn found_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CharacterId, bool)> + '_ {
        CharacterId::ALL.into_iter().map(|c| (c, self.is_found(c)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Playing,
    AllFound,
}

/// Edge-triggered detector for the all-found transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionTracker {
    phase: Phase,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::AllFound
    }

    /// Call after every flag update. Returns true exactly once per tracker:
    /// on the first call that sees every flag set.
    pub fn evaluate(&mut self, found: &FoundState) -> bool {
        match self.phase {
            Phase::AllFound => false,
            Phase::Playing if found.all_found() => {
                self.phase = Phase::AllFound;
                true
            }
            Phase::Playing => false,
        }
    }
}
