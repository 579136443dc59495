use std::fmt;

/// The three hidden characters. The set is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterId {
    Waldo,
    Wizard,
    Odlaw,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Waldo, CharacterId::Wizard, CharacterId::Odlaw];

    /// Lowercase name used in verification URLs and DOM ids.
    pub fn slug(self) -> &'static str {
        match self {
            CharacterId::Waldo => "waldo",
            CharacterId::Wizard => "wizard",
            CharacterId::Odlaw => "odlaw",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CharacterId::Waldo => "Waldo",
            CharacterId::Wizard => "Wizard",
            CharacterId::Odlaw => "Odlaw",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            CharacterId::Waldo => 0,
            CharacterId::Wizard => 1,
            CharacterId::Odlaw => 2,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
