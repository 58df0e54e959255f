//! Salutation derived from the donor's title.

use serde::{Deserialize, Serialize};

/// Opening salutation of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Salutation {
    /// "Chère Madame"
    Madame,
    /// "Cher Monsieur"
    Monsieur,
    /// "Cher Maître"
    Maitre,
    /// "Cher Docteur"
    Docteur,
    /// "Chers Monsieur & Madame"
    MonsieurEtMadame,
    /// "Cher Monsieur, Madame"
    Generic,
}

const COUPLE_TITLE: [&str; 3] = ["monsieur", "&", "madame"];

impl Salutation {
    /// Derives the salutation from a full name such as "Madame Anne Dupont".
    ///
    /// The title is the first word, compared case-insensitively. A name
    /// whose first three words are "Monsieur & Madame" is addressed to the
    /// couple.
    #[must_use]
    pub fn from_full_name(full_name: &str) -> Self {
        let normalized = full_name.to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().take(3).collect();
        if words == COUPLE_TITLE {
            return Self::MonsieurEtMadame;
        }

        match words.first().copied().unwrap_or_default() {
            "madame" => Self::Madame,
            "monsieur" => Self::Monsieur,
            "maître" => Self::Maitre,
            "docteur" | "dr" | "dr." => Self::Docteur,
            _ => Self::Generic,
        }
    }

    /// Returns the printed salutation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Madame => "Chère Madame",
            Self::Monsieur => "Cher Monsieur",
            Self::Maitre => "Cher Maître",
            Self::Docteur => "Cher Docteur",
            Self::MonsieurEtMadame => "Chers Monsieur & Madame",
            Self::Generic => "Cher Monsieur, Madame",
        }
    }
}

impl std::fmt::Display for Salutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
