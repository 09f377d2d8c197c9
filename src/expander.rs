//! Turns free text into a list of candidate song names via a text-completion
//! call.

use std::{collections::HashSet, sync::Arc};

use crate::{error::SearchError, upstream::CompletionApi};

/// What the seed text of an expansion represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// A free-text description of the music wanted.
    Describe,
    /// A mood or emotional state.
    Mood,
    /// A list of the user's favorite song names.
    Similar,
    /// A single seed title.
    Related,
}

/// Builds the one prompt sent for an expansion.
///
/// The output format instruction is strict so that the reply can be parsed
/// line by line without any markup.
pub fn build_prompt(seed: &str, mode: ExpansionMode, count: usize) -> String {
    let task = match mode {
        ExpansionMode::Describe => format!(
            "Recommend {count} songs that match this description: \"{seed}\"."
        ),
        ExpansionMode::Mood => format!(
            "Recommend {count} songs that suit someone who feels like this: \"{seed}\"."
        ),
        ExpansionMode::Similar => format!(
            "A listener's favorite songs are: {seed}. Recommend {count} other songs they would probably enjoy, not including these."
        ),
        ExpansionMode::Related => format!(
            "Recommend {count} songs that are similar in style or theme to the song \"{seed}\", not including it."
        ),
    };

    format!(
        "{task}\n\
         Answer with song names only: one song name per line, exactly {count} lines, \
         no numbering, no artist names, no quotes and no other text."
    )
}

/// Parses a completion reply into at most `cap` distinct song names.
///
/// Lines are trimmed and empty lines dropped. Duplicates are detected by
/// exact, case-sensitive comparison and the first occurrence wins. Parsing
/// stops as soon as `cap` names are collected.
pub fn parse_candidates(text: &str, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for line in text.lines() {
        if names.len() >= cap {
            break;
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    names
}

#[derive(Clone)]
pub struct Expander {
    api: Arc<dyn CompletionApi>,
}

impl Expander {
    pub fn new(api: Arc<dyn CompletionApi>) -> Self {
        Self { api }
    }

    /// Expands `seed` into up to `cap` unique song names.
    ///
    /// # Errors
    ///
    /// Any failure of the completion call is a [`SearchError::Expansion`];
    /// there is no partial list to fall back on.
    pub async fn expand(
        &self,
        seed: &str,
        mode: ExpansionMode,
        cap: usize,
    ) -> Result<Vec<String>, SearchError> {
        let prompt = build_prompt(seed, mode, cap);
        let reply = self.api.complete(&prompt).await?;
        Ok(parse_candidates(&reply, cap))
    }
}
