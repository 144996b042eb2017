//! Phrase abbreviation applied to untimed calendar labels.
//!
//! Rules run in configured order over the output of the previous rule, so
//! overlapping phrases interact: an earlier rule can consume text a later
//! rule would have matched.

use crate::errors::{AppError, AppResult};
use regex::{NoExpand, Regex};

enum Matcher {
    Literal(String),
    Phrase(Regex),
}

struct Rule {
    matcher: Matcher,
    abbreviation: String,
}

#[derive(Default)]
pub struct Abbreviations {
    rules: Vec<Rule>,
}

impl Abbreviations {
    pub fn compile(pairs: &[(String, String)]) -> AppResult<Self> {
        let mut rules = Vec::with_capacity(pairs.len());
        for (phrase, abbreviation) in pairs {
            let mut chars = phrase.chars();
            let matcher = match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_alphanumeric() => Matcher::Literal(phrase.clone()),
                _ => Matcher::Phrase(phrase_regex(phrase).map_err(|e| {
                    AppError::config(format!("abbreviations.{phrase}"), e.to_string())
                })?),
            };
            rules.push(Rule {
                matcher,
                abbreviation: abbreviation.clone(),
            });
        }
        Ok(Self { rules })
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| match &rule.matcher {
            Matcher::Literal(lit) => acc.replace(lit.as_str(), &rule.abbreviation),
            Matcher::Phrase(re) => re
                .replace_all(&acc, NoExpand(&rule.abbreviation))
                .into_owned(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Case-insensitive whole-phrase match. Word boundaries are only required
/// on edges that are word characters.
fn phrase_regex(phrase: &str) -> Result<Regex, regex::Error> {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(phrase.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(phrase.chars().last()) { r"\b" } else { "" };
    Regex::new(&format!("(?i){lead}{}{trail}", regex::escape(phrase)))
}
