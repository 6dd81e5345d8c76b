//! Label grammars used to pull a reference out of a detail page text node.
//!
//! Every grammar works on the trimmed node text and either yields a
//! non-empty reference or a [`GrammarError`] carrying the raw text.

use crate::error::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelGrammar {
    /// Label at the start, reference is the next whitespace-delimited token.
    /// Whitespace inside the label matches any run of whitespace, including none.
    Token(&'static str),
    /// Label at the start, reference is the trimmed rest of the text.
    Remainder(&'static str),
    /// Prefix at the start, optional suffix at the end, reference in between.
    Enclosed {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// Label anywhere in the text, reference is what follows its first occurrence.
    After(&'static str),
}

impl LabelGrammar {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Token(label) | Self::Remainder(label) | Self::After(label) => label,
            Self::Enclosed { prefix, .. } => prefix,
        }
    }

    pub fn parse(&self, raw: &str) -> Result<String, GrammarError> {
        let text = raw.trim();
        let label = self.label();
        let missing = || GrammarError::MissingLabel {
            label,
            raw: raw.to_string(),
        };

        let reference = match *self {
            Self::Token(label) => {
                let rest = match_label(text, label).ok_or_else(missing)?;
                rest.split_whitespace().next().unwrap_or("")
            }
            Self::Remainder(label) => text.strip_prefix(label).ok_or_else(missing)?.trim(),
            Self::Enclosed { prefix, suffix } => {
                let rest = text.strip_prefix(prefix).ok_or_else(missing)?.trim_end();
                rest.strip_suffix(suffix).unwrap_or(rest).trim()
            }
            Self::After(label) => {
                let (_, rest) = text.split_once(label).ok_or_else(missing)?;
                rest.split(label).next().unwrap_or("").trim()
            }
        };

        if reference.is_empty() {
            return Err(GrammarError::EmptyReference {
                label,
                raw: raw.to_string(),
            });
        }

        Ok(reference.to_string())
    }
}

/// Matches `label` at the start of `text`, scanf style. Returns what follows.
fn match_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let mut rest = text;
    for expected in label.chars() {
        if expected.is_whitespace() {
            rest = rest.trim_start();
            continue;
        }
        let mut chars = rest.chars();
        if chars.next()? != expected {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}
