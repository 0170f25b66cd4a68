//! Word-fragment deduplication.
//!
//! Collapses exact duplicate tokens, then strips every token of the longest
//! other independent word (>= 2 chars) it starts with or contains, e.g.
//! `"야외 야외고양이집"` becomes `"야외 고양이집"`.

use tracing::debug;

/// Tokens shorter than this are never reduced and never act as reducers.
pub const MIN_WORD_CHARS: usize = 2;

/// How a reducer matched a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionKind {
    /// The token starts with the reducer; the prefix was removed.
    Prefix,
    /// The token contains the reducer elsewhere; its first occurrence was removed.
    Infix,
}

/// One applied reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub token: String,
    pub reducer: String,
    pub kind: ReductionKind,
    pub result: String,
}

/// Output of a single deduplication pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupPass {
    pub tokens: Vec<String>,
    pub reductions: Vec<Reduction>,
}

impl DedupPass {
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split on whitespace runs, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Exact-duplicate collapse, keeping first-seen order.
pub fn unique_tokens<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let mut unique: Vec<&str> = Vec::with_capacity(tokens.len());
    for &t in tokens {
        if !unique.contains(&t) {
            unique.push(t);
        }
    }
    unique
}

/// Tokens eligible as reducers, longest first. Ties keep input order.
pub fn independent_words<'a>(unique: &[&'a str]) -> Vec<&'a str> {
    let mut words: Vec<&str> = unique
        .iter()
        .copied()
        .filter(|w| char_len(w) >= MIN_WORD_CHARS)
        .collect();
    // sort_by_key is stable
    words.sort_by_key(|w| std::cmp::Reverse(char_len(w)));
    words
}

fn reduce_token(token: &str, independent: &[&str]) -> Option<Reduction> {
    let token_len = char_len(token);
    for &word in independent {
        if word == token {
            continue;
        }
        if let Some(rest) = token.strip_prefix(word) {
            return Some(Reduction {
                token: token.to_string(),
                reducer: word.to_string(),
                kind: ReductionKind::Prefix,
                result: rest.to_string(),
            });
        }
        if char_len(word) < token_len && token.contains(word) {
            return Some(Reduction {
                token: token.to_string(),
                reducer: word.to_string(),
                kind: ReductionKind::Infix,
                result: token.replacen(word, "", 1),
            });
        }
    }
    None
}

/// Run one pass and report which reductions fired.
pub fn deduplicate_tokens(text: &str) -> DedupPass {
    let tokens = tokenize(text);
    let unique = unique_tokens(&tokens);
    let independent = independent_words(&unique);

    let mut pass = DedupPass::default();
    for &token in &unique {
        let out = if char_len(token) < MIN_WORD_CHARS {
            token.to_string()
        } else {
            match reduce_token(token, &independent) {
                Some(reduction) => {
                    debug!(
                        token = %reduction.token,
                        reducer = %reduction.reducer,
                        kind = ?reduction.kind,
                        result = %reduction.result,
                        "reduced token"
                    );
                    let result = reduction.result.clone();
                    pass.reductions.push(reduction);
                    result
                }
                None => token.to_string(),
            }
        };

        // Empty reductions drop the token.
        if out.is_empty() || pass.tokens.contains(&out) {
            continue;
        }
        pass.tokens.push(out);
    }
    pass
}

/// Deduplicate overlapping words. Always returns a string, possibly empty.
pub fn deduplicate(text: &str) -> String {
    deduplicate_tokens(text).text()
}
