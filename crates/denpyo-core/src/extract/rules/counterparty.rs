//! Counterparty name extraction.
//!
//! Company names are located by their legal-entity suffix ("株式会社ABC",
//! "XYZ有限会社", "(株)DEF"). A document usually names two companies, the
//! sender's letterhead and the addressee, so every suffix occurrence yields
//! candidates and the operator's own company is filtered out.

use tracing::trace;

use super::normalize::NormalizedText;
use super::FieldExtractor;

/// Legal-entity suffixes. A suffix always precedes any shorter suffix it contains.
pub const ENTITY_SUFFIXES: &[&str] = &[
    "特定非営利活動法人",
    "一般社団法人",
    "一般財団法人",
    "公益社団法人",
    "公益財団法人",
    "株式会社",
    "有限会社",
    "合同会社",
    "合資会社",
    "合名会社",
    "合弁会社",
    "社団法人",
    "財団法人",
    "医療法人",
    "学校法人",
    "宗教法人",
    "法人",
    "（株）",
    "(株)",
    "（有）",
    "(有)",
    "㈱",
    "㈲",
];

/// Returned when no eligible company name is found.
pub const UNRECOGNIZED_COUNTERPARTY: &str = "unrecognized company name";

const HONORIFIC: &str = "御中";

/// Which side of the suffix a candidate was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixForm {
    /// "ABC株式会社"
    Preceding,
    /// "株式会社ABC"
    Following,
}

/// A possible company name next to an entity suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterpartyCandidate {
    /// Bare name, suffix and noise removed. May be empty.
    pub name: String,
    /// The suffix the name was attached to.
    pub suffix: &'static str,
    pub form: SuffixForm,
    /// Index of the fragment in [`NormalizedText::words`].
    pub word_index: usize,
}

/// Counterparty extractor that skips the operator's own company.
#[derive(Debug, Clone, Default)]
pub struct CounterpartyExtractor {
    self_company_name: String,
}

impl CounterpartyExtractor {
    /// Create an extractor. An empty `self_company_name` disables exclusion.
    ///
    /// The configured name may include its own entity suffix ("ABC株式会社");
    /// it is compared in bare form like the candidates.
    pub fn new(self_company_name: &str) -> Self {
        Self {
            self_company_name: bare_name(self_company_name),
        }
    }

    /// The operator's company name in bare form.
    pub fn self_company_name(&self) -> &str {
        &self.self_company_name
    }

    /// Every candidate in order of appearance, eligible or not.
    pub fn candidates(&self, text: &NormalizedText) -> Vec<CounterpartyCandidate> {
        let mut candidates = Vec::new();

        for (word_index, word) in text.words().enumerate() {
            let occurrences = suffix_occurrences(word);

            for (i, &(start, suffix)) in occurrences.iter().enumerate() {
                let end = start + suffix.len();
                let run_start = if i == 0 {
                    0
                } else {
                    let (prev_start, prev_suffix) = occurrences[i - 1];
                    prev_start + prev_suffix.len()
                };
                let run_end = occurrences.get(i + 1).map_or(word.len(), |&(next, _)| next);

                candidates.push(CounterpartyCandidate {
                    name: clean_name(&word[run_start..start]),
                    suffix,
                    form: SuffixForm::Preceding,
                    word_index,
                });
                candidates.push(CounterpartyCandidate {
                    name: clean_name(&word[end..run_end]),
                    suffix,
                    form: SuffixForm::Following,
                    word_index,
                });
            }
        }

        candidates
    }

    /// Whether a candidate may be reported as the counterparty.
    pub fn is_eligible(&self, candidate: &CounterpartyCandidate) -> bool {
        if candidate.name.is_empty() {
            return false;
        }
        self.self_company_name.is_empty() || !candidate.name.contains(&self.self_company_name)
    }
}

impl FieldExtractor for CounterpartyExtractor {
    type Output = CounterpartyCandidate;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        self.candidates(text).into_iter().find(|candidate| {
            let eligible = self.is_eligible(candidate);
            trace!(
                "Counterparty candidate {:?} ({:?} {}): eligible={}",
                candidate.name,
                candidate.form,
                candidate.suffix,
                eligible
            );
            eligible
        })
    }
}

/// Extract the counterparty name, or [`UNRECOGNIZED_COUNTERPARTY`].
pub fn extract_counterparty(text: &NormalizedText, self_company_name: &str) -> String {
    CounterpartyExtractor::new(self_company_name)
        .extract(text)
        .map(|c| c.name)
        .unwrap_or_else(|| UNRECOGNIZED_COUNTERPARTY.to_string())
}

/// Leftmost-longest, non-overlapping suffix occurrences as `(byte offset, suffix)`.
fn suffix_occurrences(word: &str) -> Vec<(usize, &'static str)> {
    let mut occurrences = Vec::new();
    let mut cursor = 0;

    for (i, _) in word.char_indices() {
        if i < cursor {
            continue;
        }
        if let Some(suffix) = ENTITY_SUFFIXES.iter().find(|s| word[i..].starts_with(**s)) {
            occurrences.push((i, *suffix));
            cursor = i + suffix.len();
        }
    }

    occurrences
}

/// Strip every entity suffix and noise from a configured name.
fn bare_name(name: &str) -> String {
    let mut bare = name.trim().to_string();
    for suffix in ENTITY_SUFFIXES {
        bare = bare.replace(*suffix, "");
    }
    clean_name(&bare)
}

fn clean_name(run: &str) -> String {
    let trimmed = run.trim_matches(is_noise);
    let trimmed = trimmed.strip_suffix(HONORIFIC).unwrap_or(trimmed);
    trimmed.trim_matches(is_noise).to_string()
}

fn is_noise(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | '.' | ':' | ';' | '/' | '-' | '_' | '|' | '"' | '\''
                | '、' | '。' | '，' | '．' | '：' | '；' | '・' | '／'
                | '「' | '」' | '『' | '』' | '【' | '】' | '〔' | '〕'
        )
}
