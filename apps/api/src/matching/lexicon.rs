//! English stopword list and a dictionary-free noun lemmatizer.

/// The standard English stopword list (179 entries). Contractions are kept
/// for completeness even though the normalizer drops non-alphanumeric tokens
/// before consulting this list.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Irregular plurals and words that look plural but are not.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("businessmen", "businessman"),
    ("chairmen", "chairman"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("economics", "economics"),
    ("ethics", "ethics"),
    ("feet", "foot"),
    ("freshmen", "freshman"),
    ("geese", "goose"),
    ("indices", "index"),
    ("mathematics", "mathematics"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("news", "news"),
    ("phenomena", "phenomenon"),
    ("physics", "physics"),
    ("politics", "politics"),
    ("salesmen", "salesman"),
    ("series", "series"),
    ("species", "species"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
    ("women", "woman"),
];

/// Ordered suffix detachment rules; the first matching suffix wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("ies", "y"),
    ("s", ""),
];

/// Endings the bare plural rule must leave alone (`class`, `status`, `basis`).
const SINGULAR_S_ENDINGS: &[&str] = &["ss", "us", "is"];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Reduces a lowercase token to its noun base form.
///
/// Rules are re-applied until the word stops changing, so the result is a
/// fixed point: `lemmatize(&lemmatize(w)) == lemmatize(w)`.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();
    // Every rule either maps to a stable exception or strictly shortens the word.
    for _ in 0..=word.chars().count() {
        match lemmatize_once(&current) {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }
    current
}

fn lemmatize_once(word: &str) -> Option<String> {
    if let Some((_, base)) = NOUN_EXCEPTIONS.iter().find(|(plural, _)| *plural == word) {
        return Some(base.to_string());
    }

    let (suffix, replacement) = SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| word.ends_with(suffix))?;

    if *suffix == "s" && SINGULAR_S_ENDINGS.iter().any(|e| word.ends_with(e)) {
        return None;
    }

    let stem = &word[..word.len() - suffix.len()];
    let candidate = format!("{stem}{replacement}");
    is_acceptable_lemma(&candidate).then_some(candidate)
}

/// A lemma must survive the same filters the normalizer applies to tokens.
fn is_acceptable_lemma(candidate: &str) -> bool {
    candidate.chars().count() > 2
        && !is_stopword(candidate)
        && !candidate.chars().all(char::is_numeric)
}
