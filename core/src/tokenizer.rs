use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// Characters removed when they end a word. `!` is deliberately absent.
const TRAILING_PUNCT: [char; 5] = ['.', ',', ';', ':', '?'];

/// Lowercase `raw` and drop a single trailing `.`, `,`, `;`, `:` or `?`.
pub fn normalize_word(raw: &str) -> String {
    let mut word = raw.to_lowercase();
    if word.ends_with(TRAILING_PUNCT) {
        word.pop();
    }
    word
}

/// Split text on whitespace and normalize every token, dropping tokens that normalize to nothing.
pub fn tokenize(text: &str) -> Vec<String> {
    RE.find_iter(text)
        .map(|mat| normalize_word(mat.as_str()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Number of raw whitespace-separated tokens, used as the term-frequency denominator.
pub fn count_tokens(text: &str) -> usize {
    RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_trailing_mark() {
        assert_eq!(normalize_word("Sydney???"), "sydney??");
        assert_eq!(normalize_word("wHy?"), "why");
    }

    #[test]
    fn keeps_bang_and_inner_dots() {
        assert_eq!(normalize_word("Sydney!"), "sydney!");
        assert_eq!(normalize_word("smh.com.au"), "smh.com.au");
    }

    #[test]
    fn lone_punctuation_is_dropped_but_counted() {
        let text = "mars ? moon.";
        assert_eq!(tokenize(text), vec!["mars", "moon"]);
        assert_eq!(count_tokens(text), 3);
    }
}
