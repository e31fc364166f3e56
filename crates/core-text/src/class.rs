//! Character classification for word motions and delimiter matching.

/// Granularity used by word motions and word text objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStyle {
    /// `w`/`b`/`e`: runs of word chars or runs of punctuation.
    Word,
    /// `W`/`B`/`E`: runs of anything separated only by whitespace.
    BigWord,
}

/// Class of a single char. Word motions treat a maximal run of one class as a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Word,
    Punctuation,
}

/// `[A-Za-z0-9_]`
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub fn char_class(c: char, style: WordStyle) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if style == WordStyle::BigWord || is_word_char(c) {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Bracket pairs recognised by `%`.
pub const MATCH_PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Bracket pairs accepted by bracket text objects.
pub const OBJECT_PAIRS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

/// Quote chars accepted by symmetric text objects.
pub const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Direction a bracket char scans toward its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Open,
    Close,
}

/// Look up `c` in `pairs`, returning `(open, close, side)` when it is a bracket.
pub fn pair_of(c: char, pairs: &[(char, char)]) -> Option<(char, char, PairSide)> {
    pairs.iter().find_map(|&(open, close)| {
        if c == open {
            Some((open, close, PairSide::Open))
        } else if c == close {
            Some((open, close, PairSide::Close))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_its_own_class() {
        assert_eq!(char_class('(', WordStyle::Word), CharClass::Punctuation);
        assert_eq!(char_class('(', WordStyle::BigWord), CharClass::Word);
        assert_eq!(char_class('_', WordStyle::Word), CharClass::Word);
        assert_eq!(char_class('\n', WordStyle::Word), CharClass::Whitespace);
    }

    #[test]
    fn pair_lookup() {
        assert_eq!(pair_of(']', &MATCH_PAIRS), Some(('[', ']', PairSide::Close)));
        assert_eq!(pair_of('<', &MATCH_PAIRS), None);
        assert_eq!(pair_of('<', &OBJECT_PAIRS), Some(('<', '>', PairSide::Open)));
    }
}
