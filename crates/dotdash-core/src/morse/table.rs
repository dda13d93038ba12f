//! The fixed character <-> Morse symbol table.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Symbol emitted for the space character.
pub const WORD_SEPARATOR: &str = "/";

/// How a word boundary appears inside a Morse string.
pub const WORD_BOUNDARY: &str = " / ";

/// The complete alphabet. Both lookup maps are derived from this array.
pub const SYMBOLS: [(char, &str); 44] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    (',', "--..--"),
    ('.', ".-.-.-"),
    ('?', "..--.."),
    ('/', "-..-."),
    ('-', "-....-"),
    ('(', "-.--."),
    (')', "-.--.-"),
    (' ', WORD_SEPARATOR),
];

lazy_static! {
    static ref FORWARD: HashMap<char, &'static str> = SYMBOLS.iter().copied().collect();

    static ref REVERSE: HashMap<&'static str, char> =
        SYMBOLS.iter().map(|&(c, symbol)| (symbol, c)).collect();
}

/// Look up the Morse symbol for an (uppercase) character.
pub fn symbol_for(c: char) -> Option<&'static str> {
    FORWARD.get(&c).copied()
}

/// Look up the character a Morse symbol stands for.
pub fn char_for(symbol: &str) -> Option<char> {
    REVERSE.get(symbol).copied()
}

/// Iterate over every character the table can represent.
pub fn alphabet() -> impl Iterator<Item = char> {
    SYMBOLS.iter().map(|&(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_bijective() {
        let chars: HashSet<char> = alphabet().collect();
        let symbols: HashSet<&str> = SYMBOLS.iter().map(|&(_, s)| s).collect();

        assert_eq!(chars.len(), SYMBOLS.len());
        assert_eq!(symbols.len(), SYMBOLS.len());
        assert_eq!(FORWARD.len(), REVERSE.len());
    }

    #[test]
    fn test_reverse_agrees_with_forward() {
        for (c, symbol) in SYMBOLS {
            assert_eq!(symbol_for(c), Some(symbol));
            assert_eq!(char_for(symbol), Some(c));
        }
    }

    #[test]
    fn test_space_is_word_separator() {
        assert_eq!(symbol_for(' '), Some("/"));
        assert_eq!(char_for("/"), Some(' '));
        // The slash character has its own symbol.
        assert_eq!(symbol_for('/'), Some("-..-."));
    }

    #[test]
    fn test_symbols_use_only_dots_and_dashes() {
        for (c, symbol) in SYMBOLS {
            if c == ' ' {
                continue;
            }
            assert!(
                symbol.chars().all(|t| t == '.' || t == '-'),
                "{c:?} -> {symbol:?}"
            );
        }
    }

    #[test]
    fn test_lowercase_is_not_in_table() {
        assert_eq!(symbol_for('a'), None);
        assert_eq!(char_for("........"), None);
    }
}
