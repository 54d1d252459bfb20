//! Physical keyboard layout — maps playable characters to positions 0–29.

/// The 30 playable characters, in position order: three rows of ten.
pub const KEYBOARD_LAYOUT: &str = "qwertyuiopasdfghjkl;zxcvbnm,./";

/// Position of a character in the fixed 30-key layout.
///
/// Constant table rather than a string scan; the numbering matches
/// [`KEYBOARD_LAYOUT`] exactly.
pub fn position(key: char) -> Option<usize> {
    let pos = match key {
        'q' => 0,
        'w' => 1,
        'e' => 2,
        'r' => 3,
        't' => 4,
        'y' => 5,
        'u' => 6,
        'i' => 7,
        'o' => 8,
        'p' => 9,
        'a' => 10,
        's' => 11,
        'd' => 12,
        'f' => 13,
        'g' => 14,
        'h' => 15,
        'j' => 16,
        'k' => 17,
        'l' => 18,
        ';' => 19,
        'z' => 20,
        'x' => 21,
        'c' => 22,
        'v' => 23,
        'b' => 24,
        'n' => 25,
        'm' => 26,
        ',' => 27,
        '.' => 28,
        '/' => 29,
        _ => return None,
    };
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_layout_string() {
        for (i, ch) in KEYBOARD_LAYOUT.chars().enumerate() {
            assert_eq!(position(ch), Some(i), "position of {ch:?}");
        }
    }

    #[test]
    fn layout_has_thirty_keys() {
        assert_eq!(KEYBOARD_LAYOUT.chars().count(), 30);
    }

    #[test]
    fn unknown_characters_have_no_position() {
        assert_eq!(position('1'), None);
        assert_eq!(position(' '), None);
        assert_eq!(position('Q'), None);
    }

    #[test]
    fn row_anchors() {
        assert_eq!(position('q'), Some(0));
        assert_eq!(position('a'), Some(10));
        assert_eq!(position('z'), Some(20));
        assert_eq!(position('/'), Some(29));
    }
}
