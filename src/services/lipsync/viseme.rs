use std::fmt;

/// Mouth poses understood by the animation rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouthShape {
    Rest,
    Ai,
    E,
    O,
    U,
    Fv,
    L,
    Mbp,
    Wq,
}

impl MouthShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouthShape::Rest => "rest",
            MouthShape::Ai => "ai",
            MouthShape::E => "e",
            MouthShape::O => "o",
            MouthShape::U => "u",
            MouthShape::Fv => "fv",
            MouthShape::L => "l",
            MouthShape::Mbp => "mbp",
            MouthShape::Wq => "wq",
        }
    }
}

impl fmt::Display for MouthShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a phoneme symbol to its mouth shape. Symbols outside the table
/// (other consonants, silence markers) have no shape.
pub fn mouth_shape(phoneme: &str) -> Option<MouthShape> {
    match phoneme {
        "a" | "i" => Some(MouthShape::Ai),
        "e" => Some(MouthShape::E),
        "o" => Some(MouthShape::O),
        "u" => Some(MouthShape::U),
        "f" | "v" => Some(MouthShape::Fv),
        "l" => Some(MouthShape::L),
        "m" | "b" | "p" => Some(MouthShape::Mbp),
        "w" | "q" => Some(MouthShape::Wq),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_symbols() {
        let expected = [
            ("a", "ai"),
            ("i", "ai"),
            ("e", "e"),
            ("o", "o"),
            ("u", "u"),
            ("f", "fv"),
            ("v", "fv"),
            ("l", "l"),
            ("m", "mbp"),
            ("b", "mbp"),
            ("p", "mbp"),
            ("w", "wq"),
            ("q", "wq"),
        ];
        for (symbol, shape) in expected {
            assert_eq!(
                mouth_shape(symbol).map(|s| s.as_str()),
                Some(shape),
                "symbol {symbol}"
            );
        }
    }

    #[test]
    fn test_unmapped_symbols() {
        for symbol in ["t", "k", "s", "_", "", "A", "ai", "sil"] {
            assert_eq!(mouth_shape(symbol), None, "symbol {symbol:?}");
        }
    }

    #[test]
    fn test_rest_is_never_a_lookup_result() {
        for c in 'a'..='z' {
            assert_ne!(mouth_shape(&c.to_string()), Some(MouthShape::Rest));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(MouthShape::Mbp.to_string(), "mbp");
        assert_eq!(MouthShape::Rest.to_string(), "rest");
    }
}
