//! Text <-> genome conversion.
//!
//! Each character maps to its code point. Only U+0000..=U+00FF fit in a gene,
//! which makes the mapping a bijection between Latin-1 text and byte genomes.

use crate::schema::Genome;

/// Errors converting text into a genome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Character {ch:?} at position {index} does not fit in a gene (max U+00FF)")]
    UnencodableChar { ch: char, index: usize },
}

/// Encode text as one gene per character.
pub fn encode(text: &str) -> Result<Genome, CodecError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| CodecError::UnencodableChar { ch, index }))
        .collect::<Result<Vec<u8>, _>>()
        .map(Genome::new)
}

/// Decode a genome back into text, one character per gene.
pub fn decode(genes: &[u8]) -> String {
    genes.iter().map(|&g| char::from(g)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ordinals() {
        let genome = encode("AB z").unwrap();
        assert_eq!(genome.genes(), &[65, 66, 32, 122]);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let text = "Attention is all you need";
        assert_eq!(decode(&encode(text).unwrap()), text);

        let latin1 = "caf\u{e9} \u{ff}";
        assert_eq!(decode(&encode(latin1).unwrap()), latin1);
    }

    #[test]
    fn test_length_counts_characters() {
        let genome = encode("\u{e9}\u{e9}").unwrap();
        assert_eq!(genome.len(), 2);
    }

    #[test]
    fn test_unencodable_char() {
        let err = encode("ok\u{0100}").unwrap_err();
        assert_eq!(
            err,
            CodecError::UnencodableChar {
                ch: '\u{0100}',
                index: 2
            }
        );
    }

    #[test]
    fn test_decode_covers_full_byte_range() {
        let genes: Vec<u8> = (0..=255).collect();
        let text = decode(&genes);
        assert_eq!(text.chars().count(), 256);
        assert_eq!(encode(&text).unwrap().genes(), genes.as_slice());
    }
}
