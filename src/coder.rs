use std::collections::HashMap;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::huffman::Forest;

/// Symbol to code lookup, rebuilt in full after every append.
pub type CodeTable = HashMap<char, String>;

/// Owns a [`Forest`] and the code table derived from it.
///
/// ```
/// use huffman_forest::HuffmanCoder;
///
/// let mut coder = HuffmanCoder::new();
/// coder.append('a', 1);
/// coder.append('b', 2);
///
/// let bits = coder.encode("abba").unwrap();
/// assert_eq!(bits, "0110");
/// assert_eq!(coder.decode(&bits).unwrap(), "abba");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    forest: Forest,
    coder: CodeTable,
}

impl HuffmanCoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol and rebuilds the whole code. Any code handed out earlier
    /// may have changed.
    pub fn append(&mut self, symbol: char, weight: u64) {
        self.forest.append(symbol, weight);

        // Pre-order, so with duplicate symbols the last leaf wins.
        self.coder = self
            .forest
            .leaves()
            .filter_map(|node| Some((node.symbol()?, node.code()?.to_string())))
            .collect();
        debug!("Code table holds {} symbols", self.coder.len());
    }

    /// Concatenates the code of every symbol in `input`.
    ///
    /// Stops at the first symbol without a code; the error carries the output
    /// produced up to that point.
    pub fn encode(&self, input: &str) -> Result<String> {
        let mut output = String::new();

        for symbol in input.chars() {
            match self.coder.get(&symbol) {
                Some(code) => output.push_str(code),
                None => {
                    warn!("Encode stopped on unrecognized symbol {symbol:?}");
                    return Err(Error::UnrecognizedSymbol {
                        symbol,
                        partial: output,
                    });
                }
            }
        }

        Ok(output)
    }

    pub fn decode(&self, input: &str) -> Result<String> {
        self.forest.decode(input)
    }

    pub fn render(&self) -> String {
        self.forest.render()
    }

    /// Drops the tree and the code table.
    pub fn clear(&mut self) {
        self.forest.clear();
        self.coder.clear();
    }

    pub fn code(&self, symbol: char) -> Option<&str> {
        self.coder.get(&symbol).map(String::as_str)
    }

    /// Iterates the code table in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.coder.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Weight-averaged code length in bits/symbol over every leaf.
    pub fn average_code_length(&self) -> f64 {
        let total = self.forest.total_weight();
        if total == 0 {
            return 0.0;
        }

        let bits: u128 = self
            .forest
            .leaves()
            .map(|node| node.weight() * node.code().map_or(0, str::len) as u128)
            .sum();
        bits as f64 / total as f64
    }
}

impl Extend<(char, u64)> for HuffmanCoder {
    fn extend<I: IntoIterator<Item = (char, u64)>>(&mut self, iter: I) {
        for (symbol, weight) in iter {
            self.append(symbol, weight);
        }
    }
}

impl FromIterator<(char, u64)> for HuffmanCoder {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut coder = Self::new();
        coder.extend(iter);
        coder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> HuffmanCoder {
        [
            ('a', 5),
            ('b', 9),
            ('c', 12),
            ('d', 13),
            ('e', 16),
            ('f', 45),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn encodes_textbook_alphabet() {
        let coder = textbook();
        let bits = coder.encode("abcdef").unwrap();

        assert_eq!(bits, "110011011001011110");
        assert_eq!(coder.decode(&bits).unwrap(), "abcdef");
        assert_eq!(coder.code('f'), Some("0"));
        assert_eq!(coder.codes().count(), 6);
    }

    #[test]
    fn average_length_matches_textbook() {
        // 45*1 + (12+13+16)*3 + (5+9)*4 = 224 bits over weight 100
        assert!((textbook().average_code_length() - 2.24).abs() < 1e-12);
        assert_eq!(HuffmanCoder::new().average_code_length(), 0.0);
    }

    #[test]
    fn maximal_weights_round_trip() {
        let mut coder = HuffmanCoder::new();
        coder.append('a', u64::MAX);
        coder.append('b', 1);

        assert_eq!(coder.forest().total_weight(), u128::from(u64::MAX) + 1);
        assert_eq!(coder.encode("ab"), Ok("10".to_string()));
        assert_eq!(coder.decode("10").unwrap(), "ab");
        assert!((coder.average_code_length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn encode_returns_partial_output_on_unknown_symbol() {
        let coder = textbook();
        let err = coder.encode("fax").unwrap_err();

        assert_eq!(
            err,
            Error::UnrecognizedSymbol {
                symbol: 'x',
                partial: "01100".to_string()
            }
        );
        assert_eq!(coder.encode("fa").unwrap(), "01100");
    }

    #[test]
    fn empty_input_encodes_to_empty_output() {
        assert_eq!(textbook().encode(""), Ok(String::new()));
        assert_eq!(HuffmanCoder::new().encode(""), Ok(String::new()));
    }

    #[test]
    fn duplicate_symbol_keeps_last_leaf_code() {
        let mut coder = HuffmanCoder::new();
        coder.append('a', 1);
        coder.append('b', 1);
        coder.append('a', 3);

        // Leaves a(1), b(1), a(3): the first pair merges, then the
        // heavier a sits on the right.
        assert_eq!(coder.forest().leaves().count(), 3);
        assert_eq!(coder.code('a'), Some("1"));
        assert_eq!(coder.decode("001").unwrap(), "aa");
    }

    #[test]
    fn clear_drops_code_table() {
        let mut coder = textbook();
        coder.clear();

        assert_eq!(coder.code('a'), None);
        assert_eq!(coder.decode("01"), Err(Error::EmptyTree));
        assert!(matches!(
            coder.encode("a"),
            Err(Error::UnrecognizedSymbol { symbol: 'a', .. })
        ));
        assert_eq!(coder.render(), "");
    }
}
