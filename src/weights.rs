//! Weight tables: counting, parsing and entropy.

use std::collections::HashMap;
use std::num::ParseIntError;

use log::debug;
use thiserror::Error;

/// `(symbol, weight)` pairs in append order.
pub type WeightTable = Vec<(char, u64)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightsError {
    /// Entry is not of the form `symbol:weight`.
    #[error("malformed weight entry {0:?}: expected symbol:weight")]
    MalformedEntry(String),

    /// The part before the last ':' is not exactly one character.
    #[error("weight entry {0:?} must name exactly one symbol")]
    BadSymbol(String),

    #[error("invalid weight in entry {entry:?}: {source}")]
    InvalidWeight {
        entry: String,
        #[source]
        source: ParseIntError,
    },
}

/// Counts occurrences of each symbol, in order of first appearance.
pub fn count_symbols(text: &str) -> WeightTable {
    let mut table = WeightTable::new();
    let mut index = HashMap::new();

    for symbol in text.chars() {
        let slot = *index.entry(symbol).or_insert_with(|| {
            table.push((symbol, 0));
            table.len() - 1
        });
        table[slot].1 += 1;
    }

    debug!("Counted {} unique symbols in {} chars", table.len(), text.chars().count());
    table
}

/// Parses `a:5,b:9` into `[('a', 5), ('b', 9)]`.
///
/// The weight follows the last ':' of each entry, so `::3` names the symbol
/// ':'. Empty entries are skipped. A ',' cannot be named as a symbol.
pub fn parse_weights(spec: &str) -> Result<WeightTable, WeightsError> {
    spec.split(',')
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Result<(char, u64), WeightsError> {
    let (symbol, weight) = entry
        .rsplit_once(':')
        .ok_or_else(|| WeightsError::MalformedEntry(entry.to_string()))?;

    let mut chars = symbol.chars();
    let (Some(symbol), None) = (chars.next(), chars.next()) else {
        return Err(WeightsError::BadSymbol(entry.to_string()));
    };

    let weight = weight
        .parse::<u64>()
        .map_err(|source| WeightsError::InvalidWeight {
            entry: entry.to_string(),
            source,
        })?;

    Ok((symbol, weight))
}

/// Shannon entropy of the table in bits/symbol. Zero-weight entries are
/// ignored; an all-zero table has entropy 0.
pub fn entropy(weights: &[(char, u64)]) -> f64 {
    let total: u128 = weights.iter().map(|&(_, weight)| u128::from(weight)).sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = weights
        .iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|&(_, weight)| {
            let p = weight as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!("Calculated entropy: {entropy:.4} bits/symbol (total weight: {total})");
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_keep_first_appearance_order() {
        assert_eq!(
            count_symbols("abracadabra"),
            vec![('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]
        );
        assert!(count_symbols("").is_empty());
    }

    #[test]
    fn parses_ordered_pairs() {
        assert_eq!(
            parse_weights("f:45,a:5,::3"),
            Ok(vec![('f', 45), ('a', 5), (':', 3)])
        );
        assert_eq!(parse_weights(""), Ok(vec![]));
        assert_eq!(parse_weights("a:1,,b:2"), Ok(vec![('a', 1), ('b', 2)]));
    }

    #[test]
    fn rejects_bad_entries() {
        assert_eq!(
            parse_weights("a5"),
            Err(WeightsError::MalformedEntry("a5".into()))
        );
        assert_eq!(
            parse_weights("ab:5"),
            Err(WeightsError::BadSymbol("ab:5".into()))
        );
        assert_eq!(parse_weights(":5"), Err(WeightsError::BadSymbol(":5".into())));
        assert!(matches!(
            parse_weights("a:-1"),
            Err(WeightsError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn entropy_of_uniform_table() {
        let table = vec![('a', 1), ('b', 1), ('c', 1), ('d', 1)];
        assert!((entropy(&table) - 2.0).abs() < 1e-12);
        assert_eq!(entropy(&[('a', 7)]), 0.0);
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn entropy_of_maximal_weights_is_finite() {
        let table = vec![('a', u64::MAX), ('b', u64::MAX)];
        assert!((entropy(&table) - 1.0).abs() < 1e-12);

        let skewed = entropy(&[('a', u64::MAX), ('b', 1)]);
        assert!(skewed.is_finite() && skewed >= 0.0);
    }
}
