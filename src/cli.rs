//! Argument handling for the `encode` and `decode` binaries.
//!
//! Both take one positional input plus `--weights=SPEC` (repeatable, entries
//! appended in the order given) and `--tree`.

use thiserror::Error;

use crate::weights::{WeightTable, WeightsError, count_symbols, parse_weights};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("bad --weights: {0}")]
    Weights(#[from] WeightsError),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeArgs {
    pub input: String,
    /// `None` when no `--weights` was given.
    pub weights: Option<WeightTable>,
    pub show_tree: bool,
}

impl EncodeArgs {
    /// Parses the arguments that follow the program name.
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        let parsed = scan(args)?;
        Ok(Self {
            input: parsed.input.ok_or(CliError::Missing("<text>"))?,
            weights: parsed.weights,
            show_tree: parsed.show_tree,
        })
    }

    /// The given weights, or the symbol counts of the input.
    pub fn weight_table(&self) -> WeightTable {
        match &self.weights {
            Some(table) => table.clone(),
            None => count_symbols(&self.input),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeArgs {
    pub input: String,
    pub weights: WeightTable,
    pub show_tree: bool,
}

impl DecodeArgs {
    /// Parses the arguments that follow the program name. `--weights` is
    /// required.
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        let parsed = scan(args)?;
        Ok(Self {
            input: parsed.input.ok_or(CliError::Missing("<bits>"))?,
            weights: parsed.weights.ok_or(CliError::Missing("--weights"))?,
            show_tree: parsed.show_tree,
        })
    }
}

#[derive(Default)]
struct Scanned {
    input: Option<String>,
    weights: Option<WeightTable>,
    show_tree: bool,
}

fn scan(args: &[String]) -> Result<Scanned, CliError> {
    let mut scanned = Scanned::default();

    for arg in args {
        if let Some(spec) = arg.strip_prefix("--weights=") {
            let table = parse_weights(spec)?;
            scanned.weights.get_or_insert_with(WeightTable::new).extend(table);
        } else if arg == "--tree" {
            scanned.show_tree = true;
        } else if scanned.input.is_none() {
            scanned.input = Some(arg.clone());
        } else {
            return Err(CliError::UnknownArgument(arg.clone()));
        }
    }

    Ok(scanned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encode_defaults_to_symbol_counts() {
        let parsed = EncodeArgs::from_args(&args(&["abca"])).unwrap();

        assert_eq!(parsed.weights, None);
        assert!(!parsed.show_tree);
        assert_eq!(parsed.weight_table(), vec![('a', 2), ('b', 1), ('c', 1)]);
    }

    #[test]
    fn explicit_weights_override_counts() {
        let parsed = EncodeArgs::from_args(&args(&["--tree", "ab", "--weights=b:7,a:1"])).unwrap();

        assert!(parsed.show_tree);
        assert_eq!(parsed.input, "ab");
        assert_eq!(parsed.weight_table(), vec![('b', 7), ('a', 1)]);
    }

    #[test]
    fn repeated_weights_accumulate_in_order() {
        let parsed =
            DecodeArgs::from_args(&args(&["0101", "--weights=a:1", "--weights=b:2,c:3"])).unwrap();

        assert_eq!(parsed.input, "0101");
        assert_eq!(parsed.weights, vec![('a', 1), ('b', 2), ('c', 3)]);
    }

    #[test]
    fn decode_requires_weights() {
        assert_eq!(
            DecodeArgs::from_args(&args(&["01"])),
            Err(CliError::Missing("--weights"))
        );
        assert_eq!(
            DecodeArgs::from_args(&args(&["--weights=a:1"])),
            Err(CliError::Missing("<bits>"))
        );
    }

    #[test]
    fn rejects_extra_and_malformed_arguments() {
        assert_eq!(
            EncodeArgs::from_args(&args(&["ab", "cd"])),
            Err(CliError::UnknownArgument("cd".into()))
        );
        assert_eq!(
            EncodeArgs::from_args(&args(&["ab", "--weights=a5"])),
            Err(CliError::Weights(WeightsError::MalformedEntry("a5".into())))
        );
        assert_eq!(EncodeArgs::from_args(&[]), Err(CliError::Missing("<text>")));
    }

    #[test]
    fn maximal_weight_flag_parses() {
        let parsed =
            EncodeArgs::from_args(&args(&["ab", "--weights=a:18446744073709551615,b:1"])).unwrap();
        assert_eq!(parsed.weight_table(), vec![('a', u64::MAX), ('b', 1)]);
    }
}
