//! Readers for the transaction file and the parameter file.
//!
//! Any malformed input is fatal: the miner never starts from partial data.

use crate::core::{Error, Item, Result, Transaction, TransactionStore};
use crate::params::{ParameterTable, ParameterTableBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::file_system(format!("Failed to read {}", path.display()), path, e))
}

/// Parse a positive item identifier.
pub fn parse_item(token: &str) -> std::result::Result<Item, String> {
    match token.trim().parse::<Item>() {
        Ok(0) => Err("item identifiers must be positive, got 0".to_string()),
        Ok(item) => Ok(item),
        Err(_) => Err(format!("invalid item '{}'", token.trim())),
    }
}

fn parse_value(token: &str) -> std::result::Result<f64, String> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", token.trim()))
}

pub fn load_transactions(path: &Path) -> Result<TransactionStore> {
    let contents = read_source(path)?;
    let store = parse_transactions(&contents, path)?;
    tracing::info!(
        path = %path.display(),
        transactions = store.len(),
        "Read transactions"
    );
    Ok(store)
}

/// One comma-separated transaction per line. Blank lines and lines without
/// items are skipped.
pub fn parse_transactions(contents: &str, source: &Path) -> Result<TransactionStore> {
    let mut transactions = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let items = line
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_item)
            .collect::<std::result::Result<Vec<Item>, String>>()
            .map_err(|message| Error::parse(source, index + 1, message))?;
        if !items.is_empty() {
            transactions.push(Transaction::new(items));
        }
    }

    if transactions.is_empty() {
        return Err(Error::Validation(format!(
            "{} contains no transactions",
            source.display()
        )));
    }
    Ok(TransactionStore::new(transactions))
}

pub fn load_parameters(path: &Path) -> Result<ParameterTable> {
    let contents = read_source(path)?;
    let params = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_parameters_toml(&contents)?,
        _ => parse_parameters(&contents, path)?,
    };
    params.validate()?;
    tracing::info!(
        sdc = params.sdc(),
        avpt = params.avpt(),
        mis_overrides = params.mis_overrides().len(),
        price_overrides = params.price_overrides().len(),
        "Read parameters"
    );
    Ok(params)
}

enum ParameterLine {
    Mis(Option<Item>, f64),
    Price(Option<Item>, f64),
    Sdc(f64),
    Avpt(f64),
}

/// Line format: `MIS(<item>|rest) = v`, `Price(<item>|rest) = v`,
/// `SDC = v`, `AVPT = v`. `#` starts a comment line.
pub fn parse_parameters(contents: &str, source: &Path) -> Result<ParameterTable> {
    let mut builder = ParameterTable::builder();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed =
            parse_parameter_line(line).map_err(|message| Error::parse(source, index + 1, message))?;
        builder = match parsed {
            Some(entry) => apply_parameter(builder, entry),
            None => {
                log::warn!(
                    "Ignoring unrecognized parameter line {} in {}: {}",
                    index + 1,
                    source.display(),
                    line
                );
                builder
            }
        };
    }
    Ok(builder.build())
}

fn apply_parameter(builder: ParameterTableBuilder, entry: ParameterLine) -> ParameterTableBuilder {
    match entry {
        ParameterLine::Mis(Some(item), value) => builder.mis(item, value),
        ParameterLine::Mis(None, value) => builder.mis_rest(value),
        ParameterLine::Price(Some(item), value) => builder.price(item, value),
        ParameterLine::Price(None, value) => builder.price_rest(value),
        ParameterLine::Sdc(value) => builder.sdc(value),
        ParameterLine::Avpt(value) => builder.avpt(value),
    }
}

fn parse_parameter_line(line: &str) -> std::result::Result<Option<ParameterLine>, String> {
    let recognized = ["MIS(", "Price(", "SDC", "AVPT"]
        .iter()
        .any(|prefix| line.starts_with(prefix));
    if !recognized {
        return Ok(None);
    }

    let (key, value) = match line.split_once('=') {
        Some((key, value)) if !value.contains('=') => (key.trim(), parse_value(value)?),
        _ => return Err(format!("expected '<name> = <value>', got '{line}'")),
    };

    let entry = if let Some(target) = key.strip_prefix("MIS(") {
        ParameterLine::Mis(parse_target(target)?, value)
    } else if let Some(target) = key.strip_prefix("Price(") {
        ParameterLine::Price(parse_target(target)?, value)
    } else if key == "SDC" {
        ParameterLine::Sdc(value)
    } else if key == "AVPT" {
        ParameterLine::Avpt(value)
    } else {
        return Err(format!("unknown parameter '{key}'"));
    };
    Ok(Some(entry))
}

/// `rest)` maps to `None`, `<item>)` to the item.
fn parse_target(target: &str) -> std::result::Result<Option<Item>, String> {
    let inner = target
        .strip_suffix(')')
        .ok_or_else(|| format!("missing ')' in '{target}'"))?
        .trim();
    if inner.eq_ignore_ascii_case("rest") {
        Ok(None)
    } else {
        parse_item(inner).map(Some)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterDocument {
    #[serde(default)]
    sdc: f64,
    #[serde(default)]
    avpt: f64,
    #[serde(default)]
    mis: ValueSection,
    #[serde(default)]
    price: ValueSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ValueSection {
    rest: Option<f64>,
    #[serde(default)]
    items: BTreeMap<String, f64>,
}

/// TOML parameter document with `sdc`, `avpt`, `[mis]` and `[price]`.
pub fn parse_parameters_toml(contents: &str) -> Result<ParameterTable> {
    let document: ParameterDocument = toml::from_str(contents)?;

    let mut builder = ParameterTable::builder()
        .sdc(document.sdc)
        .avpt(document.avpt);
    if let Some(rest) = document.mis.rest {
        builder = builder.mis_rest(rest);
    }
    if let Some(rest) = document.price.rest {
        builder = builder.price_rest(rest);
    }
    for (key, value) in &document.mis.items {
        let item = parse_item(key).map_err(Error::Validation)?;
        builder = builder.mis(item, *value);
    }
    for (key, value) in &document.price.items {
        let item = parse_item(key).map_err(Error::Validation)?;
        builder = builder.price(item, *value);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    fn source() -> PathBuf {
        PathBuf::from("input.txt")
    }

    #[test]
    fn parses_comma_separated_transactions() {
        let store = parse_transactions("1, 2, 3\n\n20,10\n  5 ,\n", &source()).unwrap();
        assert_eq!(store.len(), 3);
        let rows: Vec<&[Item]> = store.iter().map(|t| t.items()).collect();
        let expected: Vec<&[Item]> = vec![&[1, 2, 3], &[10, 20], &[5]];
        assert_eq!(rows, expected);
    }

    #[test]
    fn rejects_non_numeric_item_with_line_number() {
        let err = parse_transactions("1, 2\n3, x\n", &source()).unwrap_err();
        match err {
            Error::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_zero_item() {
        assert!(matches!(
            parse_transactions("0, 1\n", &source()),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_input_without_transactions() {
        assert!(matches!(
            parse_transactions("\n , \n", &source()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn parses_parameter_lines() {
        let contents = indoc! {"
            MIS(1) = 0.02
            MIS(30) = 0.5
            MIS(rest) = 0.1
            # prices
            Price(1) = 12
            Price(rest) = 3.5
            SDC = 0.1
            AVPT = 4
        "};
        let params = parse_parameters(contents, &source()).unwrap();
        assert_eq!(params.mis(1), 0.02);
        assert_eq!(params.mis(30), 0.5);
        assert_eq!(params.mis(7), 0.1);
        assert_eq!(params.price(1), 12.0);
        assert_eq!(params.price(7), 3.5);
        assert_eq!(params.sdc(), 0.1);
        assert_eq!(params.avpt(), 4.0);
    }

    #[test]
    fn empty_parameter_file_keeps_defaults() {
        let params = parse_parameters("", &source()).unwrap();
        assert_eq!(params, ParameterTable::default());
    }

    #[test]
    fn unrecognized_parameter_lines_are_skipped() {
        let params = parse_parameters("Prince(3) = 9\nSDC = 0.2\n", &source()).unwrap();
        assert_eq!(params.price(3), 5.0);
        assert_eq!(params.sdc(), 0.2);
    }

    #[test]
    fn malformed_parameter_value_is_fatal() {
        let err = parse_parameters("MIS(1) = 0.1\nMIS(2) = abc\n", &source()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_parameters("MIS(x) = 0.1\n", &source()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = parse_parameters("SDC 0.1\n", &source()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn parses_toml_parameters() {
        let contents = indoc! {r#"
            sdc = 0.25
            avpt = 5

            [mis]
            rest = 0.05
            items = { "10" = 0.4 }

            [price]
            items = { "10" = 8.0 }
        "#};
        let params = parse_parameters_toml(contents).unwrap();
        assert_eq!(params.sdc(), 0.25);
        assert_eq!(params.avpt(), 5.0);
        assert_eq!(params.mis(10), 0.4);
        assert_eq!(params.mis(11), 0.05);
        assert_eq!(params.price(10), 8.0);
        assert_eq!(params.price(11), 5.0);
    }

    #[test]
    fn toml_rejects_bad_item_key() {
        let err = parse_parameters_toml("[mis]\nitems = { \"abc\" = 0.1 }\n").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
