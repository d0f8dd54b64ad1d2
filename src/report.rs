//! Batch resolution of many signatures into one ordered JSON report.
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SignatureError};
use crate::signature::SignatureParser;

/// Accepted input documents: a bare array, or an object with a
/// `signatures` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignatureList {
    Bare(Vec<String>),
    Document { signatures: Vec<String> },
}

impl SignatureList {
    pub fn into_signatures(self) -> Vec<String> {
        match self {
            SignatureList::Bare(xs) => xs,
            SignatureList::Document { signatures } => signatures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Resolved {
        typename: String,
    },
    Rejected {
        error: ErrorKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<usize>,
        message: String,
    },
}

impl From<Result<String, SignatureError>> for Entry {
    fn from(result: Result<String, SignatureError>) -> Self {
        match result {
            Ok(typename) => Entry::Resolved { typename },
            Err(error) => Entry::Rejected {
                error: error.kind(),
                offset: error.offset(),
                message: error.to_string(),
            },
        }
    }
}

/// Keyed by signature, in first-seen order. Duplicates collapse.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Report {
    pub entries: IndexMap<String, Entry>,
}

impl Report {
    pub fn rejected(&self) -> usize {
        self.entries.values().filter(|e| matches!(e, Entry::Rejected { .. })).count()
    }
}

/// Resolve every signature in parallel. Output order follows input order.
pub fn resolve_all(parser: &SignatureParser, signatures: &[String], strict: bool) -> Report {
    let resolved: Vec<(String, Entry)> = signatures
        .par_iter()
        .map(|signature| {
            let result = if strict { parser.parse_exact(signature) } else { parser.parse(signature) };
            (signature.clone(), Entry::from(result))
        })
        .collect();
    Report { entries: resolved.into_iter().collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_both_document_shapes() {
        let bare: SignatureList = serde_json::from_value(json!(["s", "ay"])).unwrap();
        let doc: SignatureList = serde_json::from_value(json!({"signatures": ["s", "ay"]})).unwrap();
        assert_eq!(bare.into_signatures(), doc.into_signatures());
    }

    #[test]
    fn report_preserves_order_and_counts_failures() {
        let parser = SignatureParser::new();
        let report = resolve_all(&parser, &strings(&["as", "", "a{sv}", "al", "as"]), false);
        let keys: Vec<&str> = report.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["as", "", "a{sv}", "al"]);
        assert_eq!(report.rejected(), 2);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "as": { "typename": "std::vector<std::string>" },
                "": { "error": "empty-input", "message": "empty signature" },
                "a{sv}": { "typename": "std::map<std::string,chromeos::Any>" },
                "al": { "error": "unknown-type-code", "offset": 1, "message": "unknown type code 'l' at offset 1" },
            })
        );
    }

    #[test]
    fn strict_mode_flags_trailing_input() {
        let parser = SignatureParser::new();
        let lenient = resolve_all(&parser, &strings(&["a{sv}junk"]), false);
        let strict = resolve_all(&parser, &strings(&["a{sv}junk"]), true);
        assert_eq!(lenient.rejected(), 0);
        assert_eq!(strict.rejected(), 1);
    }
}
