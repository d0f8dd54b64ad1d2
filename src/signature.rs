//! Signature → typename front API.
//!
//! A parse runs three phases, mirroring the rest of the crate:
//!
//! 1. [`crate::scan`] delimits one complete type and rejects bad characters,
//!    stray braces and early end of input.
//! 2. [`crate::lower`] checks dict-entry arity and keys, outermost first, and
//!    produces the typed [`TypeTree`].
//! 3. [`crate::codegen`] renders the tree with the configured typename table.
//!
//! `parse` tolerates trailing input after the first complete type so that a
//! signature embedded in a larger string still resolves. Callers that need the
//! whole string consumed use [`SignatureParser::parse_exact`].

use tracing::{debug, trace};

use crate::codegen::Codegen;
use crate::error::SignatureError;
use crate::ir::TypeTree;
use crate::lower::lower_to_ir;
use crate::scan::scan;
use crate::typename::TypenameConfig;

/// Outcome of [`SignatureParser::parse_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub typename: String,
    /// Bytes of input making up the complete type.
    pub consumed: usize,
}

// ------------------------------- Pure core -------------------------------- //

/// Parse the first complete type of `signature` under `config`.
pub fn parse_signature(config: &TypenameConfig, signature: &str) -> Result<String, SignatureError> {
    parse_at(config, signature, 0).map(|parsed| parsed.typename)
}

fn parse_at(config: &TypenameConfig, input: &str, start: usize) -> Result<Parsed, SignatureError> {
    let result = scan(input, start).and_then(|shape| {
        let tree: TypeTree = lower_to_ir(&shape)?;
        trace!(nodes = tree.nodes.len(), depth = tree.depth(), "lowered signature");
        Ok(Parsed {
            typename: Codegen::new(config).emit(&tree),
            consumed: shape.end - start,
        })
    });
    match &result {
        Ok(parsed) => trace!(signature = input, typename = %parsed.typename, "parsed signature"),
        Err(error) => debug!(signature = input, %error, "rejected signature"),
    }
    result
}

// ------------------------------- Front API -------------------------------- //

/// Owns the configuration; parsing borrows it immutably, so one parser can be
/// shared across threads once configured.
#[derive(Debug, Clone, Default)]
pub struct SignatureParser {
    config: TypenameConfig,
}

impl SignatureParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TypenameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TypenameConfig {
        &self.config
    }

    /// Replace the typename emitted for object paths (`o`).
    pub fn set_object_path_typename(&mut self, name: impl Into<String>) {
        self.config.object_path = Some(name.into());
    }

    /// Typename of the first complete type in `signature`.
    pub fn parse(&self, signature: &str) -> Result<String, SignatureError> {
        parse_signature(&self.config, signature)
    }

    /// Like [`Self::parse`], also reporting how much input was consumed.
    pub fn parse_prefix(&self, signature: &str) -> Result<Parsed, SignatureError> {
        parse_at(&self.config, signature, 0)
    }

    /// Like [`Self::parse`], but the complete type must span all of `signature`.
    pub fn parse_exact(&self, signature: &str) -> Result<String, SignatureError> {
        let parsed = self.parse_prefix(signature)?;
        match signature[parsed.consumed..].chars().next() {
            None => Ok(parsed.typename),
            Some(found) => Err(SignatureError::TrailingCharacters { offset: parsed.consumed, found }),
        }
    }

    /// Split a concatenation of complete types (e.g. a method's argument
    /// list `sa{sv}as`) into one typename per type. Empty input gives an
    /// empty list.
    pub fn parse_sequence(&self, signature: &str) -> Result<Vec<String>, SignatureError> {
        let mut out = Vec::new();
        let mut start = 0;
        while start < signature.len() {
            let parsed = parse_at(&self.config, signature, start)?;
            start += parsed.consumed;
            out.push(parsed.typename);
        }
        Ok(out)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typename::{DEFAULT_OBJECT_PATH_TYPENAME, TypeCode};

    #[test]
    fn every_primitive_maps_to_its_table_entry() {
        let parser = SignatureParser::new();
        for code in TypeCode::ALL {
            let signature = code.as_char().to_string();
            assert_eq!(parser.parse(&signature).as_deref(), Ok(code.default_typename()));
        }
    }

    #[test]
    fn object_path_override() {
        let mut parser = SignatureParser::new();
        assert_eq!(parser.parse("o").as_deref(), Ok(DEFAULT_OBJECT_PATH_TYPENAME));
        parser.set_object_path_typename("ObjectPathType");
        assert_eq!(parser.parse("o").as_deref(), Ok("ObjectPathType"));
        assert_eq!(
            parser.parse("a{oa{sv}}").as_deref(),
            Ok("std::map<ObjectPathType,std::map<std::string,chromeos::Any>>")
        );
    }

    #[test]
    fn prefix_reports_consumed_length() {
        let parser = SignatureParser::new();
        let parsed = parser.parse_prefix("a{sv}TRAILING").unwrap();
        assert_eq!(parsed.consumed, 5);
        assert_eq!(parsed.typename, parser.parse("a{sv}").unwrap());
    }

    #[test]
    fn exact_rejects_trailing_input() {
        let parser = SignatureParser::new();
        assert_eq!(parser.parse_exact("ay").as_deref(), Ok("std::vector<uint8_t>"));
        assert_eq!(
            parser.parse_exact("a{sv}x"),
            Err(SignatureError::TrailingCharacters { offset: 5, found: 'x' })
        );
        // structural errors still win over trailing input
        assert_eq!(parser.parse_exact("a{s}x"), Err(SignatureError::TooFewMembers { offset: 3 }));
    }

    #[test]
    fn sequences_split_on_complete_types() {
        let parser = SignatureParser::new();
        assert_eq!(
            parser.parse_sequence("sa{sv}as").unwrap(),
            vec![
                "std::string".to_string(),
                "std::map<std::string,chromeos::Any>".to_string(),
                "std::vector<std::string>".to_string(),
            ]
        );
        assert_eq!(parser.parse_sequence("").unwrap(), Vec::<String>::new());
        assert_eq!(
            parser.parse_sequence("iua"),
            Err(SignatureError::MissingArrayElement { offset: 2 })
        );
        assert_eq!(
            parser.parse_sequence("s}"),
            Err(SignatureError::UnexpectedClose { offset: 1 })
        );
    }

    #[test]
    fn pure_core_matches_parser() {
        let config = TypenameConfig::with_object_path("P");
        let parser = SignatureParser::with_config(config.clone());
        for signature in ["o", "ao", "a{os}", "a{s", "", "aay"] {
            assert_eq!(parse_signature(&config, signature), parser.parse(signature));
        }
    }

    #[test]
    fn deep_arrays_render_without_recursion() {
        let depth = 50_000;
        let signature = format!("{}b", "a".repeat(depth));
        let typename = SignatureParser::new().parse(&signature).unwrap();
        assert!(typename.starts_with("std::vector<std::vector<"));
        assert_eq!(typename.matches("std::vector<").count(), depth);
        assert!(typename.ends_with(&format!("bool{}", ">".repeat(depth))));
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignatureParser>();

        let mut parser = SignatureParser::new();
        parser.set_object_path_typename("Path");
        let parser = &parser;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || parser.parse("a{oa{sv}}")))
                .collect();
            for handle in handles {
                assert_eq!(
                    handle.join().unwrap().as_deref(),
                    Ok("std::map<Path,std::map<std::string,chromeos::Any>>")
                );
            }
        });
    }
}
