//! Property-based tests for connection spec construction
//!
//! These tests check that building a connection spec:
//! - is deterministic for identical input
//! - never leaks reserved control keywords to the driver
//! - renames DB-API keywords exactly once

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use odbckit::connect_spec::ConnectionSpec;
    use odbckit::core::{ExceptionKind, OdbcError, Value};
    use odbckit::keywords::{remap, ReservedKeyword};

    // Test infrastructure

    /// Driver keyword names that are never reserved or remapped
    fn arb_driver_keyword() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,11}".prop_filter("not reserved or mapped", |name| {
            ReservedKeyword::parse(name).is_none() && remap(name) == name.as_str()
        })
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ._-]{0,16}"
    }

    /// A reserved keyword name in random casing
    fn arb_reserved_spelling() -> impl Strategy<Value = String> {
        (
            prop::sample::select(ReservedKeyword::ALL.to_vec()),
            prop::collection::vec(any::<bool>(), 10),
        )
            .prop_map(|(kw, upper)| {
                kw.name()
                    .chars()
                    .zip(upper)
                    .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                    .collect()
            })
    }

    fn arb_keywords() -> impl Strategy<Value = Vec<(String, Value)>> {
        prop::collection::vec(
            (arb_driver_keyword(), arb_text()).prop_map(|(k, v)| (k, Value::Text(v))),
            0..6,
        )
    }

    fn arb_positional() -> impl Strategy<Value = Option<String>> {
        prop::option::of("(DSN|Driver)=[A-Za-z0-9]{1,8}")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_build_is_deterministic(
            positional in arb_positional(),
            keywords in arb_keywords(),
        ) {
            let first = ConnectionSpec::build(positional.as_deref(), &keywords);
            let second = ConnectionSpec::build(positional.as_deref(), &keywords);
            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a.connection_string(), b.connection_string());
                    prop_assert_eq!(a, b);
                }
                (Err(OdbcError::NoConnectionInfo), Err(OdbcError::NoConnectionInfo)) => {
                    prop_assert!(positional.is_none() && keywords.is_empty());
                }
                (a, b) => prop_assert!(false, "diverging results: {:?} vs {:?}", a, b),
            }
        }

        #[test]
        fn test_segments_follow_input_order(
            positional in arb_positional(),
            keywords in arb_keywords(),
        ) {
            prop_assume!(positional.is_some() || !keywords.is_empty());
            let spec = ConnectionSpec::build(positional.as_deref(), &keywords).unwrap();

            let mut expected: Vec<String> = positional.into_iter().collect();
            expected.extend(
                keywords
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v.as_text().unwrap_or_default())),
            );
            prop_assert_eq!(spec.segments(), expected.as_slice());
        }

        #[test]
        fn test_reserved_keywords_never_reach_driver(
            reserved in arb_reserved_spelling(),
            keywords in arb_keywords(),
        ) {
            let mut all = keywords.clone();
            all.push((reserved.clone(), Value::Int(1)));
            all.push(("dsn".to_string(), Value::from("x")));

            let spec = ConnectionSpec::build(None, &all).unwrap();
            let lowered = reserved.to_ascii_lowercase();
            for segment in spec.segments() {
                let key = segment.split('=').next().unwrap_or_default();
                prop_assert_ne!(key.to_ascii_lowercase(), lowered.clone());
            }
            prop_assert_eq!(spec.segments().len(), keywords.len() + 1);
        }

        #[test]
        fn test_mapped_keywords_renamed_once(
            index in 0usize..3,
            value in arb_text(),
        ) {
            let (source, target) = [("user", "uid"), ("password", "pwd"), ("host", "server")][index];
            let spec = ConnectionSpec::build(None, &[(source.to_string(), Value::from(value.as_str()))]).unwrap();
            prop_assert_eq!(spec.connection_string(), format!("{}={}", target, value));
            // the mapped name itself is not mapped again
            prop_assert_eq!(remap(target), target);
        }

        #[test]
        fn test_non_text_driver_values_rejected(
            name in arb_driver_keyword(),
            number in any::<i64>(),
        ) {
            let err = ConnectionSpec::build(Some("DSN=x"), &[(name, Value::Int(number))]).unwrap_err();
            let is_keyword_error = matches!(err, OdbcError::KeywordNotString { found: "int", .. });
            prop_assert!(is_keyword_error);
            prop_assert_eq!(err.kind(), ExceptionKind::ProgrammingError);
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            ConnectionSpec::build(None, &[]),
            Err(OdbcError::NoConnectionInfo)
        ));
        assert!(matches!(
            ConnectionSpec::build(Some(""), &[]),
            Err(OdbcError::NoConnectionInfo)
        ));
    }

    #[test]
    fn test_only_reserved_keywords_fails() {
        let keywords = vec![
            ("autocommit".to_string(), Value::Bool(true)),
            ("timeout".to_string(), Value::Int(10)),
        ];
        let err = ConnectionSpec::build(None, &keywords).unwrap_err();
        assert!(matches!(err, OdbcError::NoConnectionInfo));
        assert_eq!(err.kind(), ExceptionKind::ProgrammingError);
    }
}
