//! Property tests for the type-string grammar.
//!
//! Generated type strings must parse, and the canonical rendering of the
//! result must parse back to the same tree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use blork_grammar::{parse, TypeAst};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("str"),
        Just("int"),
        Just("+num"),
        Just("-int"),
        Just("lower"),
        Just("my-checker"),
        Just("null"),
    ]
    .prop_map(String::from)
}

/// Syntactically valid type strings without groups.
fn type_string() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a} & {b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}|{b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("[{a}, {b}]")),
            inner.clone().prop_map(|a| format!("{{ {a} }}")),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| format!("{{{k}: {v}}}")),
            inner.clone().prop_map(|a| format!("!{a}")),
            inner.clone().prop_map(|a| format!("{a}[]")),
            inner.clone().prop_map(|a| format!("{a}?")),
            inner.clone().prop_map(|a| format!("{a}+")),
            (inner, 0u8..5, 5u8..9).prop_map(|(a, min, max)| format!("{a}{{{min},{max}}}")),
        ]
    })
}

fn is_postfix_of_name(ast: &TypeAst) -> bool {
    match ast {
        TypeAst::Name(_) => true,
        TypeAst::NonEmpty(inner) | TypeAst::Optional(inner) | TypeAst::Array(inner) => {
            is_postfix_of_name(inner)
        }
        TypeAst::Size { inner, .. } => is_postfix_of_name(inner),
        _ => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn generated_strings_parse(source in type_string()) {
        prop_assert!(parse(&source).is_ok(), "failed to parse {source:?}");
    }

    #[test]
    fn canonical_rendering_is_stable(source in type_string()) {
        let ast = parse(&source).unwrap();
        let rendered = ast.to_string();
        let reparsed = parse(&rendered).unwrap();
        prop_assert_eq!(&reparsed, &ast);
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn and_groups_before_or(a in leaf(), b in leaf(), c in leaf()) {
        let loose = parse(&format!("{a} & {b} | {c}")).unwrap();
        let TypeAst::Or(items) = loose else {
            panic!("expected an OR at the top");
        };
        prop_assert_eq!(items.len(), 2);
        prop_assert!(matches!(&items[0], TypeAst::And(and) if and.len() == 2));

        let right = parse(&format!("{a} | {b} & {c}")).unwrap();
        let TypeAst::Or(items) = right else {
            panic!("expected an OR at the top");
        };
        prop_assert!(matches!(&items[1], TypeAst::And(and) if and.len() == 2));
    }

    #[test]
    fn postfix_applies_to_the_nearest_operand(a in leaf(), b in leaf()) {
        let ast = parse(&format!("{a} | {b}+")).unwrap();
        let TypeAst::Or(items) = ast else {
            panic!("expected an OR at the top");
        };
        prop_assert!(is_postfix_of_name(&items[1]));
        prop_assert!(matches!(&items[1], TypeAst::NonEmpty(_)));
    }

    #[test]
    fn wrapping_in_a_group_is_accepted_once(source in type_string()) {
        let wrapped = format!("({source})");
        prop_assert!(parse(&wrapped).is_ok());
    }
}
