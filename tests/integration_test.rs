use std::io::Write;
use std::sync::Arc;
use std::thread;

use odata_jpql::edm::EdmSimpleTypeKind as Kind;
use odata_jpql::expression::{
    BinaryOperator, EdmProperty, Expression, KeyPredicate, MethodOperator, OrderByItem,
};
use odata_jpql::jpql::ErrorKind;
use odata_jpql::request::TranslationRequest;
use odata_jpql::value::NativeType;
use odata_jpql::{JpqlTranslator, TranslationContext, TranslatorConfig, Value};
use tempfile::NamedTempFile;

fn property(name: &str, kind: Kind) -> Expression {
    Expression::property(EdmProperty::new(name, kind))
}

fn starts_with_a() -> Expression {
    Expression::method(
        MethodOperator::StartsWith,
        vec![
            property("Name", Kind::String),
            Expression::literal("'A'", Kind::String),
        ],
    )
}

#[test]
fn test_age_filter_round_trip() {
    let translator = JpqlTranslator::default();
    let filter = Expression::filter(Expression::gt(
        property("Age", Kind::Int32),
        Expression::literal("40", Kind::Int32),
    ));

    let translation = translator.where_clause(&filter, Some("t")).unwrap();
    assert_eq!(translation.fragment, "(t.Age > ?1)");
    let bound: Vec<(usize, Value)> = translation.parameters.into_iter().collect();
    assert_eq!(bound, vec![(1, Value::Int(40))]);
}

#[test]
fn test_startswith_comparisons() {
    let translator = JpqlTranslator::default();

    let translation = translator
        .where_clause(&Expression::eq(starts_with_a(), Expression::boolean(true)), None)
        .unwrap();
    assert_eq!(translation.fragment, r"(Name LIKE CONCAT(?1,'%') ESCAPE '\')");
    assert_eq!(translation.parameters.get(1), Some(&Value::String("A".into())));

    let translation = translator
        .where_clause(&Expression::eq(starts_with_a(), Expression::boolean(false)), None)
        .unwrap();
    assert_eq!(
        translation.fragment,
        r"(Name NOT LIKE CONCAT(?1,'%') ESCAPE '\' )"
    );

    let err = translator
        .where_clause(&Expression::lt(starts_with_a(), Expression::boolean(true)), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUsage);
}

#[test]
fn test_key_predicate() {
    let translator = JpqlTranslator::default();
    let id = EdmProperty::new("Id", Kind::Int32);
    let translation = translator
        .key_predicates(&[KeyPredicate::new(id, "'42'")], Some("t"))
        .unwrap()
        .unwrap();
    assert_eq!(translation.fragment, "t.Id = ?1");
    assert_eq!(translation.parameters.get(1), Some(&Value::Int(42)));
}

#[test]
fn test_order_by() {
    let translator = JpqlTranslator::default();
    let items = [
        OrderByItem::asc(EdmProperty::new("Name", Kind::String)),
        OrderByItem::desc(EdmProperty::new("Age", Kind::Int32)),
    ];
    let fragment = translator.order_by(&items, Some("t")).unwrap();
    assert_eq!(fragment, "t.Name , t.Age DESC");
    assert_eq!(fragment.trim(), fragment);
    assert_eq!(translator.order_by(&[], Some("t")).unwrap(), "");
}

#[test]
fn test_composite_missing_components() {
    let translator = JpqlTranslator::default();
    let parts: Vec<EdmProperty> = (1..=4)
        .map(|i| EdmProperty::new(format!("K{i}"), Kind::Int32))
        .collect();
    let key = EdmProperty::composite("Key", parts);

    for (literal, bound) in [("'1;2;3;4'", 4), ("'1;2'", 2), ("'1;2;;'", 2), ("''", 0)] {
        let filter = Expression::eq(
            Expression::property(key.clone()),
            Expression::literal(literal, Kind::String),
        );
        let translation = translator.where_clause(&filter, Some("t")).unwrap();
        let conjuncts = translation.fragment.matches(" AND ").count() + 1;
        assert_eq!(conjuncts, 4, "{literal}: {}", translation.fragment);
        assert_eq!(
            translation.fragment.matches("IS null").count(),
            4 - bound,
            "{literal}"
        );
        assert_eq!(translation.parameters.len(), bound);
    }
}

#[test]
fn test_double_negation_of_literal() {
    let translator = JpqlTranslator::default();
    let literal = Expression::literal("3", Kind::Int32);
    let plain = translator.where_clause(&literal, Some("t")).unwrap();
    let twice = translator
        .where_clause(&Expression::minus(Expression::minus(literal)), Some("t"))
        .unwrap();
    assert_eq!(twice, plain);
}

#[test]
fn test_unsupported_operation_leaves_context_empty() {
    let translator = JpqlTranslator::default();
    let mut ctx = TranslationContext::new();
    let filter = Expression::and(
        Expression::eq(
            property("Name", Kind::String),
            Expression::literal("'x'", Kind::String),
        ),
        Expression::binary(
            BinaryOperator::Mul,
            property("Age", Kind::Int32),
            Expression::literal("2", Kind::Int32),
        ),
    );

    let err = translator
        .compile_where_into(&mut ctx, &filter, Some("t"))
        .unwrap_err();
    assert!(err.is_not_implemented());
    assert!(ctx.parameters().is_empty());
    assert_eq!(ctx.next_index(), 1);
}

#[test]
fn test_escaped_text_is_bound_not_inlined() {
    let translator = JpqlTranslator::default();
    let filter = Expression::eq(
        property("Name", Kind::String),
        Expression::literal("'x'' OR 1=1 --'", Kind::String),
    );
    let translation = translator.where_clause(&filter, Some("t")).unwrap();
    assert_eq!(translation.fragment, "(t.Name = ?1)");
    assert_eq!(
        translation.parameters.get(1),
        Some(&Value::String("x'' OR 1=1 --".into()))
    );
}

#[test]
fn test_boolean_key_and_filter_text_is_validated() {
    let translator = JpqlTranslator::default();
    let flag = EdmProperty::new("Flag", Kind::Boolean);
    let err = translator
        .key_predicates(&[KeyPredicate::new(flag, "'1=1 OR t.secret <> 0'")], Some("t"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Translation);

    let mut ctx = TranslationContext::new();
    let filter = Expression::and(
        Expression::gt(
            property("Age", Kind::Int32),
            Expression::literal("40", Kind::Int32),
        ),
        Expression::eq(
            property("Name", Kind::String),
            Expression::literal("'x) OR (1=1'", Kind::Null),
        ),
    );
    let err = translator
        .compile_where_into(&mut ctx, &filter, Some("t"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Translation);
    assert!(ctx.parameters().is_empty());
    assert_eq!(ctx.next_index(), 1);
}

#[test]
fn test_mapped_native_types() {
    let translator = JpqlTranslator::default();
    let code = EdmProperty::new("Code", Kind::String)
        .with_internal_name("code")
        .with_native_type(NativeType::Char);
    let translation = translator
        .key_predicates(&[KeyPredicate::new(code, "'Q'")], Some("t"))
        .unwrap()
        .unwrap();
    assert_eq!(translation.fragment, "t.code = ?1");
    assert_eq!(translation.parameters.get(1), Some(&Value::Char('Q')));

    let id = EdmProperty::new("Id", Kind::Int32).with_native_type(NativeType::Timestamp);
    let err = translator
        .key_predicates(&[KeyPredicate::new(id, "1")], Some("t"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Translation);
}

#[test]
fn test_concurrent_translations() {
    let translator = Arc::new(JpqlTranslator::default());
    let mut handles = vec![];

    for i in 0..8 {
        let translator = translator.clone();
        handles.push(thread::spawn(move || {
            let filter = Expression::and(
                Expression::ge(
                    property("Age", Kind::Int32),
                    Expression::literal(i.to_string(), Kind::Int32),
                ),
                Expression::lt(
                    property("Age", Kind::Int32),
                    Expression::literal((i + 10).to_string(), Kind::Int32),
                ),
            );
            let translation = translator.where_clause(&filter, Some("t")).unwrap();
            assert_eq!(translation.fragment, "((t.Age >= ?1) AND (t.Age < ?2))");
            assert_eq!(translation.parameters.get(1), Some(&Value::Int(i)));
            assert_eq!(translation.parameters.get(2), Some(&Value::Int(i + 10)));
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_request_file_with_config() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(config_file, r#"{{"placeholder_prefix": ":p", "composite_separator": "|"}}"#).unwrap();
    let config = TranslatorConfig::from_file(config_file.path()).unwrap();

    let mut request_file = NamedTempFile::new().unwrap();
    write!(
        request_file,
        r#"{{
            "alias": "o",
            "keys": [{{
                "property": {{
                    "name": "Key",
                    "edm_type": {{"simple": "String"}},
                    "composite": [
                        {{"name": "OrderId", "edm_type": {{"simple": "Int64"}}, "mapping": {{"internal_name": "orderId"}}}},
                        {{"name": "Line", "edm_type": {{"simple": "Int16"}}, "mapping": {{"internal_name": "line"}}}}
                    ]
                }},
                "literal": "'10|2'"
            }}],
            "filter": {{
                "kind": "binary",
                "operator": "eq",
                "left": {{"kind": "method", "method": "to_lower", "parameters": [
                    {{"kind": "property", "property": {{"name": "Note", "edm_type": {{"simple": "String"}}}}}}
                ]}},
                "right": {{"kind": "literal", "uri_literal": "'rush'", "edm_type": "String"}}
            }}
        }}"#
    )
    .unwrap();

    let request = TranslationRequest::from_file(request_file.path()).unwrap();
    let response = request
        .translate(&JpqlTranslator::new(config), None)
        .unwrap();

    assert_eq!(
        response.where_clause().as_deref(),
        Some("(o.orderId = :p1 AND o.line = :p2) AND (LOWER(o.Note) = :p3)")
    );
    assert_eq!(response.select.as_deref(), Some("o"));
    let values: Vec<Value> = response.parameters.into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![
            Value::Long(10),
            Value::Short(2),
            Value::String("rush".into())
        ]
    );
}
