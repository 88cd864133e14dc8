use super::*;

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[test]
fn empty_descriptor_matches_everything() {
    let row = record(serde_json::json!({"id": 1}));
    assert!(matches_all(&FilterDescriptor::new(), &row));
}

#[test]
fn contains_ignores_case() {
    let row = record(serde_json::json!({"name": "Jane Doe"}));
    assert!(matches(&Predicate::contains("name", "jane"), &row));
    assert!(!matches(&Predicate::contains("name", "john"), &row));
    assert!(!matches(&Predicate::new("name", Operator::ContainsCase, "jane"), &row));
}

#[test]
fn equality_tolerates_string_and_number_forms() {
    let row = record(serde_json::json!({"client_id": 12, "owner": "7"}));
    assert!(matches(&Predicate::eq("client_id", "12"), &row));
    assert!(matches(&Predicate::eq("owner", 7), &row));
    assert!(!matches(&Predicate::eq("owner", 8), &row));
}

#[test]
fn missing_field_only_matches_null() {
    let row = record(serde_json::json!({"id": 1}));
    assert!(matches(&Predicate::new("closed_at", Operator::Null, serde_json::Value::Null), &row));
    assert!(!matches(&Predicate::eq("closed_at", "x"), &row));
    assert!(!matches(&Predicate::contains("closed_at", "x"), &row));
}

#[test]
fn date_strings_compare_in_order() {
    let row = record(serde_json::json!({"deal_date": "2025-02-10"}));
    assert!(matches(&Predicate::new("deal_date", Operator::Gte, "2025-02-01"), &row));
    assert!(matches(&Predicate::new("deal_date", Operator::Lte, "2025-02-10"), &row));
    assert!(!matches(&Predicate::new("deal_date", Operator::Lt, "2025-02-10"), &row));
}

#[test]
fn in_checks_membership() {
    let row = record(serde_json::json!({"status": "open"}));
    let p = Predicate::new("status", Operator::In, serde_json::json!(["open", "closed"]));
    assert!(matches(&p, &row));
    let p = Predicate::new("status", Operator::In, serde_json::json!(["prospect"]));
    assert!(!matches(&p, &row));
}

#[test]
fn sort_records_orders_by_each_sorter() {
    let mut rows = vec![
        record(serde_json::json!({"id": 1, "status": "b", "amount": 5})),
        record(serde_json::json!({"id": 2, "status": "a", "amount": 1})),
        record(serde_json::json!({"id": 3, "status": "b", "amount": 9})),
    ];
    sort_records(&mut rows, &[Sort::asc("status"), Sort::desc("amount")]);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn sort_records_puts_nulls_last() {
    let mut rows = vec![
        record(serde_json::json!({"id": 1})),
        record(serde_json::json!({"id": 2, "title": "x"})),
    ];
    sort_records(&mut rows, &[Sort::asc("title")]);
    assert_eq!(rows[0]["id"], serde_json::json!(2));
}

#[test]
fn descending_sort_also_puts_nulls_last() {
    let mut rows = vec![
        record(serde_json::json!({"id": 1})),
        record(serde_json::json!({"id": 2, "title": "a"})),
        record(serde_json::json!({"id": 3, "title": "b"})),
    ];
    sort_records(&mut rows, &[Sort::desc("title")]);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn mixed_types_sort_by_rank_then_value() {
    let mut rows = vec![
        record(serde_json::json!({"id": 1, "amount": "abc"})),
        record(serde_json::json!({"id": 2, "amount": 900})),
        record(serde_json::json!({"id": 3, "amount": "800"})),
        record(serde_json::json!({"id": 4, "amount": true})),
        record(serde_json::json!({"id": 5, "amount": ["x"]})),
        record(serde_json::json!({"id": 6})),
        record(serde_json::json!({"id": 7, "amount": 10})),
    ];
    sort_records(&mut rows, &[Sort::asc("amount")]);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![4, 7, 3, 2, 1, 5, 6]);

    sort_records(&mut rows, &[Sort::desc("amount")]);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![5, 1, 2, 3, 7, 4, 6]);
}

#[test]
fn sort_key_order_is_transitive_across_types() {
    let values = [
        serde_json::json!(false),
        serde_json::json!(3),
        serde_json::json!("10"),
        serde_json::json!(2.5),
        serde_json::json!("b"),
        serde_json::json!("a"),
        serde_json::json!({"k": 1}),
        serde_json::json!("NaN"),
    ];
    let keys: Vec<SortKey<'_>> = values.iter().map(SortKey::of).collect();
    for a in &keys {
        for b in &keys {
            assert_eq!(a.cmp(b), b.cmp(a).reverse());
            for c in &keys {
                if a <= b && b <= c {
                    assert!(a <= c, "{a:?} <= {b:?} <= {c:?}");
                }
            }
        }
    }
}
