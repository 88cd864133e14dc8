use super::*;

fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[test]
fn unfiltered_request_selects_everything() {
    let params = encode_list_query(&FilterDescriptor::new(), &[], None, None);
    assert_eq!(pairs(&params), vec![("select", "*")]);
}

#[test]
fn contains_maps_to_case_insensitive_like() {
    let filters = FilterDescriptor::new().with(Predicate::contains("name", "Jane"));
    assert_eq!(encode_filters(&filters), vec![("name".to_owned(), "ilike.*Jane*".to_owned())]);
}

#[test]
fn comparison_operators_use_postgrest_names() {
    let filters = FilterDescriptor::new()
        .with(Predicate::new("amount", Operator::Gte, 100))
        .with(Predicate::new("status", Operator::Ne, "closed"))
        .with(Predicate::new("archived", Operator::Eq, false))
        .with(Predicate::new("deleted_at", Operator::Null, serde_json::Value::Null));
    let params = encode_filters(&filters);
    assert_eq!(
        pairs(&params),
        vec![
            ("amount", "gte.100"),
            ("status", "neq.closed"),
            ("archived", "eq.false"),
            ("deleted_at", "is.null"),
        ]
    );
}

#[test]
fn in_lists_quote_reserved_characters() {
    let filters = FilterDescriptor::new().with(Predicate::new(
        "status",
        Operator::In,
        serde_json::json!(["1. new", "a,b", 3]),
    ));
    let params = encode_filters(&filters);
    assert_eq!(params[0].1, "in.(1. new,\"a,b\",3)");
}

#[test]
fn order_limit_and_offset_follow_filters() {
    let filters = FilterDescriptor::new().with(Predicate::eq("id", "u1"));
    let page = Pagination { page_size: 50, current: 2 };
    let params = encode_list_query(
        &filters,
        &[Sort::desc("deal_date"), Sort::asc("title")],
        Some(&page),
        Some("id,title"),
    );
    assert_eq!(
        pairs(&params),
        vec![
            ("select", "id,title"),
            ("id", "eq.u1"),
            ("order", "deal_date.desc,title.asc"),
            ("limit", "50"),
            ("offset", "50"),
        ]
    );
}

#[test]
fn content_range_total_parses() {
    assert_eq!(parse_content_range_total("0-49/123"), Some(123));
    assert_eq!(parse_content_range_total("*/0"), Some(0));
    assert_eq!(parse_content_range_total("0-9/*"), None);
    assert_eq!(parse_content_range_total("garbage"), None);
}
