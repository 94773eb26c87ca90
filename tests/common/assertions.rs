use serde_json::Value;

use retrieval::MatchRecord;

/// Assert that a serialized query body carries no key named `field`.
pub fn assert_field_absent(body: &Value, field: &str) {
    let obj = body.as_object().expect("query body must be a JSON object");
    assert!(
        !obj.contains_key(field),
        "expected '{field}' to be absent from request body, got {body}"
    );
}

/// Assert that match ids come back in exactly the given order.
pub fn assert_match_order(matches: &[MatchRecord], expected: &[&str]) {
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, expected, "match order differs from upstream order");
}

/// Assert that every match has a metadata map, even if empty.
pub fn assert_metadata_never_null(matches: &[MatchRecord]) {
    for m in matches {
        let value = serde_json::to_value(m).expect("match serializes");
        assert!(
            value["metadata"].is_object(),
            "match '{}' serialized metadata as {}",
            m.id,
            value["metadata"]
        );
    }
}
