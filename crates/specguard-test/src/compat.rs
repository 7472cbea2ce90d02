//! Compatibility scenarios over the fixture specs.
//!
//! Each case compares an old and a new fixture with the default rules and
//! checks the exact set of diagnostics.
//!
//! Run with: `cargo test -p specguard-test`

use specguard_diff::{default_rules, DiffWalker, Rule};

use crate::{compare_fixtures, load_fixture};

/// Compare `old` with `new` and assert the diagnostics, ignoring order.
fn assert_violations(old: &str, new: &str, expected: &[&str]) {
    let mut actual = compare_fixtures(old, new)
        .unwrap_or_else(|e| panic!("failed to load {} / {}: {}", old, new, e));
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();

    actual.sort();
    expected.sort();
    assert_eq!(actual, expected, "{} -> {}", old, new);
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn petstore_is_compatible_with_itself() {
    assert_violations("petstore.yaml", "petstore.yaml", &[]);
}

#[test]
fn recursive_is_compatible_with_itself() {
    assert_violations("recursive.yaml", "recursive.yaml", &[]);
}

#[test]
fn uber_is_compatible_with_itself() {
    assert_violations("uber.yaml", "uber.yaml", &[]);
}

#[test]
fn json_fixture_is_compatible_with_itself() {
    assert_violations("minimal.json", "minimal.json", &[]);
}

// ---------------------------------------------------------------------------
// Petstore
// ---------------------------------------------------------------------------

#[test]
fn petstore_added_required_parameter() {
    assert_violations(
        "petstore.yaml",
        "petstore-added-parameter.yaml",
        &["Path /store/order/{orderId}, Operation GET, Parameter newParam : The required parameter 'newParam' has been added in the new spec."],
    );
}

#[test]
fn petstore_removed_enum_value_in_request_bodies() {
    assert_violations(
        "petstore.yaml",
        "petstore-removed-enum-value.yaml",
        &[
            "Path /user, Operation POST, Parameter body, Property sex : The enum value 'UNKNOWN' has been removed in the new spec.",
            "Path /user/createWithArray, Operation POST, Parameter body, Property items, Property sex : The enum value 'UNKNOWN' has been removed in the new spec.",
            "Path /user/{username}, Operation PUT, Parameter body, Property sex : The enum value 'UNKNOWN' has been removed in the new spec.",
        ],
    );
}

#[test]
fn petstore_removed_operation_and_path() {
    assert_violations(
        "petstore.yaml",
        "petstore-removed-operation.yaml",
        &[
            "Path /pet, Operation POST : The operation was removed in the new spec.",
            "Path /user/createWithList : The path was removed in the new spec.",
        ],
    );
}

#[test]
fn petstore_added_enum_value_in_request_is_compatible() {
    // Reverse direction: UNKNOWN appears in request bodies and a response.
    // Only the response side is a break.
    assert_violations(
        "petstore-removed-enum-value.yaml",
        "petstore.yaml",
        &["Path /user/{username}, Operation GET, Response 200, Property sex : The enum value 'UNKNOWN' has been added in the new spec."],
    );
}

#[test]
fn petstore_added_operation_is_compatible() {
    assert_violations("petstore-removed-operation.yaml", "petstore.yaml", &[]);
}

// ---------------------------------------------------------------------------
// Recursive definitions
// ---------------------------------------------------------------------------

#[test]
fn recursive_change_behind_a_cycle_is_reported_once() {
    assert_violations(
        "recursive.yaml",
        "recursive-type-changed.yaml",
        &[
            "Path /nodes/{id}, Operation GET, Response 200, Property edges, Property items, Property weight : The type of property 'weight' has changed in the new spec: 'integer' was previously 'number'.",
            "Path /nodes/{id}, Operation GET, Response 200, Property edges, Property items, Property weight : The format of property 'weight' has changed in the new spec: 'int32' was previously 'double'.",
        ],
    );
}

// ---------------------------------------------------------------------------
// Uber
// ---------------------------------------------------------------------------

#[test]
fn uber_removed_response_property() {
    assert_violations(
        "uber.yaml",
        "uber-removed-property.yaml",
        &[
            "Path /products, Operation GET, Response 200, Property items, Property image : The property 'image' has been removed in the new spec.",
            "Path /estimates/time, Operation GET, Response 200, Property items, Property image : The property 'image' has been removed in the new spec.",
        ],
    );
}

#[test]
fn uber_property_type_changed() {
    assert_violations(
        "uber.yaml",
        "uber-type-changed.yaml",
        &["Path /me, Operation GET, Response 200, Property promo_code : The type of property 'promo_code' has changed in the new spec: 'integer' was previously 'string'."],
    );
}

#[test]
fn uber_parameter_location_changed() {
    assert_violations(
        "uber.yaml",
        "uber-parameter-location-changed.yaml",
        &["Path /products, Operation GET, Parameter latitude : The location of parameter 'latitude' has changed in the new spec: 'header' previously was 'query'."],
    );
}

#[test]
fn uber_added_enum_value_in_response() {
    assert_violations(
        "uber.yaml",
        "uber-added-enum-value.yaml",
        &["Path /me, Operation GET, Response 200, Property status : The enum value 'IN_BETWEEN' has been added in the new spec."],
    );
}

#[test]
fn uber_added_response_property_is_compatible() {
    assert_violations("uber-removed-property.yaml", "uber.yaml", &[]);
}

// ---------------------------------------------------------------------------
// Rule attribution
// ---------------------------------------------------------------------------

#[test]
fn violations_are_attributed_to_their_rule() {
    let old = load_fixture("uber.yaml").expect("load uber.yaml");
    let new = load_fixture("uber-added-enum-value.yaml").expect("load variant");

    let mut rules = default_rules();
    DiffWalker::new().walk(&mut rules, &old, &new);

    let grouped = rules.errors_by_rule();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].0, "added-enum-value-in-response");
    assert_eq!(rules.errors().len(), 1);
}

#[test]
fn non_swagger_fixture_is_rejected() {
    let err = load_fixture("invalid-openapi3.yaml").expect_err("openapi 3 is not supported");
    assert_eq!(err.code(), "E1001");
}
