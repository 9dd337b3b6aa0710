use principal_core::{Error, Principal};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn record_form_builds_a_complete_principal() {
    let principal = Principal::from_record(json!({
        "username": "foobar",
        "roles": ["admin", "user"],
        "foo": "bar",
        "abc": 123,
    }))
    .unwrap();

    assert_eq!(principal.username(), "foobar");
    assert_eq!(principal.roles(), &["admin", "user"]);
    assert_eq!(principal.attribute("foo"), Some(&json!("bar")));
    assert_eq!(principal.attribute("abc"), Some(&json!(123)));
}

#[test]
fn positional_form_builds_the_same_principal() {
    let from_parts = Principal::from_parts(
        "foobar",
        json!(["admin", "user"]),
        Some(json!({"foo": "bar"})),
    )
    .unwrap();

    let from_record = Principal::from_record(json!({
        "username": "foobar",
        "roles": ["admin", "user"],
        "foo": "bar",
    }))
    .unwrap();

    assert_eq!(from_parts, from_record);
}

#[test]
fn construction_errors_name_the_failure() {
    assert_eq!(
        Principal::from_record(json!("not-an-object")),
        Err(Error::InvalidUserData)
    );
    assert_eq!(
        Principal::from_parts("u", json!({"admin": true}), None),
        Err(Error::InvalidRoles)
    );
    assert_eq!(
        Principal::from_record(json!({"username": "", "roles": []})),
        Err(Error::InvalidUsername)
    );
    assert_eq!(
        Principal::from_record(json!({"username": "u", "roles": 7})),
        Err(Error::InvalidRolesField)
    );
}

#[test]
fn reserved_fields_cannot_be_injected_through_either_form() {
    init_tracing();

    let record = Principal::from_record(json!({
        "username": "u",
        "roles": [],
        "_username": "sentinel",
        "_roles": "sentinel",
        "hasRole": "sentinel",
    }))
    .unwrap();

    let parts = Principal::from_parts(
        "u",
        json!([]),
        Some(json!({
            "username": "sentinel",
            "_username": "sentinel",
            "roles": ["sentinel"],
            "_roles": "sentinel",
            "hasRole": "sentinel",
        })),
    )
    .unwrap();

    for principal in [record, parts] {
        assert_eq!(principal.username(), "u");
        assert!(principal.roles().is_empty());
        assert!(principal.attributes().is_empty());
    }
}

#[test]
fn role_gating_scenario() {
    init_tracing();

    // The shape of an authorization-middleware check: build a principal from
    // decoded request data, then gate an endpoint on role membership.
    let claims = json!({
        "username": "ops-bot",
        "roles": ["user", "admin", "superadmin", "manager"],
        "issuer": "https://idp.example.com",
    });

    let principal = Principal::from_record(claims).unwrap();

    assert!(principal.has_role("user"));
    assert!(principal.has_role(["bad", "admin"]));
    assert!(!principal.has_role(["bad", "role"]));
    assert!(!principal.has_role(json!(null)));
    assert_eq!(
        principal.attribute("issuer"),
        Some(&json!("https://idp.example.com"))
    );
}

#[test]
fn principal_survives_a_wire_round_trip() {
    let principal = Principal::from_record(json!({
        "username": "alice",
        "roles": ["viewer"],
        "tenant": "acme",
    }))
    .unwrap();

    let wire = serde_json::to_string(&principal).unwrap();
    let restored: Principal = serde_json::from_str(&wire).unwrap();

    assert_eq!(restored, principal);
    assert!(restored.has_role("viewer"));
}
