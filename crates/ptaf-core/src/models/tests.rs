use super::*;

#[test]
fn resource_kind_parses_aliases() {
    assert_eq!(
        "policy-templates".parse::<ResourceKind>(),
        Ok(ResourceKind::PolicyTemplates)
    );
    assert_eq!("Traffic".parse::<ResourceKind>(), Ok(ResourceKind::TrafficSettings));
    assert!("widgets".parse::<ResourceKind>().is_err());
}

#[test]
fn resource_kind_roundtrips_display() {
    for kind in ResourceKind::ALL {
        assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
    }
}

#[test]
fn rule_paths_nest_under_template() {
    assert_eq!(
        rule_path("t-1", "r-9"),
        "/config/policies/templates/user/t-1/rules/r-9"
    );
}

#[test]
fn tenant_matches_id_or_name() {
    let tenant = Tenant {
        id: TenantId::new("0f2a"),
        name: "Production".to_string(),
        description: None,
    };
    assert!(tenant.matches("0f2a"));
    assert!(tenant.matches("production"));
    assert!(!tenant.matches("staging"));
    assert_eq!(tenant.label(), "Production");
}

#[test]
fn tenant_id_is_transparent_in_json() {
    let tenant: Tenant =
        serde_json::from_str(r#"{"id":"abc","name":"A"}"#).expect("decode tenant");
    assert_eq!(tenant.id, TenantId::from("abc"));
    assert_eq!(serde_json::to_string(&tenant.id).expect("encode"), "\"abc\"");
}
