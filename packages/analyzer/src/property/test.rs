use super::*;
use crate::element::PropertyBindingKind;

#[test]
fn test_parse_binding_spec_markers() {
    let cases = [
        ("@name", PropertyBindingKind::Attr, 1),
        ("&onClick", PropertyBindingKind::Callback, 1),
        ("=>value", PropertyBindingKind::OneWay, 2),
        ("=>!value", PropertyBindingKind::OneWayOneTime, 3),
        ("<=>model", PropertyBindingKind::TwoWay, 3),
    ];
    for (spec, kind, marker_len) in cases {
        let parsed = parse_binding_spec(100, spec).unwrap();
        assert_eq!(parsed.kind, kind, "{}", spec);
        assert_eq!(parsed.member_name, &spec[marker_len..]);
        assert_eq!(parsed.member_name_offset, 100 + marker_len + 1);
    }
}

#[test]
fn test_parse_binding_spec_prefers_longest_marker() {
    let parsed = parse_binding_spec(0, "=>!x").unwrap();
    assert_eq!(parsed.kind, PropertyBindingKind::OneWayOneTime);
    assert_eq!(parsed.member_name, "x");
}

#[test]
fn test_parse_binding_spec_errors() {
    let unknown = parse_binding_spec(0, "!field").unwrap_err();
    assert_eq!(unknown, BindingSpecError::UnknownKind("!field".to_string()));
    assert_eq!(unknown.code(), crate::diagnostics::AngularCode::InvalidPropertyKind);

    let empty = parse_binding_spec(0, "<=>").unwrap_err();
    assert_eq!(empty.code(), crate::diagnostics::AngularCode::InvalidPropertySpec);

    assert!(matches!(
        parse_binding_spec(0, ""),
        Err(BindingSpecError::UnknownKind(_))
    ));
}

#[test]
fn test_mapping_keeps_first_binding_per_public_name() {
    let binding = |member: &str| crate::element::PropertyBinding {
        public_name: "value".to_string(),
        public_name_offset: 0,
        kind: PropertyBindingKind::OneWay,
        member_name: member.to_string(),
        member_name_offset: None,
        resolved_member: None,
    };
    let mut mapping = PropertyMapping::new();
    assert!(mapping.insert(binding("fromField")));
    assert!(!mapping.insert(binding("fromMap")));
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("value").unwrap().member_name, "fromField");
}
