use angular_analyzer::property::{parse_binding_spec, BindingSpec, BindingSpecError};
use angular_analyzer::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: PropertyBindingKind, member_name: &str, member_name_offset: usize) -> BindingSpec {
        BindingSpec {
            kind,
            member_name: member_name.to_string(),
            member_name_offset,
        }
    }

    #[test]
    fn should_parse_every_marker() {
        let cases = [
            ("@field", PropertyBindingKind::Attr, 2),
            ("&field", PropertyBindingKind::Callback, 2),
            ("=>field", PropertyBindingKind::OneWay, 3),
            ("=>!field", PropertyBindingKind::OneWayOneTime, 4),
            ("<=>field", PropertyBindingKind::TwoWay, 4),
        ];
        for (text, kind, member_offset) in cases {
            assert_eq!(
                parse_binding_spec(0, text),
                Ok(spec(kind, "field", member_offset)),
                "{}",
                text
            );
        }
    }

    #[test]
    fn should_offset_member_from_opening_quote() {
        let parsed = parse_binding_spec(100, "=>!value").unwrap();
        assert_eq!(parsed.member_name_offset, 104);
        assert_eq!(parsed.member_name, "value");
    }

    #[test]
    fn should_reject_unknown_kind() {
        let error = parse_binding_spec(0, "%field").unwrap_err();
        assert_eq!(error, BindingSpecError::UnknownKind("%field".to_string()));
        assert_eq!(error.code(), AngularCode::InvalidPropertyKind);
        assert_eq!(error.spec(), "%field");
    }

    #[test]
    fn should_reject_missing_member() {
        for text in ["@", "&", "=>", "=>!", "<=>"] {
            let error = parse_binding_spec(0, text).unwrap_err();
            assert_eq!(error.code(), AngularCode::InvalidPropertySpec, "{}", text);
        }
    }

    #[test]
    fn should_reject_empty_spec_as_unknown_kind() {
        let error = parse_binding_spec(0, "").unwrap_err();
        assert_eq!(error.code(), AngularCode::InvalidPropertyKind);
    }
}
