//! Offset lookup of elements, properties, members and selectors.

#[path = "util/fixture.rs"]
mod fixture;
use fixture::*;

use angular_analyzer::*;
use host::factory::*;
use host::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn field_component(f: &Fixture) -> Analyzed {
        let members = vec![var_field(
            f,
            "MyComponent",
            vec![property_annotation(f, "NgOneWay", "prop")],
            "field",
        )];
        analyze(compilation_unit(vec![class_declaration(
            vec![component_annotation(f, vec![])],
            f.ident("MyComponent"),
            None,
            members,
        )]))
    }

    fn map_component(f: &Fixture) -> Analyzed {
        let annotation = component_annotation(f, vec![map_arg(f, &[("prop", "@field")])]);
        analyze(compilation_unit(vec![class_declaration(
            vec![annotation],
            f.ident("MyComponent"),
            None,
            vec![var_field(f, "MyComponent", vec![], "field")],
        )]))
    }

    fn assert_property(found: Option<LookupMatch<'_>>, public_name: &str) {
        match found {
            Some(LookupMatch::Property(property)) => assert_eq!(property.public_name, public_name),
            other => panic!("expected property {}, found {:?}", public_name, other),
        }
    }

    #[test]
    fn should_find_property_from_field_annotation() {
        let f = Fixture::new(format!(
            "{})\nclass MyComponent {{\n  @NgOneWay('prop')\n  var field;\n}}",
            COMPONENT_HEADER
        ));
        let analyzed = field_component(&f);
        assert!(analyzed.diagnostics.is_empty());

        let literal = f.offset("'prop'");
        let lookup = analyzed.lookup();
        assert_property(lookup.find(literal), "prop");
        assert_property(lookup.find(literal + 3), "prop");
        assert_property(lookup.find(literal + "'prop'".len() - 1), "prop");
        assert!(!matches!(
            lookup.find(literal + "'prop'".len()),
            Some(LookupMatch::Property(_))
        ));
    }

    #[test]
    fn should_find_property_and_member_from_map() {
        let f = Fixture::new(format!(
            "{},\n  map: const {{\n    'prop' : '@field',\n  }})\nclass MyComponent {{\n  var field;\n}}",
            COMPONENT_HEADER
        ));
        let analyzed = map_component(&f);
        assert!(analyzed.diagnostics.is_empty());
        let lookup = analyzed.lookup();

        assert_property(lookup.find(f.offset("'prop'")), "prop");
        match lookup.find(f.offset("'@field'")) {
            Some(LookupMatch::Member(member)) => {
                assert_eq!(member.name, "field");
                assert_eq!(member.class, analyzed.class("MyComponent"));
                assert_eq!(member.name_offset, f.offset("field;"));
            }
            other => panic!("expected member, found {:?}", other),
        }
    }

    #[test]
    fn should_find_component_name_and_selector() {
        let f = Fixture::new(format!(
            "{})\nclass MyComponent {{\n  @NgOneWay('prop')\n  var field;\n}}",
            COMPONENT_HEADER
        ));
        let analyzed = field_component(&f);
        let lookup = analyzed.lookup();

        match lookup.find(f.offset("'ctrl'") + 2) {
            Some(LookupMatch::Element(element)) => {
                assert_eq!(element.kind(), ElementKind::Component);
                assert_eq!(element.name(), Some("ctrl"));
            }
            other => panic!("expected component, found {:?}", other),
        }
        match lookup.find(f.offset("'myComp'")) {
            Some(LookupMatch::Selector(selector)) => assert_eq!(selector.name(), "myComp"),
            other => panic!("expected selector, found {:?}", other),
        }
        assert_eq!(lookup.find(f.offset("'my_template.html'")), None);
    }

    #[test]
    fn should_find_directive_property_before_selector() {
        let f = Fixture::new(
            "@NgDirective(selector: '[my-dir]',\n  map: const {\n    'my-dir' : '=>field'\n  })\n\
             class MyDirective {\n  set field(value) {}\n}",
        );
        let annotation = class_annotation(
            &f,
            "NgDirective",
            vec![
                string_arg(&f, "selector", "[my-dir]"),
                map_arg(&f, &[("my-dir", "=>field")]),
            ],
        );
        let analyzed = analyze(compilation_unit(vec![class_declaration(
            vec![annotation],
            f.ident("MyDirective"),
            None,
            vec![set_field(&f, "MyDirective", "field")],
        )]));
        assert!(analyzed.diagnostics.is_empty());
        let lookup = analyzed.lookup();

        assert_property(lookup.find(f.offset("'my-dir'")), "my-dir");
        match lookup.find(f.offset("'[my-dir]'") + 3) {
            Some(LookupMatch::Selector(selector)) => assert_eq!(selector.to_string(), "[my-dir]"),
            other => panic!("expected selector, found {:?}", other),
        }
        match lookup.find(f.offset("'=>field'") + 1) {
            Some(LookupMatch::Member(member)) => assert_eq!(member.name, "field"),
            other => panic!("expected member, found {:?}", other),
        }
    }

    #[test]
    fn should_find_nothing_without_class_declaration() {
        let unit = compilation_unit(vec![]);
        let model = UnitModel::new();
        let lookup = ElementLookup::new(&unit, &model);
        assert_eq!(lookup.declaration_at(0), None);
        assert_eq!(lookup.find(0), None);
    }

    #[test]
    fn should_find_nothing_in_unresolved_class() {
        let f = Fixture::new("class Test {}");
        let unit = compilation_unit(vec![class_declaration(vec![], f.ident("Test"), None, vec![])]);
        let model = UnitModel::new();
        let lookup = ElementLookup::new(&unit, &model);
        assert_eq!(lookup.declaration_at(f.offset("Test")), None);
        assert_eq!(lookup.find(f.offset("Test")), None);
    }

    #[test]
    fn should_find_nothing_in_plain_string() {
        let f = Fixture::new("class MyComponent {\n  var str = 'some string';\n}");
        let fields = variable_list(
            Modifiers::empty(),
            None,
            vec![(f.ident("str"), Some(f.string("some string")))],
        );
        let span = fields.span;
        let member = ClassMember::Field(FieldDeclaration {
            annotations: vec![],
            fields,
            span,
        });
        let analyzed = analyze(compilation_unit(vec![class_declaration(
            vec![],
            f.ident("MyComponent"),
            None,
            vec![member],
        )]));

        let offset = f.offset("'some string'");
        let lookup = analyzed.lookup();
        assert_eq!(
            lookup.declaration_at(offset),
            Some(DeclarationKey::Class(analyzed.class("MyComponent")))
        );
        assert_eq!(lookup.find(offset), None);
    }

    #[test]
    fn should_find_element_of_kind() {
        let f = Fixture::new(format!(
            "{})\nclass MyComponent {{\n  @NgOneWay('prop')\n  var field;\n}}",
            COMPONENT_HEADER
        ));
        let analyzed = field_component(&f);
        let lookup = analyzed.lookup();
        let offset = f.offset("field;");

        let component = lookup.find_kind(offset, ElementKind::Component).unwrap();
        assert_eq!(component.as_component().unwrap().template_uri, "my_template.html");
        assert_eq!(lookup.find_kind(offset, ElementKind::Directive), None);
    }

    #[test]
    fn should_prefer_module_variable_over_enclosing_class() {
        let f = Fixture::new(
            "class App {\n  start() {\n    var module = new Module()..type(String);\n  }\n}",
        );
        let creation = instance_creation(
            Identifier::new("Module", f.offset("Module()")),
            vec![],
        );
        let initializer = cascade(
            creation,
            vec![invocation(
                None,
                Identifier::new("type", f.offset("type(")),
                vec![identifier_expression(f.ident("String"))],
            )],
        );
        let body = vec![variable_statement(f.ident("module"), Some(initializer))];
        let analyzed = analyze(compilation_unit(vec![class_declaration(
            vec![],
            f.ident("App"),
            None,
            vec![method(vec![], MemberKind::Method, f.ident("start"), vec![], body)],
        )]));
        let lookup = analyzed.lookup();

        let inside = f.offset("module =");
        let variable = analyzed
            .unit
            .enclosing_variable(inside)
            .and_then(|variable| variable.element())
            .unwrap();
        assert_eq!(lookup.declaration_at(inside), Some(DeclarationKey::Variable(variable)));
        assert!(lookup.find_kind(inside, ElementKind::Module).is_some());
        assert_eq!(
            lookup.declaration_at(f.offset("start")),
            Some(DeclarationKey::Class(analyzed.class("App")))
        );
    }
}
