use host::factory::*;
use host::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn prelude(types: &mut TypeTable) {
        let source = "class Iterable {} class List extends Iterable {} class String {} class bool {}";
        let f = Fixture::new(source);
        let mut unit = compilation_unit(vec![
            class_declaration(vec![], f.ident("Iterable"), None, vec![]),
            class_declaration(
                vec![],
                f.ident("List"),
                Some(type_name(f.ident_after("Iterable", 20))),
                vec![],
            ),
            class_declaration(vec![], f.ident("String"), None, vec![]),
            class_declaration(vec![], f.ident("bool"), None, vec![]),
        ]);
        Resolver::new(types).resolve_unit(&mut unit);
    }

    #[test]
    fn should_infer_loop_variable_type_from_iterable() {
        let mut types = TypeTable::new();
        prelude(&mut types);
        let string = types.class_by_name("String").unwrap();
        let list = types.class_by_name("List").unwrap();

        let mut resolver = Resolver::new(&mut types);
        let mut items = Identifier::new("items", 0);
        let items_id = resolver.declare_local(&mut items);
        resolver
            .types_mut()
            .set_variable_type(items_id, Type::generic(list, vec![Type::interface(string)]));
        resolver.define(items_id);

        let mut statement = Statement::ForEach(ForEachStatement {
            loop_variable: DeclaredIdentifier {
                type_name: None,
                identifier: Identifier::new("item", 20),
            },
            iterable: Expression::Identifier(Identifier::new("items", 28)),
            body: Block::default(),
            span: Span::new(20, 33),
        });
        resolver.resolve_statement(&mut statement);

        let Statement::ForEach(for_each) = statement else {
            unreachable!()
        };
        assert_eq!(for_each.iterable.best_type(), Type::generic(list, vec![Type::interface(string)]));
        assert_eq!(for_each.loop_variable.identifier.best_type(), Type::interface(string));
        let item = for_each.loop_variable.identifier.variable().unwrap();
        assert_eq!(types.variable(item).unwrap().ty, Type::interface(string));
    }

    #[test]
    fn should_leave_loop_variable_dynamic_for_non_iterable() {
        let mut types = TypeTable::new();
        prelude(&mut types);
        let string = types.class_by_name("String").unwrap();
        assert_eq!(types.iterable_element_type(&Type::interface(string)), None);
        assert_eq!(types.iterable_element_type(&Type::Dynamic), Some(Type::Dynamic));
    }

    #[test]
    fn should_stop_member_lookup_on_supertype_cycle() {
        let mut types = TypeTable::new();
        let a = types.add_class("A", None);
        let b = types.add_class("B", None);
        types.set_supertype(a, Type::interface(b));
        types.set_supertype(b, Type::interface(a));
        assert!(types.lookup_member(a, "missing").is_none());
        assert_eq!(types.iterable_element_type(&Type::interface(a)), None);
    }

    #[test]
    fn should_only_treat_writable_members_as_settable() {
        let mut types = TypeTable::new();
        let class = types.add_class("C", None);
        let mut constant = MemberElement::new("constant", 0, MemberKind::Field);
        constant.modifiers = Modifiers::FINAL;
        types.add_member(class, constant);
        types.add_member(class, MemberElement::new("plain", 10, MemberKind::Field));
        types.add_member(class, MemberElement::new("setter", 20, MemberKind::Setter));
        types.add_member(class, MemberElement::new("getter", 30, MemberKind::Getter));

        assert!(types.lookup_settable(class, "constant").is_none());
        assert!(types.lookup_settable(class, "plain").is_some());
        assert!(types.lookup_settable(class, "setter").is_some());
        assert!(types.lookup_settable(class, "getter").is_none());
        assert!(types.lookup_member(class, "getter").is_some());
    }

    #[test]
    fn should_resolve_members_and_property_access() {
        let mut types = TypeTable::new();
        prelude(&mut types);
        let source = "class Ctrl { List<String> items; } main() { var c = new Ctrl(); c.items; }";
        let f = Fixture::new(source);
        let mut unit = compilation_unit(vec![
            class_declaration(
                vec![],
                f.ident("Ctrl"),
                None,
                vec![field(
                    vec![],
                    Modifiers::empty(),
                    Some(generic_type_name(
                        f.ident("List"),
                        vec![type_name(f.ident("String"))],
                    )),
                    f.ident("items"),
                )],
            ),
            function(
                f.ident("main"),
                vec![
                    variable_statement(
                        Identifier::new("c", f.offset("c =")),
                        Some(instance_creation(f.ident_after("Ctrl", 40), vec![])),
                    ),
                    expression_statement(property_access(
                        identifier_expression(Identifier::new("c", f.offset("c.items"))),
                        f.ident_after("items", 60),
                    )),
                ],
            ),
        ]);
        Resolver::new(&mut types).resolve_unit(&mut unit);

        let Declaration::Function(main) = &unit.declarations[1] else {
            unreachable!()
        };
        let Statement::Expression(access) = &main.body.statements[1] else {
            unreachable!()
        };
        assert_eq!(types.display_type(&access.best_type()), "List<String>");
    }
}
