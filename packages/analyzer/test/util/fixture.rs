//! Shared fixtures: a resolved framework prelude and a one-call analysis of a
//! hand-built compilation unit.

#![allow(dead_code)]

use angular_analyzer::*;
use host::factory::*;
use host::*;

const PRELUDE: &str = "class Module { install(module) {} type(t) {} value(t, v) {} } \
                       class Iterable {} class List extends Iterable {} \
                       class String {} class int {} class bool {}";

/// Declares `Module`, `Iterable`, `List extends Iterable`, `String`, `int` and `bool`.
pub fn prelude(types: &mut TypeTable) {
    let f = Fixture::new(PRELUDE);
    let module_methods = ["install", "type", "value"]
        .iter()
        .map(|name| method(vec![], MemberKind::Method, f.ident(name), vec![], vec![]))
        .collect();
    let simple = |name: &str| {
        let at = f.offset(&format!("class {} ", name)) + "class ".len();
        class_declaration(vec![], Identifier::new(name, at), None, vec![])
    };
    let mut unit = compilation_unit(vec![
        class_declaration(vec![], f.ident("Module"), None, module_methods),
        simple("Iterable"),
        class_declaration(
            vec![],
            f.ident("List"),
            Some(type_name(f.ident_after("Iterable", f.offset("extends")))),
            vec![],
        ),
        simple("String"),
        simple("int"),
        simple("bool"),
    ]);
    Resolver::new(types).resolve_unit(&mut unit);
}

pub struct Analyzed {
    pub unit: CompilationUnit,
    pub types: TypeTable,
    pub options: AnalyzerOptions,
    pub model: UnitModel,
    pub diagnostics: Diagnostics,
}

impl Analyzed {
    pub fn class(&self, name: &str) -> ClassId {
        self.unit
            .class_named(name)
            .and_then(|class| class.element)
            .unwrap_or_else(|| panic!("class {} not resolved", name))
    }

    pub fn element(&self, class: &str, kind: ElementKind) -> Option<&ToolkitElement> {
        self.model
            .element(DeclarationKey::Class(self.class(class)), kind)
    }

    pub fn component(&self, class: &str) -> Option<&ComponentElement> {
        self.element(class, ElementKind::Component)
            .and_then(ToolkitElement::as_component)
    }

    pub fn controller(&self, class: &str) -> Option<&ControllerElement> {
        self.element(class, ElementKind::Controller)
            .and_then(ToolkitElement::as_controller)
    }

    pub fn directive(&self, class: &str) -> Option<&DirectiveElement> {
        self.element(class, ElementKind::Directive)
            .and_then(ToolkitElement::as_directive)
    }

    pub fn filter(&self, class: &str) -> Option<&FilterElement> {
        self.element(class, ElementKind::Filter)
            .and_then(ToolkitElement::as_filter)
    }

    pub fn codes(&self) -> Vec<AngularCode> {
        self.diagnostics.codes()
    }

    pub fn lookup(&self) -> ElementLookup<'_> {
        ElementLookup::new(&self.unit, &self.model)
    }
}

/// Resolves `unit` after the prelude and builds its element model.
pub fn analyze(unit: CompilationUnit) -> Analyzed {
    analyze_with(unit, AnalyzerOptions::default())
}

pub fn analyze_with(mut unit: CompilationUnit, options: AnalyzerOptions) -> Analyzed {
    let mut types = TypeTable::new();
    prelude(&mut types);
    Resolver::new(&mut types).resolve_unit(&mut unit);
    let mut diagnostics = Diagnostics::new();
    let model = ElementModelBuilder::new(&types, &options, &mut diagnostics).build(&unit);
    Analyzed {
        unit,
        types,
        options,
        model,
        diagnostics,
    }
}

/// `key: 'value'` where both are located in `f` after `from`.
pub fn string_arg(f: &Fixture, key: &str, value: &str) -> Expression {
    named(f.ident(&format!("{}:", key)).renamed(key), f.string(value))
}

/// `map: const { 'k' : 'v', ... }`; the literal spans from `const {` to the next `}`.
pub fn map_arg(f: &Fixture, entries: &[(&str, &str)]) -> Expression {
    let entries = entries
        .iter()
        .map(|(key, value)| (f.string(key), f.string(value)))
        .collect();
    map_arg_exprs(f, entries)
}

pub fn map_arg_exprs(f: &Fixture, entries: Vec<(Expression, Expression)>) -> Expression {
    let start = f.offset("const {");
    let end = f.offset_after("}", start) + 1;
    named(
        f.ident("map:").renamed("map"),
        map_literal(entries, Span::new(start, end)),
    )
}

/// `map: <value>`
pub fn map_arg_value(f: &Fixture, value: Expression) -> Expression {
    named(f.ident("map:").renamed("map"), value)
}

/// `@Name('public')` on a field or setter.
pub fn property_annotation(f: &Fixture, name: &str, public_name: &str) -> Annotation {
    let at = f.offset(&format!("@{}('{}')", name, public_name)) + 1;
    annotation(Identifier::new(name, at), Some(vec![f.string(public_name)]))
}

/// `name` declared after the `class <class>` header.
pub fn member_ident(f: &Fixture, class: &str, name: &str) -> Identifier {
    f.ident_after(name, f.offset(&format!("class {}", class)))
}

/// `var name;` with `annotations`.
pub fn var_field(f: &Fixture, class: &str, annotations: Vec<Annotation>, name: &str) -> ClassMember {
    field(annotations, Modifiers::empty(), None, member_ident(f, class, name))
}

/// `set name(value) {}`
pub fn set_field(f: &Fixture, class: &str, name: &str) -> ClassMember {
    setter(member_ident(f, class, name))
}

/// `@Name(arguments)` with the `@` at the first `@Name(`.
pub fn class_annotation(f: &Fixture, name: &str, arguments: Vec<Expression>) -> Annotation {
    let at = f.offset(&format!("@{}(", name)) + 1;
    annotation(Identifier::new(name, at), Some(arguments))
}

/// `@NgComponent(publishAs: 'ctrl', selector: 'myComp', templateUrl: 'my_template.html', cssUrl: 'my_styles.css', ...)`
pub fn component_annotation(f: &Fixture, extra: Vec<Expression>) -> Annotation {
    let mut arguments = vec![
        string_arg(f, "publishAs", "ctrl"),
        string_arg(f, "selector", "myComp"),
        string_arg(f, "templateUrl", "my_template.html"),
        string_arg(f, "cssUrl", "my_styles.css"),
    ];
    arguments.extend(extra);
    class_annotation(f, "NgComponent", arguments)
}

pub const COMPONENT_HEADER: &str = "@NgComponent(publishAs: 'ctrl', selector: 'myComp',\n\
                                    templateUrl: 'my_template.html', cssUrl: 'my_styles.css'";

pub trait Renamed {
    fn renamed(self, name: &str) -> Self;
}

impl Renamed for Identifier {
    /// Keeps the offset, drops the trailing search context from the name.
    fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self.span = Span::at(self.span.offset, name.len());
        self
    }
}
