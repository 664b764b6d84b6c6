use super::mapping::PropertyMapping;
use super::spec::parse_binding_spec;
use crate::config::AnalyzerOptions;
use crate::diagnostics::{AngularCode, Diagnostics};
use crate::element::{MemberRef, PropertyBinding};
use host::{
    Annotation, ArgumentList, ClassDeclaration, ClassId, ClassMember, ElementRef, Expression,
    Identifier, MapLiteral, MemberElement, Span, TypeTable,
};

/// Collects the property bindings of one component or directive class.
pub struct PropertyCollector<'a> {
    types: &'a TypeTable,
    options: &'a AnalyzerOptions,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> PropertyCollector<'a> {
    pub fn new(
        types: &'a TypeTable,
        options: &'a AnalyzerOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        PropertyCollector {
            types,
            options,
            diagnostics,
        }
    }

    /// Field and setter annotations come first; `map` entries whose public name
    /// is already bound are dropped. Both sources bind only settable members.
    pub fn collect(
        &mut self,
        class: &ClassDeclaration,
        class_id: ClassId,
        arguments: &ArgumentList,
    ) -> Vec<PropertyBinding> {
        let mut mapping = PropertyMapping::new();
        self.collect_from_members(class, &mut mapping);
        match arguments.named("map") {
            Some(Expression::MapLiteral(map)) => self.collect_from_map(map, class_id, &mut mapping),
            Some(other) => {
                self.diagnostics
                    .report(AngularCode::InvalidPropertyMap, other.span(), &[]);
            }
            None => {}
        }
        mapping.into_vec()
    }

    fn collect_from_members(&mut self, class: &ClassDeclaration, mapping: &mut PropertyMapping) {
        for member in &class.members {
            match member {
                ClassMember::Field(field) => {
                    for annotation in &field.annotations {
                        for variable in &field.fields.variables {
                            self.collect_annotated(annotation, &variable.name, mapping);
                        }
                    }
                }
                ClassMember::Method(method) => {
                    for annotation in &method.annotations {
                        self.collect_annotated(annotation, &method.name, mapping);
                    }
                }
                ClassMember::Constructor(_) => {}
            }
        }
    }

    fn collect_annotated(
        &mut self,
        annotation: &Annotation,
        member: &Identifier,
        mapping: &mut PropertyMapping,
    ) {
        let Some(kind) = self.options.property_kind_for_annotation(&annotation.name.name) else {
            return;
        };
        let Some(arguments) = &annotation.arguments else {
            return;
        };
        let Some(public_name) = arguments
            .positional()
            .next()
            .and_then(Expression::as_string_literal)
        else {
            self.diagnostics
                .report(AngularCode::InvalidPropertyName, annotation.span, &[]);
            return;
        };
        let resolved_member = match self.member_element(member) {
            Some((_, element)) if !element.is_settable() => {
                self.diagnostics.report(
                    AngularCode::InvalidPropertyField,
                    member.span,
                    &[&member.name],
                );
                return;
            }
            Some((class, element)) => Some(MemberRef {
                class,
                name: element.name.clone(),
                name_offset: element.name_offset,
            }),
            None => None,
        };
        mapping.insert(PropertyBinding {
            public_name: public_name.value.clone(),
            public_name_offset: public_name.value_offset(),
            kind,
            member_name: member.name.clone(),
            member_name_offset: None,
            resolved_member,
        });
    }

    fn member_element(&self, member: &Identifier) -> Option<(ClassId, &'a MemberElement)> {
        let Some(ElementRef::Member(class, index)) = member.static_element else {
            return None;
        };
        let types: &'a TypeTable = self.types;
        Some((class, types.class(class)?.members.get(index)?))
    }

    fn collect_from_map(&mut self, map: &MapLiteral, class_id: ClassId, mapping: &mut PropertyMapping) {
        for entry in &map.entries {
            let Some(key) = entry.key.as_string_literal() else {
                self.diagnostics
                    .report(AngularCode::InvalidPropertyName, entry.key.span(), &[]);
                continue;
            };
            let Some(value) = entry.value.as_string_literal() else {
                self.diagnostics
                    .report(AngularCode::InvalidPropertySpec, entry.value.span(), &[]);
                continue;
            };
            let spec = match parse_binding_spec(value.span.offset, &value.value) {
                Ok(spec) => spec,
                Err(error) => {
                    self.diagnostics
                        .report(error.code(), value.span, &[error.spec()]);
                    continue;
                }
            };
            let Some((owner, member)) = self.types.lookup_settable(class_id, &spec.member_name)
            else {
                self.diagnostics.report(
                    AngularCode::InvalidPropertyField,
                    Span::at(spec.member_name_offset, spec.member_name.len()),
                    &[&spec.member_name],
                );
                continue;
            };
            let resolved_member = MemberRef {
                class: owner,
                name: member.name.clone(),
                name_offset: member.name_offset,
            };
            mapping.insert(PropertyBinding {
                public_name: key.value.clone(),
                public_name_offset: key.value_offset(),
                kind: spec.kind,
                member_name: spec.member_name,
                member_name_offset: Some(spec.member_name_offset),
                resolved_member: Some(resolved_member),
            });
        }
    }
}
