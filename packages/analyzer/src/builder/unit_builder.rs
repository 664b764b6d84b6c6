use super::annotation::AnnotationArguments;
use super::module::{is_module, ModuleCollector};
use crate::config::AnalyzerOptions;
use crate::diagnostics::{AngularCode, Diagnostics};
use crate::element::{
    ComponentElement, ControllerElement, DeclarationKey, DirectiveElement, ElementKind,
    FilterElement, ModuleElement, ToolkitElement, UnitModel,
};
use crate::property::PropertyCollector;
use host::{
    Annotation, ArgumentList, Block, ClassDeclaration, ClassId, ClassMember, CompilationUnit,
    Declaration, ElementRef, Expression, Statement, Type, TypeTable, VariableDeclaration,
    VariableId,
};

pub struct ElementModelBuilder<'a> {
    types: &'a TypeTable,
    options: &'a AnalyzerOptions,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ElementModelBuilder<'a> {
    pub fn new(
        types: &'a TypeTable,
        options: &'a AnalyzerOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        ElementModelBuilder {
            types,
            options,
            diagnostics,
        }
    }

    /// Builds the element model of `unit`, which must already be resolved.
    ///
    /// Running the builder twice over the same unit yields equal models.
    pub fn build(&mut self, unit: &CompilationUnit) -> UnitModel {
        let mut model = UnitModel::new();
        for declaration in &unit.declarations {
            match declaration {
                Declaration::Class(class) => self.visit_class(class, &mut model),
                Declaration::Function(function) => self.visit_block(&function.body, &mut model),
                Declaration::Variables(list) => {
                    for variable in &list.variables {
                        if let Some(module) = self.module_variable(variable) {
                            let element = self.collect_module_variable(variable, &[]);
                            model.attach(
                                DeclarationKey::Variable(module),
                                ToolkitElement::Module(element),
                            );
                        }
                    }
                }
            }
        }
        tracing::debug!(elements = model.len(), "element model built");
        model
    }

    fn visit_class(&mut self, class: &ClassDeclaration, model: &mut UnitModel) {
        let Some(class_id) = class.element else {
            tracing::trace!(class = %class.name.name, "unresolved class skipped");
            return;
        };
        let key = DeclarationKey::Class(class_id);
        for annotation in &class.annotations {
            let Some(kind) = self
                .options
                .element_kind_for_annotation(&annotation.name.name)
            else {
                continue;
            };
            let Some(arguments) = &annotation.arguments else {
                tracing::trace!(annotation = %annotation.name.name, "annotation without arguments");
                continue;
            };
            let element = match kind {
                ElementKind::Component => self.build_component(class, class_id, annotation, arguments),
                ElementKind::Controller => self.build_controller(annotation, arguments),
                ElementKind::Directive => self.build_directive(class, class_id, annotation, arguments),
                ElementKind::Filter => self.build_filter(annotation, arguments),
                ElementKind::Module => None,
            };
            if let Some(element) = element {
                tracing::debug!(class = %class.name.name, kind = ?element.kind(), "element registered");
                model.attach(key, element);
            }
        }
        if is_module(
            self.types,
            Some(&Type::interface(class_id)),
            &self.options.module_class_name,
        ) {
            tracing::debug!(class = %class.name.name, "module class registered");
            model.attach(key, ToolkitElement::Module(self.collect_module_class(class)));
        }
        for member in &class.members {
            match member {
                ClassMember::Constructor(constructor) => self.visit_block(&constructor.body, model),
                ClassMember::Method(method) => self.visit_block(&method.body, model),
                ClassMember::Field(_) => {}
            }
        }
    }

    fn build_component(
        &mut self,
        class: &ClassDeclaration,
        class_id: ClassId,
        annotation: &Annotation,
        arguments: &ArgumentList,
    ) -> Option<ToolkitElement> {
        let mut reader = AnnotationArguments::new(annotation, arguments, self.diagnostics);
        let name = reader.required_string("publishAs", AngularCode::MissingPublishAs);
        let selector = reader.required_selector();
        let template_uri = reader.required_string("templateUrl", AngularCode::MissingTemplateUrl);
        let style_uri = reader.required_string("cssUrl", AngularCode::MissingCssUrl);
        let properties = PropertyCollector::new(self.types, self.options, reader.diagnostics())
            .collect(class, class_id, arguments);
        let (Some(name), Some(selector), Some(template_uri), Some(style_uri)) =
            (name, selector, template_uri, style_uri)
        else {
            return None;
        };
        Some(ToolkitElement::Component(ComponentElement {
            name: name.value.clone(),
            name_offset: name.value_offset(),
            selector,
            template_uri: template_uri.value.clone(),
            template_uri_offset: template_uri.value_offset(),
            style_uri: style_uri.value.clone(),
            style_uri_offset: style_uri.value_offset(),
            properties,
        }))
    }

    fn build_controller(
        &mut self,
        annotation: &Annotation,
        arguments: &ArgumentList,
    ) -> Option<ToolkitElement> {
        let mut reader = AnnotationArguments::new(annotation, arguments, self.diagnostics);
        let name = reader.required_string("publishAs", AngularCode::MissingPublishAs);
        let selector = reader.required_selector();
        let (Some(name), Some(selector)) = (name, selector) else {
            return None;
        };
        Some(ToolkitElement::Controller(ControllerElement {
            name: name.value.clone(),
            name_offset: name.value_offset(),
            selector,
        }))
    }

    fn build_directive(
        &mut self,
        class: &ClassDeclaration,
        class_id: ClassId,
        annotation: &Annotation,
        arguments: &ArgumentList,
    ) -> Option<ToolkitElement> {
        let mut reader = AnnotationArguments::new(annotation, arguments, self.diagnostics);
        let name = reader.optional_string("publishAs");
        let selector = reader.required_selector();
        let properties = PropertyCollector::new(self.types, self.options, reader.diagnostics())
            .collect(class, class_id, arguments);
        Some(ToolkitElement::Directive(DirectiveElement {
            name: name.map(|name| name.value.clone()),
            name_offset: name.map(|name| name.value_offset()),
            selector: selector?,
            properties,
        }))
    }

    fn build_filter(&mut self, annotation: &Annotation, arguments: &ArgumentList) -> Option<ToolkitElement> {
        let mut reader = AnnotationArguments::new(annotation, arguments, self.diagnostics);
        let name = reader.required_string("name", AngularCode::MissingName)?;
        Some(ToolkitElement::Filter(FilterElement {
            name: name.value.clone(),
            name_offset: name.value_offset(),
        }))
    }

    /// Invocations with an implicit receiver in the module's constructors.
    fn collect_module_class(&self, class: &ClassDeclaration) -> ModuleElement {
        let mut collector = ModuleCollector::new(self.types, self.options);
        for constructor in class.constructors() {
            for statement in &constructor.body.statements {
                let Statement::Expression(Expression::MethodInvocation(invocation)) = statement else {
                    continue;
                };
                let implicit_this = match &invocation.target {
                    None => true,
                    Some(target) => target.as_identifier().is_some_and(|t| t.name == "this"),
                };
                if implicit_this {
                    collector.add_invocation(invocation);
                }
            }
        }
        collector.finish()
    }

    fn visit_block(&mut self, block: &Block, model: &mut UnitModel) {
        for (index, statement) in block.statements.iter().enumerate() {
            match statement {
                Statement::Variables(list) => {
                    for variable in &list.variables {
                        let Some(id) = self.module_variable(variable) else {
                            continue;
                        };
                        let module = self.collect_module_variable(variable, &block.statements[index + 1..]);
                        model.attach(DeclarationKey::Variable(id), ToolkitElement::Module(module));
                    }
                }
                Statement::Block(inner) => self.visit_block(inner, model),
                Statement::ForEach(for_each) => self.visit_block(&for_each.body, model),
                Statement::Expression(_) => {}
            }
        }
    }

    fn module_variable(&self, variable: &VariableDeclaration) -> Option<VariableId> {
        let id = variable.element()?;
        let ty = self.types.variable(id).map(|v| &v.ty);
        is_module(self.types, ty, &self.options.module_class_name).then_some(id)
    }

    /// Cascade sections of the initializer, then `variable.method(...)` statements
    /// that follow the declaration in the same block.
    fn collect_module_variable(
        &self,
        variable: &VariableDeclaration,
        following: &[Statement],
    ) -> ModuleElement {
        let mut collector = ModuleCollector::new(self.types, self.options);
        if let Some(initializer) = &variable.initializer {
            collector.add_expression(initializer);
        }
        let id = variable.element();
        for statement in following {
            let Statement::Expression(Expression::MethodInvocation(invocation)) = statement else {
                continue;
            };
            let on_variable = invocation
                .target
                .as_deref()
                .and_then(Expression::as_identifier)
                .is_some_and(|target| {
                    id.is_some() && target.static_element == id.map(ElementRef::Variable)
                });
            if on_variable {
                collector.add_invocation(invocation);
            }
        }
        collector.finish()
    }
}
