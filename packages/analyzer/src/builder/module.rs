use crate::config::AnalyzerOptions;
use crate::element::{ModuleElement, ModuleRef, TypeRef};
use host::{ClassId, Expression, MethodInvocation, Type, TypeTable};
use std::collections::HashSet;

/// Whether `ty` is the module class or extends it, directly or transitively.
///
/// Supertype cycles terminate with `false`.
pub fn is_module(types: &TypeTable, ty: Option<&Type>, module_class_name: &str) -> bool {
    let Some(mut current) = ty.and_then(Type::class) else {
        return false;
    };
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(current) {
            tracing::trace!(class = current.0, "supertype cycle");
            return false;
        }
        let Some(class) = types.class(current) else {
            return false;
        };
        if class.name == module_class_name {
            return true;
        }
        match types.superclass(current) {
            Some(superclass) => current = superclass,
            None => return false,
        }
    }
}

/// Records `install`, `type` and `value` invocations into a module element.
pub(crate) struct ModuleCollector<'a> {
    types: &'a TypeTable,
    options: &'a AnalyzerOptions,
    module: ModuleElement,
}

impl<'a> ModuleCollector<'a> {
    pub(crate) fn new(types: &'a TypeTable, options: &'a AnalyzerOptions) -> Self {
        ModuleCollector {
            types,
            options,
            module: ModuleElement::default(),
        }
    }

    pub(crate) fn add_invocation(&mut self, invocation: &MethodInvocation) {
        let methods = &self.options.module_methods;
        let method = invocation.method_name.name.as_str();
        let Some(argument) = invocation.arguments.positional().next() else {
            return;
        };
        if method == methods.install {
            self.add_child_module(argument);
        } else if method == methods.type_ || method == methods.value {
            self.add_key_type(argument);
        } else {
            tracing::trace!(method, "module invocation ignored");
        }
    }

    /// Cascade sections of a module-typed expression.
    pub(crate) fn add_expression(&mut self, expression: &Expression) {
        if let Expression::Cascade(cascade) = expression {
            for section in &cascade.sections {
                self.add_invocation(section);
            }
        }
    }

    fn add_child_module(&mut self, argument: &Expression) {
        let ty = argument.best_type();
        if !is_module(self.types, Some(&ty), &self.options.module_class_name) {
            tracing::trace!(span = %argument.span(), "install argument is not a module");
            return;
        }
        if let Some((class, name)) = ty.class().and_then(|class| self.class_name(class)) {
            self.module.child_modules.push(ModuleRef { class, name });
        }
    }

    fn add_key_type(&mut self, argument: &Expression) {
        let Some(identifier) = argument.as_identifier() else {
            return;
        };
        if let Some((class, name)) = identifier.class().and_then(|class| self.class_name(class)) {
            self.module.key_types.push(TypeRef {
                class,
                name,
                span: identifier.span,
            });
        }
    }

    fn class_name(&self, class: ClassId) -> Option<(ClassId, String)> {
        self.types.class(class).map(|c| (class, c.name.clone()))
    }

    pub(crate) fn finish(self) -> ModuleElement {
        self.module
    }
}
