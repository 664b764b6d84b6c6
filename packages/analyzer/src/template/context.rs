use crate::config::AnalyzerOptions;
use crate::diagnostics::{AngularCode, Diagnostics};
use host::{
    scan, Expression, ExpressionParser, Identifier, Resolver, Span, Statement, TokenStream, Type,
    TypeTable, VariableId,
};

/// A detached host-language node handed to the resolver.
pub enum Fragment<'f> {
    Statement(&'f mut Statement),
    Expression(&'f mut Expression),
}

/// Host-language services available to directive processors.
pub trait TemplateHost {
    /// Scans `text[start..end]`; `base_offset` is the document offset of `text[start]`.
    fn scan(&self, text: &str, start: usize, end: usize, base_offset: usize) -> TokenStream;

    fn parse_expression(&mut self, tokens: &mut TokenStream) -> Expression;

    /// Creates a variable element for `identifier` without making it visible.
    fn declare_variable(&mut self, identifier: &mut Identifier) -> VariableId;

    fn set_variable_type(&mut self, variable: VariableId, ty: Type);

    /// Makes `variable` visible to the rest of the current tag and its subtree.
    fn define_variable(&mut self, variable: VariableId);

    /// Resolves names and types in `fragment` against the open scopes.
    fn resolve_node(&mut self, fragment: Fragment<'_>);

    fn report_error(&mut self, span: Span, code: AngularCode, args: &[&str]);

    fn types(&self) -> &TypeTable;

    fn options(&self) -> &AnalyzerOptions;
}

/// [`TemplateHost`] over the host resolver, collecting diagnostics for one template.
pub struct TemplateContext<'t> {
    resolver: Resolver<'t>,
    parser: ExpressionParser,
    options: &'t AnalyzerOptions,
    diagnostics: Diagnostics,
}

impl<'t> TemplateContext<'t> {
    pub fn new(types: &'t mut TypeTable, options: &'t AnalyzerOptions) -> Self {
        TemplateContext {
            resolver: Resolver::new(types),
            parser: ExpressionParser::new(),
            options,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.resolver.push_scope();
    }

    pub fn pop_scope(&mut self) {
        self.resolver.pop_scope();
    }

    /// Declares, types and defines a variable in the current scope.
    pub fn add_variable(&mut self, name: &str, offset: usize, ty: Type) -> VariableId {
        let mut identifier = Identifier::new(name, offset);
        let variable = self.declare_variable(&mut identifier);
        self.set_variable_type(variable, ty);
        self.define_variable(variable);
        variable
    }

    pub fn lookup_variable(&self, name: &str) -> Option<VariableId> {
        self.resolver.lookup_variable(name)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

impl TemplateHost for TemplateContext<'_> {
    fn scan(&self, text: &str, start: usize, end: usize, base_offset: usize) -> TokenStream {
        scan(text, start, end, base_offset)
    }

    fn parse_expression(&mut self, tokens: &mut TokenStream) -> Expression {
        let expression = self.parser.parse_expression(tokens);
        for error in self.parser.take_errors() {
            self.report_error(error.span, AngularCode::ExpressionSyntax, &[&error.message]);
        }
        expression
    }

    fn declare_variable(&mut self, identifier: &mut Identifier) -> VariableId {
        self.resolver.declare_local(identifier)
    }

    fn set_variable_type(&mut self, variable: VariableId, ty: Type) {
        self.resolver.types_mut().set_variable_type(variable, ty);
    }

    fn define_variable(&mut self, variable: VariableId) {
        self.resolver.define(variable);
    }

    fn resolve_node(&mut self, fragment: Fragment<'_>) {
        match fragment {
            Fragment::Statement(statement) => self.resolver.resolve_statement(statement),
            Fragment::Expression(expression) => self.resolver.resolve_expression(expression),
        }
    }

    fn report_error(&mut self, span: Span, code: AngularCode, args: &[&str]) {
        self.diagnostics.report(code, span, args);
    }

    fn types(&self) -> &TypeTable {
        self.resolver.types()
    }

    fn options(&self) -> &AnalyzerOptions {
        self.options
    }
}
