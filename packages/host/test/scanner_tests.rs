use host::{scan, ExpressionParser, Expression, Keyword, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_shift_token_offsets_by_base_offset() {
        let mut tokens = scan("item in items", 0, 13, 100);
        let item = tokens.advance();
        assert_eq!(item.kind, TokenKind::Identifier);
        assert_eq!(item.lexeme, "item");
        assert_eq!(item.span.offset, 100);
        let keyword = tokens.advance();
        assert!(keyword.is_keyword(Keyword::In));
        assert_eq!(keyword.span.offset, 105);
        let items = tokens.advance();
        assert_eq!(items.span.offset, 108);
        assert!(tokens.is_at_end());
    }

    #[test]
    fn should_scan_only_the_requested_range() {
        let text = "{{ctrl.name}}";
        let mut tokens = scan(text, 2, 11, 52);
        assert_eq!(tokens.advance().span.offset, 52);
        assert!(tokens.advance().is_character('.'));
        assert_eq!(tokens.advance().lexeme, "name");
        assert!(tokens.is_at_end());
    }

    #[test]
    fn should_scan_strings_and_operators() {
        let mut tokens = scan("a == 'b' && c..d", 0, 16, 0);
        assert!(tokens.advance().is_identifier());
        assert!(tokens.advance().is_operator("=="));
        let string = tokens.advance();
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.lexeme, "b");
        assert_eq!(string.span.len(), 3);
        assert!(tokens.advance().is_operator("&&"));
        assert!(tokens.advance().is_identifier());
        assert!(tokens.advance().is_operator(".."));
    }

    #[test]
    fn should_report_unterminated_string_as_error_token() {
        let mut tokens = scan("'abc", 0, 4, 0);
        assert_eq!(tokens.advance().kind, TokenKind::Error);
    }

    #[test]
    fn should_leave_stream_at_first_unconsumed_token() {
        let mut tokens = scan("item in items", 0, 13, 0);
        let mut parser = ExpressionParser::new();
        let expression = parser.parse_expression(&mut tokens);
        assert!(matches!(expression, Expression::Identifier(ref id) if id.name == "item"));
        assert!(tokens.current().is_keyword(Keyword::In));
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn should_parse_member_access_and_calls() {
        let mut tokens = scan("ctrl.items.where(x)", 0, 19, 0);
        let mut parser = ExpressionParser::new();
        let expression = parser.parse_expression(&mut tokens);
        let Expression::MethodInvocation(invocation) = expression else {
            panic!("expected an invocation");
        };
        assert_eq!(invocation.method_name.name, "where");
        assert!(matches!(
            invocation.target.as_deref(),
            Some(Expression::PropertyAccess(_))
        ));
        assert_eq!(invocation.arguments.len(), 1);
        assert!(tokens.is_at_end());
    }

    #[test]
    fn should_respect_operator_precedence() {
        let mut tokens = scan("a + b * c", 0, 9, 0);
        let mut parser = ExpressionParser::new();
        let Expression::Binary(sum) = parser.parse_expression(&mut tokens) else {
            panic!("expected a binary expression");
        };
        assert_eq!(sum.operator, "+");
        assert!(matches!(*sum.right, Expression::Binary(ref product) if product.operator == "*"));
    }

    #[test]
    fn should_record_error_and_produce_synthetic_identifier() {
        let mut tokens = scan(")", 0, 1, 7);
        let mut parser = ExpressionParser::new();
        let expression = parser.parse_expression(&mut tokens);
        assert!(matches!(expression, Expression::Identifier(ref id) if id.name.is_empty()));
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(parser.errors()[0].span.offset, 7);
    }
}
