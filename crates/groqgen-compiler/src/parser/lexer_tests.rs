use super::lexer::{TokenKind, lex, string_content, token_text};

/// Format tokens without trivia (default for most tests)
fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

/// Format tokens with trivia included
fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let tokens = lex(input);
    let mut out = String::new();
    for token in tokens {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) [ ] { } : ,"), @r#"
    ParenOpen "("
    ParenClose ")"
    BracketOpen "["
    BracketClose "]"
    BraceOpen "{"
    BraceClose "}"
    Colon ":"
    Comma ","
    "#);
}

#[test]
fn define_field_call() {
    insta::assert_snapshot!(snapshot("defineField({name: 'title', type: \"string\"})"), @r#"
    Id "defineField"
    ParenOpen "("
    BraceOpen "{"
    Id "name"
    Colon ":"
    StringLiteral "'title'"
    Comma ","
    Id "type"
    Colon ":"
    StringLiteral "\"string\""
    BraceClose "}"
    ParenClose ")"
    "#);
}

#[test]
fn arrow_function_validation() {
    insta::assert_snapshot!(snapshot("validation: (Rule) => Rule.required().max(80)"), @r#"
    Id "validation"
    Colon ":"
    ParenOpen "("
    Id "Rule"
    ParenClose ")"
    Punct "=>"
    Id "Rule"
    Punct "."
    Id "required"
    ParenOpen "("
    ParenClose ")"
    Punct "."
    Id "max"
    ParenOpen "("
    Number "80"
    ParenClose ")"
    "#);
}

#[test]
fn escaped_quotes_stay_inside_string() {
    insta::assert_snapshot!(snapshot(r#"'it\'s' "say \"hi\"""#), @r#"
    StringLiteral "'it\\'s'"
    StringLiteral "\"say \\\"hi\\\"\""
    "#);
}

#[test]
fn template_literal() {
    insta::assert_snapshot!(snapshot("description: `multi ${x}`"), @r#"
    Id "description"
    Colon ":"
    TemplateLiteral "`multi ${x}`"
    "#);
}

#[test]
fn comments_are_trivia() {
    insta::assert_snapshot!(snapshot_raw("a // name: 'x'\n/* type: 'y' */ b"), @r#"
    Id "a"
    Whitespace " "
    LineComment "// name: 'x'"
    Newline "\n"
    BlockComment "/* type: 'y' */"
    Whitespace " "
    Id "b"
    "#);
}

#[test]
fn unterminated_string_becomes_garbage() {
    let source = "name: 'post\ntype";
    let tokens: Vec<_> = lex(source)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect();
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Garbage));
    assert!(tokens.iter().all(|t| t.kind != TokenKind::StringLiteral));
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Id);
    assert_eq!(token_text(source, last), "type");
}

#[test]
fn garbage_is_coalesced() {
    let tokens = lex("a §§§ b");
    let kinds: Vec<_> = tokens
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::Id, TokenKind::Garbage, TokenKind::Id]);
}

#[test]
fn spans_cover_source() {
    let source = "export default defineType({\r\n  name: 'post',\r\n})";
    let tokens = lex(source);
    let rebuilt: String = tokens.iter().map(|t| token_text(source, t)).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn string_content_trims_quotes() {
    assert_eq!(string_content("'post'"), "post");
    assert_eq!(string_content("\"post\""), "post");
    assert_eq!(string_content("''"), "");
    assert_eq!(string_content("'"), "");
}

#[test]
fn delimiter_helpers() {
    assert_eq!(TokenKind::BraceOpen.closing(), Some(TokenKind::BraceClose));
    assert_eq!(TokenKind::Id.closing(), None);
    assert!(TokenKind::BracketOpen.is_open());
    assert!(TokenKind::ParenClose.is_close());
    assert_eq!(TokenKind::BracketClose.delimiter_str(), "]");
}
