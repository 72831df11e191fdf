use rlox::prelude::*;

#[test]
fn scanner_works() {
    let input = "2 and 3";
    let mut scanner = Scanner::new(input);
    let (tokens, errors) = scanner.scan_tokens();
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 4);
}

#[test]
fn tokens_carry_lines() {
    let (tokens, _) = Scanner::new("var a = 1;\n\nprint a;").scan_tokens();
    let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 1, 1, 3, 3, 3, 3]);
}

#[test]
fn errors_do_not_stop_scanning() {
    let (tokens, errors) = Scanner::new("\"open\n/* never closed").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unterminated string.");

    let (tokens, errors) = Scanner::new("1 ~ 2\n/* x").scan_tokens();
    let types: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(types, vec![TokenType::Number, TokenType::Number, TokenType::EOF]);
    let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec!["[line 1] Unexpected character.", "[line 2] Unterminated multiline comment."]
    );
}

#[test]
fn reserved_words_are_keywords() {
    let (tokens, _) = Scanner::new("class fun return super this").scan_tokens();
    let types: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::Class,
            TokenType::Fun,
            TokenType::Return,
            TokenType::Super,
            TokenType::This,
            TokenType::EOF
        ]
    );
}
