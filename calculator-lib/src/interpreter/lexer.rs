use crate::interpreter::grammar::Grammar;
use crate::interpreter::token::Token;
use std::collections::VecDeque;

/// Splits normalized text into tokens, one whitespace-delimited word at a time.
pub struct Lexer<'a> {
    grammar: &'a Grammar,
    words: VecDeque<&'a str>,
}

impl<'a> Lexer<'a> {
    pub fn new(grammar: &'a Grammar, expression: &'a str) -> Lexer<'a> {
        Lexer {
            grammar,
            words: expression.split_whitespace().collect(),
        }
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Removes the next token from the input.
    pub fn extract_token(&mut self) -> Option<Token> {
        let word = self.words.pop_front()?;
        Some(self.to_token(word))
    }

    /// Returns the next token without consuming it.
    pub fn read_token(&self) -> Option<Token> {
        self.words.front().map(|word| self.to_token(word))
    }

    fn to_token(&self, word: &str) -> Token {
        if self.grammar.has_operation(word) || self.grammar.has_prefix_operation(word) {
            Token::new_operation(word)
        } else {
            Token::new_value(word)
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.extract_token()
    }
}
