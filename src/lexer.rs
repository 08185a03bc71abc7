//! Splits bracketed term text on parenthesis boundaries and whitespace.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    LParen,
    RParen,
    Symbol(&'a str),
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub position: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let start = self.position;
        let rest = &self.input[start..];
        let ch = rest.chars().next()?;

        let token = match ch {
            '(' => {
                self.position += 1;
                Token::LParen
            }
            ')' => {
                self.position += 1;
                Token::RParen
            }
            _ => {
                let len = rest
                    .find(|c: char| c == '(' || c == ')' || c.is_whitespace())
                    .unwrap_or(rest.len());
                self.position += len;
                Token::Symbol(&rest[..len])
            }
        };

        Some(Spanned {
            token,
            position: start,
        })
    }
}
