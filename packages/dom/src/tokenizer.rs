//! # HTML Tokenizer
//!
//! Forgiving tokenizer for model-generated markup. It never fails: anything
//! that does not scan as a tag, comment, or doctype is emitted as text. This
//! is not a spec-complete HTML5 tokenizer — the input is machine-produced
//! menu documents, not the open web.

use crate::node::{is_raw_text_tag, Attribute};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    StartTag {
        tag: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        tag: String,
    },
    Comment(String),
    Doctype,
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).run()
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c == '<' {
                if let Some(token) = self.try_markup() {
                    if !text.is_empty() {
                        self.tokens.push(Token::Text(decode_entities(&text)));
                        text.clear();
                    }
                    let raw_text = match &token {
                        Token::StartTag {
                            tag, self_closing, ..
                        } if !self_closing && is_raw_text_tag(tag) => Some(tag.clone()),
                        _ => None,
                    };
                    self.tokens.push(token);
                    if let Some(tag) = raw_text {
                        self.consume_raw_text(&tag);
                    }
                    continue;
                }
                // Bare '<' that opens no markup: literal text.
                text.push('<');
                self.advance();
            } else {
                text.push(c);
                self.advance();
            }
        }

        if !text.is_empty() {
            self.tokens.push(Token::Text(decode_entities(&text)));
        }
        self.tokens
    }

    /// Attempt to scan a tag, comment, or doctype at the current `<`.
    /// Returns `None` (without consuming) when it is not markup.
    fn try_markup(&mut self) -> Option<Token> {
        match self.peek_at(1) {
            Some('!') => {
                if self.lookahead("<!--") {
                    Some(self.consume_comment())
                } else {
                    Some(self.consume_doctype())
                }
            }
            Some('/') => self.consume_end_tag(),
            Some(c) if c.is_ascii_alphabetic() => self.consume_start_tag(),
            _ => None,
        }
    }

    fn consume_comment(&mut self) -> Token {
        self.pos += 4; // "<!--"
        let mut content = String::new();
        while !self.at_end() {
            if self.lookahead("-->") {
                self.pos += 3;
                return Token::Comment(content);
            }
            content.push(self.chars[self.pos]);
            self.advance();
        }
        Token::Comment(content)
    }

    fn consume_doctype(&mut self) -> Token {
        // "<!DOCTYPE html>" and any other markup declaration: skip to '>'.
        while let Some(c) = self.peek() {
            self.advance();
            if c == '>' {
                break;
            }
        }
        Token::Doctype
    }

    fn consume_end_tag(&mut self) -> Option<Token> {
        let start = self.pos;
        self.pos += 2; // "</"
        let tag = self.consume_name();
        if tag.is_empty() {
            self.pos = start;
            return None;
        }
        // Anything up to '>' is discarded (attributes on end tags are junk).
        while let Some(c) = self.peek() {
            self.advance();
            if c == '>' {
                break;
            }
        }
        Some(Token::EndTag { tag })
    }

    fn consume_start_tag(&mut self) -> Option<Token> {
        let start = self.pos;
        self.advance(); // '<'
        let tag = self.consume_name();
        if tag.is_empty() {
            self.pos = start;
            return None;
        }

        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.advance();
                    break;
                }
                Some('/') => {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let name = self.consume_attr_name();
                    if name.is_empty() {
                        // Stray character inside the tag; skip it.
                        self.advance();
                        continue;
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.advance();
                        self.skip_whitespace();
                        self.consume_attr_value()
                    } else {
                        String::new()
                    };
                    attributes.push(Attribute { name, value });
                }
            }
        }

        Some(Token::StartTag {
            tag,
            attributes,
            self_closing,
        })
    }

    /// Raw text inside script/style: no entity decoding, no nested tags,
    /// runs until the matching end tag (which is also consumed).
    fn consume_raw_text(&mut self, tag: &str) {
        let close = format!("</{tag}");
        let mut content = String::new();
        while !self.at_end() {
            if self.lookahead_ci(&close) {
                self.pos += close.chars().count();
                while let Some(c) = self.peek() {
                    self.advance();
                    if c == '>' {
                        break;
                    }
                }
                if !content.is_empty() {
                    self.tokens.push(Token::Text(content));
                }
                self.tokens.push(Token::EndTag {
                    tag: tag.to_string(),
                });
                return;
            }
            content.push(self.chars[self.pos]);
            self.advance();
        }
        if !content.is_empty() {
            self.tokens.push(Token::Text(content));
        }
    }

    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                name.push(c.to_ascii_lowercase());
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn consume_attr_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                break;
            }
            name.push(c.to_ascii_lowercase());
            self.advance();
        }
        name
    }

    fn consume_attr_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let mut value = String::new();
                while let Some(c) = self.peek() {
                    self.advance();
                    if c == quote {
                        break;
                    }
                    value.push(c);
                }
                decode_entities(&value)
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = self.peek() {
                    if c.is_whitespace() || c == '>' {
                        break;
                    }
                    value.push(c);
                    self.advance();
                }
                decode_entities(&value)
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn lookahead(&self, needle: &str) -> bool {
        needle
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn lookahead_ci(&self, needle: &str) -> bool {
        needle.chars().enumerate().all(|(i, c)| {
            self.peek_at(i)
                .map(|p| p.to_ascii_lowercase() == c.to_ascii_lowercase())
                .unwrap_or(false)
        })
    }
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
