//! Recursive-descent parser over the token stream produced by
//! [`crate::lexer::Lexer`].

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};
use std::path::Path;
use vdl_diagnostic::{Position, Span};

const PRIMITIVES: &[&str] = &["string", "int", "float", "bool", "datetime"];

pub fn parse(filename: &Path, source: &str) -> ParseResult<Ast> {
    let mut lexer = Lexer::new(filename, source);
    let mut tokens = Vec::new();
    loop {
        match lexer.next_token() {
            Ok(Some(tok)) => tokens.push(tok),
            Ok(None) => break,
            Err((message, position)) => return Err(ParseError::new(message, position)),
        }
    }
    let eof_pos = tokens
        .last()
        .map(|t| t.end.clone())
        .unwrap_or_else(|| Position::start_of(filename.to_path_buf()));
    tokens.push(Token {
        kind: TokenKind::Eof,
        start: eof_pos.clone(),
        end: eof_pos,
    });

    Parser { tokens, pos: 0 }.parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err<T>(&self, message: impl Into<String>) -> ParseResult<T> {
        Err(ParseError::new(message, self.peek().start.clone()))
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            self.err(format!("expected {kind:?}, found {:?}", self.peek().kind))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<(String, Span)> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Ident(name) => Ok((name, Span::new(tok.start, tok.end))),
            other => {
                self.pos -= 1;
                self.err(format!("expected identifier, found {other:?}"))
            }
        }
    }

    fn at_ident(&self, word: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s == word)
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if self.at_ident(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_program(&mut self) -> ParseResult<Ast> {
        let mut ast = Ast::empty();

        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::DocString(_) if self.doc_is_standalone() => {
                    let tok = self.advance();
                    if let TokenKind::DocString(content) = tok.kind {
                        ast.standalone_docs.push(DocBlock {
                            content,
                            span: Span::new(tok.start, tok.end),
                        });
                    }
                }
                _ => {
                    let doc = self.take_optional_doc();
                    let annotations = self.parse_annotations()?;

                    if self.eat_ident("include") {
                        let stmt = self.parse_include()?;
                        ast.includes.push(stmt);
                    } else if self.at_ident("type") {
                        ast.types.push(self.parse_type_decl(doc, annotations)?);
                    } else if self.at_ident("enum") {
                        ast.enums.push(self.parse_enum_decl(doc, annotations)?);
                    } else if self.at_ident("const") {
                        ast.consts.push(self.parse_const_decl(doc, annotations)?);
                    } else if self.at_ident("pattern") {
                        ast.patterns.push(self.parse_pattern_decl(doc, annotations)?);
                    } else {
                        return self.err(format!(
                            "expected a top-level declaration, found {:?}",
                            self.peek().kind
                        ));
                    }
                }
            }
        }

        Ok(ast)
    }

    /// A docstring is standalone when it is not immediately followed by
    /// a declaration keyword (after skipping any annotations).
    fn doc_is_standalone(&self) -> bool {
        let mut i = self.pos + 1;
        while let TokenKind::At = self.tokens[i].kind {
            i += 1;
            // name
            i += 1;
            if let TokenKind::LParen = self.tokens[i].kind {
                // skip to matching RParen
                let mut depth = 0;
                loop {
                    match self.tokens[i].kind {
                        TokenKind::LParen => depth += 1,
                        TokenKind::RParen => {
                            depth -= 1;
                            i += 1;
                            if depth == 0 {
                                break;
                            }
                            continue;
                        }
                        TokenKind::Eof => break,
                        _ => {}
                    }
                    i += 1;
                }
            }
        }
        !matches!(&self.tokens[i].kind,
            TokenKind::Ident(w) if matches!(w.as_str(), "type" | "enum" | "const" | "pattern"))
    }

    fn take_optional_doc(&mut self) -> Option<DocBlock> {
        if let TokenKind::DocString(_) = &self.peek().kind {
            let tok = self.advance();
            if let TokenKind::DocString(content) = tok.kind {
                return Some(DocBlock {
                    content,
                    span: Span::new(tok.start, tok.end),
                });
            }
        }
        None
    }

    fn parse_annotations(&mut self) -> ParseResult<Vec<AnnotationUse>> {
        let mut out = Vec::new();
        while let TokenKind::At = self.peek().kind {
            let start = self.advance().start;
            let (name, name_span) = self.expect_ident()?;
            let literal = if matches!(self.peek().kind, TokenKind::LParen) {
                self.advance();
                let lit = self.parse_const_literal()?;
                self.expect(&TokenKind::RParen)?;
                Some(lit)
            } else {
                None
            };
            let end = self.tokens[self.pos.saturating_sub(1)].end.clone();
            out.push(AnnotationUse {
                name,
                name_span,
                literal,
                span: Span::new(start, end),
            });
        }
        Ok(out)
    }

    fn parse_include(&mut self) -> ParseResult<IncludeStmt> {
        let start = self.tokens[self.pos - 1].start.clone();
        let tok = self.advance();
        let path = match tok.kind {
            TokenKind::Str(s) => s,
            other => return self.err(format!("expected a string path after `include`, found {other:?}")),
        };
        Ok(IncludeStmt {
            path,
            span: Span::new(start, tok.end),
        })
    }

    fn parse_spread_ref(&mut self) -> ParseResult<SpreadRef> {
        let start = self.advance().start; // Ellipsis
        let (name, name_span) = self.expect_ident()?;
        let (member, member_span) = if matches!(self.peek().kind, TokenKind::Dot) {
            self.advance();
            let (m, ms) = self.expect_ident()?;
            (Some(m), Some(ms))
        } else {
            (None, None)
        };
        let end = self.tokens[self.pos - 1].end.clone();
        Ok(SpreadRef {
            name,
            name_span,
            member,
            member_span,
            span: Span::new(start, end),
        })
    }

    fn parse_type_decl(&mut self, doc: Option<DocBlock>, annotations: Vec<AnnotationUse>) -> ParseResult<TypeDecl> {
        let start = self.advance().start; // 'type'
        let (name, name_span) = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        let mut spreads = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBrace) {
            if matches!(self.peek().kind, TokenKind::Ellipsis) {
                spreads.push(self.parse_spread_ref()?);
            } else {
                fields.push(self.parse_field_decl()?);
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.end;

        Ok(TypeDecl {
            name,
            name_span,
            fields,
            spreads,
            docstring: doc,
            annotations,
            span: Span::new(start, end),
        })
    }

    fn parse_field_decl(&mut self) -> ParseResult<FieldDecl> {
        let doc = self.take_optional_doc();
        let annotations = self.parse_annotations()?;
        let (name, name_span) = self.expect_ident()?;
        let start = name_span.start.clone();
        let optional = matches!(self.peek().kind, TokenKind::Question);
        if optional {
            self.advance();
        }
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_field_type()?;
        let end = ty.span.end.clone();
        Ok(FieldDecl {
            name,
            name_span,
            optional,
            ty,
            docstring: doc,
            annotations,
            span: Span::new(start, end),
        })
    }

    fn parse_field_type(&mut self) -> ParseResult<FieldType> {
        let start = self.peek().start.clone();

        let kind = if self.eat_ident("map") {
            self.expect(&TokenKind::LAngle)?;
            let value = self.parse_field_type()?;
            self.expect(&TokenKind::RAngle)?;
            FieldTypeKind::Map(Box::new(value))
        } else if matches!(self.peek().kind, TokenKind::LBrace) {
            let obj = self.parse_inline_object()?;
            FieldTypeKind::Object(obj)
        } else {
            let (name, name_span) = self.expect_ident()?;
            if PRIMITIVES.contains(&name.as_str()) {
                FieldTypeKind::Primitive(name)
            } else {
                FieldTypeKind::Custom(name, name_span)
            }
        };

        let mut array_dims = 0u32;
        let mut end = self.tokens[self.pos - 1].end.clone();
        while matches!(self.peek().kind, TokenKind::LBracket) {
            self.advance();
            let rb = self.expect(&TokenKind::RBracket)?;
            end = rb.end;
            array_dims += 1;
        }

        Ok(FieldType {
            kind,
            array_dims,
            span: Span::new(start, end),
        })
    }

    fn parse_inline_object(&mut self) -> ParseResult<InlineObject> {
        let start = self.expect(&TokenKind::LBrace)?.start;
        let mut fields = Vec::new();
        let mut spreads = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBrace) {
            if matches!(self.peek().kind, TokenKind::Ellipsis) {
                spreads.push(self.parse_spread_ref()?);
            } else {
                fields.push(self.parse_field_decl()?);
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.end;
        Ok(InlineObject {
            fields,
            spreads,
            span: Span::new(start, end),
        })
    }

    fn parse_enum_decl(&mut self, doc: Option<DocBlock>, annotations: Vec<AnnotationUse>) -> ParseResult<EnumDecl> {
        let start = self.advance().start; // 'enum'
        let (name, name_span) = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        let mut spreads = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBrace) {
            if matches!(self.peek().kind, TokenKind::Ellipsis) {
                spreads.push(self.parse_spread_ref()?);
            } else {
                members.push(self.parse_enum_member()?);
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.end;

        Ok(EnumDecl {
            name,
            name_span,
            members,
            spreads,
            docstring: doc,
            annotations,
            span: Span::new(start, end),
        })
    }

    fn parse_enum_member(&mut self) -> ParseResult<EnumMemberDecl> {
        let (name, name_span) = self.expect_ident()?;
        let start = name_span.start.clone();
        let value = if matches!(self.peek().kind, TokenKind::Equals) {
            self.advance();
            let tok = self.advance();
            let span = Span::new(tok.start.clone(), tok.end.clone());
            match tok.kind {
                TokenKind::Str(s) => Some(EnumValueLiteral::Str(s, span)),
                TokenKind::Int(i) => Some(EnumValueLiteral::Int(i, span)),
                other => return self.err(format!("expected a string or integer enum value, found {other:?}")),
            }
        } else {
            None
        };
        let end = self.tokens[self.pos - 1].end.clone();
        Ok(EnumMemberDecl {
            name,
            name_span,
            value,
            span: Span::new(start, end),
        })
    }

    fn parse_const_decl(&mut self, doc: Option<DocBlock>, annotations: Vec<AnnotationUse>) -> ParseResult<ConstDecl> {
        let start = self.advance().start; // 'const'
        let (name, name_span) = self.expect_ident()?;

        let (type_name, type_span) = if matches!(self.peek().kind, TokenKind::Colon) {
            self.advance();
            let (t, ts) = self.expect_ident()?;
            (Some(t), Some(ts))
        } else {
            (None, None)
        };

        self.expect(&TokenKind::Equals)?;
        let value = self.parse_const_literal()?;
        let end = value.span().end.clone();

        Ok(ConstDecl {
            name,
            name_span,
            type_name,
            type_span,
            value,
            docstring: doc,
            annotations,
            span: Span::new(start, end),
        })
    }

    fn parse_const_literal(&mut self) -> ParseResult<ConstLiteral> {
        let tok = self.peek().clone();
        match &tok.kind {
            TokenKind::Str(_) => {
                let tok = self.advance();
                let span = Span::new(tok.start, tok.end);
                let TokenKind::Str(s) = tok.kind else { unreachable!() };
                Ok(ConstLiteral::Str(s, span))
            }
            TokenKind::Int(_) => {
                let tok = self.advance();
                let span = Span::new(tok.start, tok.end);
                let TokenKind::Int(i) = tok.kind else { unreachable!() };
                Ok(ConstLiteral::Int(i, span))
            }
            TokenKind::Float(_) => {
                let tok = self.advance();
                let span = Span::new(tok.start, tok.end);
                let TokenKind::Float(f) = tok.kind else { unreachable!() };
                Ok(ConstLiteral::Float(f, span))
            }
            TokenKind::Ident(word) if word == "true" || word == "false" => {
                let tok = self.advance();
                let span = Span::new(tok.start, tok.end);
                Ok(ConstLiteral::Bool(word == "true", span))
            }
            TokenKind::Ident(_) => {
                let (name, name_span) = self.expect_ident()?;
                let (member, member_span) = if matches!(self.peek().kind, TokenKind::Dot) {
                    self.advance();
                    let (m, ms) = self.expect_ident()?;
                    (Some(m), Some(ms))
                } else {
                    (None, None)
                };
                let end = self.tokens[self.pos - 1].end.clone();
                Ok(ConstLiteral::Reference(ReferenceLit {
                    name,
                    member,
                    member_span,
                    span: Span::new(name_span.start, end),
                }))
            }
            TokenKind::LBrace => self.parse_object_literal().map(ConstLiteral::Object),
            TokenKind::LBracket => self.parse_array_literal().map(ConstLiteral::Array),
            other => self.err(format!("expected a constant literal, found {other:?}")),
        }
    }

    fn parse_object_literal(&mut self) -> ParseResult<ObjectLiteral> {
        let start = self.expect(&TokenKind::LBrace)?.start;
        let mut entries = Vec::new();
        let mut spreads = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::RBrace => break,
                TokenKind::Ellipsis => spreads.push(self.parse_spread_ref()?),
                _ => {
                    let (key, key_span) = self.expect_ident()?;
                    self.expect(&TokenKind::Colon)?;
                    let value = self.parse_const_literal()?;
                    entries.push(ObjectEntry { key, key_span, value });
                }
            }
            if matches!(self.peek().kind, TokenKind::Comma) {
                self.advance();
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.end;
        Ok(ObjectLiteral {
            entries,
            spreads,
            span: Span::new(start, end),
        })
    }

    fn parse_array_literal(&mut self) -> ParseResult<ArrayLiteral> {
        let start = self.expect(&TokenKind::LBracket)?.start;
        let mut elements = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBracket) {
            elements.push(self.parse_const_literal()?);
            if matches!(self.peek().kind, TokenKind::Comma) {
                self.advance();
            }
        }
        let end = self.expect(&TokenKind::RBracket)?.end;
        Ok(ArrayLiteral {
            elements,
            span: Span::new(start, end),
        })
    }

    fn parse_pattern_decl(&mut self, doc: Option<DocBlock>, annotations: Vec<AnnotationUse>) -> ParseResult<PatternDecl> {
        let start = self.advance().start; // 'pattern'
        let (name, name_span) = self.expect_ident()?;
        self.expect(&TokenKind::Equals)?;
        let tok = self.advance();
        let template_span = Span::new(tok.start.clone(), tok.end.clone());
        let template = match tok.kind {
            TokenKind::Str(s) => s,
            other => return self.err(format!("expected a string template, found {other:?}")),
        };
        Ok(PatternDecl {
            name,
            name_span,
            template,
            template_span: template_span.clone(),
            docstring: doc,
            annotations,
            span: Span::new(start, template_span.end),
        })
    }
}
