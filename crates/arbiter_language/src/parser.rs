//! Parser for the Arbiter rule-script DSL.
//!
//! Predictive recursive descent with one token of lookahead and no
//! backtracking. Every production expects the scanner's current token to be
//! its first token and leaves the scanner on the first token it did not
//! consume. The first error aborts the parse. Blocks, arrays and maps may
//! nest at most [`MAX_NESTING`] levels deep.
//!
//! ```text
//! Program   := Statement*
//! Statement := Def | Run | Eval | Par | Seq | Sel
//! Def       := 'def' '(' IDENT ',' Term ')' '.'
//! Run       := 'run' '(' Var ',' Term ',' Term ')' '.'
//! Eval      := 'eval' '(' (STRING | Var) ',' Term [',' Term] ')' '.'
//! Composite := ('par' | 'seq' | 'sel') '(' [Term [',' Term]] ')' '{' Statement* '}'
//! Term      := Array | Map | 'true' | 'false' | 'null' | INT | REAL | STRING | Var
//! Array     := '[' [Term (',' Term)*] ']'
//! Map       := '{' [STRING ':' Term (',' STRING ':' Term)*] '}'
//! ```

use arbiter_foundation::{Error, ErrorKind, Result};

use crate::ast::{Literal, Program, Statement, Term};
use crate::dialect::{Dialect, NUMERIC_SIGIL};
use crate::reader::{Reader, StrReader};
use crate::rules::decode_string;
use crate::scanner::Scanner;
use crate::token::{Token, TokenType};

/// Deepest nesting of blocks and collection terms the parser accepts.
pub const MAX_NESTING: usize = 64;

/// Parser for Arbiter scripts.
#[derive(Debug)]
pub struct Parser<R: Reader = StrReader> {
    scanner: Scanner<R>,
    nesting: usize,
}

impl Parser<StrReader> {
    /// Creates a parser for `source` in the standard dialect.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self::with_dialect(source, Dialect::Standard)
    }

    /// Creates a parser for `source` in the given dialect.
    #[must_use]
    pub fn with_dialect(source: &str, dialect: Dialect) -> Self {
        Self::from_scanner(dialect.scanner(source))
    }
}

impl<R: Reader> Parser<R> {
    /// Creates a parser over a configured scanner, rewinding it first.
    #[must_use]
    pub fn from_scanner(mut scanner: Scanner<R>) -> Self {
        scanner.rewind();
        scanner.advance();
        Self {
            scanner,
            nesting: 0,
        }
    }

    /// Parses statements until the input is exhausted.
    ///
    /// # Errors
    /// Returns the first syntax or missing-token error.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while self.scanner.current().is_some() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program::new(statements))
    }

    /// Parses one statement.
    ///
    /// # Errors
    /// Returns an error if the input does not start with a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let keyword = match self.scanner.current() {
            Some(token) if token.kind == TokenType::Keyword => token.lexeme.clone(),
            _ => return Err(self.error("statement keyword")),
        };
        match keyword.as_str() {
            "def" => self.parse_def(),
            "run" => self.parse_run(),
            "eval" => self.parse_eval(),
            "par" | "seq" | "sel" => self.parse_composite(&keyword),
            _ => Err(self.error("statement keyword")),
        }
    }

    /// Parses one term.
    ///
    /// # Errors
    /// Returns an error if the input does not start with a valid term.
    pub fn parse_term(&mut self) -> Result<Term> {
        let Some(token) = self.scanner.current() else {
            return Err(self.error("term"));
        };
        match token.kind {
            TokenType::Symbol if token.lexeme == "[" => self.nested(Self::parse_array),
            TokenType::Symbol if token.lexeme == "{" => self.nested(Self::parse_map),
            TokenType::Keyword => {
                let literal = match token.lexeme.as_str() {
                    "true" => Literal::Bool(true),
                    "false" => Literal::Bool(false),
                    "null" => Literal::Null,
                    _ => return Err(self.error("term")),
                };
                self.scanner.advance();
                Ok(Term::Literal(literal))
            }
            TokenType::NumberInteger => {
                let n = token.lexeme.parse().map_err(|_| self.error("integer"))?;
                self.scanner.advance();
                Ok(Term::Literal(Literal::Int(n)))
            }
            TokenType::NumberReal => {
                let n = token.lexeme.parse().map_err(|_| self.error("real"))?;
                self.scanner.advance();
                Ok(Term::Literal(Literal::Real(n)))
            }
            TokenType::LiteralString => Ok(Term::Literal(Literal::String(self.expect_string()?))),
            TokenType::Identifier | TokenType::Variable => self.parse_variable(),
            _ => Err(self.error("term")),
        }
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.scanner.current().is_none()
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_def(&mut self) -> Result<Statement> {
        self.expect_keyword("def")?;
        self.expect_symbol("(")?;
        let key = self.expect_identifier()?;
        self.expect_symbol(",")?;
        let value = self.parse_term()?;
        self.expect_symbol(")")?;
        self.expect_terminal()?;
        Ok(Statement::Def { key, value })
    }

    fn parse_run(&mut self) -> Result<Statement> {
        self.expect_keyword("run")?;
        self.expect_symbol("(")?;
        let target = self.parse_variable()?;
        self.expect_symbol(",")?;
        let arg1 = self.parse_term()?;
        self.expect_symbol(",")?;
        let arg2 = self.parse_term()?;
        self.expect_symbol(")")?;
        self.expect_terminal()?;
        Ok(Statement::Run { target, arg1, arg2 })
    }

    fn parse_eval(&mut self) -> Result<Statement> {
        self.expect_keyword("eval")?;
        self.expect_symbol("(")?;
        let module = match self.scanner.current() {
            Some(token) if token.kind == TokenType::LiteralString => {
                Term::Literal(Literal::String(self.expect_string()?))
            }
            Some(token) if matches!(token.kind, TokenType::Identifier | TokenType::Variable) => {
                self.parse_variable()?
            }
            _ => return Err(self.error("module name (string or variable)")),
        };
        self.expect_symbol(",")?;
        let targets = self.parse_term()?;
        let policy = if self.accept_symbol(",") {
            Some(self.parse_term()?)
        } else {
            None
        };
        self.expect_symbol(")")?;
        self.expect_terminal()?;
        Ok(Statement::Eval {
            module,
            targets,
            policy,
        })
    }

    fn parse_composite(&mut self, keyword: &str) -> Result<Statement> {
        self.expect_keyword(keyword)?;
        self.expect_symbol("(")?;
        let mut path = None;
        let mut policy = None;
        if !self.check_symbol(")") {
            path = Some(self.parse_term()?);
            if self.accept_symbol(",") {
                policy = Some(self.parse_term()?);
            }
        }
        self.expect_symbol(")")?;
        let children = self.nested(Self::parse_block)?;
        let path = path.filter(|p| !p.is_null());
        Ok(match keyword {
            "par" => Statement::Par {
                path,
                policy,
                children,
            },
            "seq" => Statement::Seq {
                path,
                policy,
                children,
            },
            _ => Statement::Sel {
                path,
                policy,
                children,
            },
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.expect_symbol("{")?;
        let mut children = Vec::new();
        while !self.check_symbol("}") {
            if self.is_at_end() {
                return Err(self.error("'}'"));
            }
            children.push(self.parse_statement()?);
        }
        self.expect_symbol("}")?;
        Ok(children)
    }

    // =========================================================================
    // Terms
    // =========================================================================

    fn parse_array(&mut self) -> Result<Term> {
        self.expect_symbol("[")?;
        let mut items = Vec::new();
        if !self.check_symbol("]") {
            items.push(self.parse_term()?);
            while self.accept_symbol(",") {
                items.push(self.parse_term()?);
            }
        }
        self.expect_symbol("]")?;
        Ok(Term::Array(items))
    }

    fn parse_map(&mut self) -> Result<Term> {
        self.expect_symbol("{")?;
        let mut entries = Vec::new();
        if !self.check_symbol("}") {
            loop {
                let key = self.expect_string()?;
                self.expect_symbol(":")?;
                entries.push((key, self.parse_term()?));
                if !self.accept_symbol(",") {
                    break;
                }
            }
        }
        self.expect_symbol("}")?;
        Ok(Term::Map(entries))
    }

    fn parse_variable(&mut self) -> Result<Term> {
        let term = match self.scanner.current() {
            Some(token) if token.kind == TokenType::Identifier => Term::Variable {
                name: token.lexeme.clone(),
                numeric: false,
            },
            Some(token) if token.kind == TokenType::Variable => Term::Variable {
                name: token
                    .lexeme
                    .strip_prefix(NUMERIC_SIGIL)
                    .unwrap_or(&token.lexeme)
                    .to_string(),
                numeric: true,
            },
            _ => return Err(self.error("variable")),
        };
        self.scanner.advance();
        Ok(term)
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.nesting >= MAX_NESTING {
            return Err(Error::new(ErrorKind::DepthExceeded(MAX_NESTING)));
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn check(&self, kind: TokenType, lexeme: &str) -> bool {
        self.scanner.current().is_some_and(|t| t.is(kind, lexeme))
    }

    fn check_symbol(&self, mark: &str) -> bool {
        self.check(TokenType::Symbol, mark)
    }

    fn accept_symbol(&mut self, mark: &str) -> bool {
        if self.check_symbol(mark) {
            self.scanner.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenType, lexeme: &str) -> Result<()> {
        if self.check(kind, lexeme) {
            self.scanner.advance();
            Ok(())
        } else {
            Err(self.error(&format!("'{lexeme}'")))
        }
    }

    fn expect_symbol(&mut self, mark: &str) -> Result<()> {
        self.expect(TokenType::Symbol, mark)
    }

    fn expect_keyword(&mut self, word: &str) -> Result<()> {
        self.expect(TokenType::Keyword, word)
    }

    fn expect_terminal(&mut self) -> Result<()> {
        self.expect(TokenType::Terminal, ".")
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.scanner.current() {
            Some(token) if token.kind == TokenType::Identifier => {
                let name = token.lexeme.clone();
                self.scanner.advance();
                Ok(name)
            }
            _ => Err(self.error("variable name")),
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        let decoded = match self.scanner.current() {
            Some(token) if token.kind == TokenType::LiteralString => decode_string(&token.lexeme),
            _ => None,
        };
        let Some(text) = decoded else {
            return Err(self.error("string"));
        };
        self.scanner.advance();
        Ok(text)
    }

    fn error(&self, expected: &str) -> Error {
        syntax_error(self.scanner.current(), expected)
    }
}

fn syntax_error(token: Option<&Token>, expected: &str) -> Error {
    let expected = expected.to_string();
    match token {
        None => Error::new(ErrorKind::MissingToken { expected }),
        Some(token) => Error::new(ErrorKind::Syntax {
            found: token.kind.name().to_string(),
            lexeme: token.lexeme.clone(),
            line: token.span.line,
            column: token.span.column,
            expected,
        }),
    }
}

/// Parses a whole script in the standard dialect.
///
/// # Errors
/// Returns the first syntax or missing-token error.
pub fn parse(source: &str) -> Result<Program> {
    parse_with(source, Dialect::Standard)
}

/// Parses a whole script in the given dialect.
///
/// # Errors
/// Returns the first syntax or missing-token error.
pub fn parse_with(source: &str, dialect: Dialect) -> Result<Program> {
    Parser::with_dialect(source, dialect).parse_program()
}

/// Parses a single term that must span the whole input.
///
/// # Errors
/// Returns an error if `source` is not exactly one term.
pub fn parse_term(source: &str, dialect: Dialect) -> Result<Term> {
    let mut parser = Parser::with_dialect(source, dialect);
    let term = parser.parse_term()?;
    if !parser.is_at_end() {
        return Err(parser.error("end of input"));
    }
    Ok(term)
}
