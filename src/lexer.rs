//! Recursive-descent lexer over a single search string.
//!
//! The lexer only recognizes structure. It never touches the environment or
//! the graph; the [`crate::engine::Engine`] reduces the tree it returns.

use tracing::debug;

use crate::error::{QueryError, Result};
use crate::grammar::{Atom, EXPRESSION_PRIORITY, Expression, Grammar, Rule, Term, is_id_atom, is_name_atom};

pub struct Lexer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Lexer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn lex<'q>(&self, input: &'q str) -> Result<Expression<'q>> {
        let input = input.trim();
        if input.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        if self.grammar.plain().is_match(input) {
            debug!(rule = %Rule::SubjectTerm, input, "no keywords in input");
            return self.subject_term(input).map(Expression::Subject).ok_or(QueryError::EmptyQuery);
        }
        for rule in EXPRESSION_PRIORITY {
            let expression = match rule {
                Rule::ZeroaryExpression => self.zeroary_expression(input),
                Rule::TypeExpression => self.type_expression(input),
                Rule::TagExpression => self.tag_expression(input),
                Rule::SubjectTerm => self.subject_term(input).map(Expression::Subject),
                _ => None,
            };
            if let Some(expression) = expression {
                debug!(rule = %rule, input, "expression matched");
                return Ok(expression);
            }
        }
        Err(QueryError::EmptyQuery)
    }

    fn zeroary_expression<'q>(&self, input: &'q str) -> Option<Expression<'q>> {
        match self.term(Rule::ZeroaryTerm, input)? {
            (Term::Zeroary(keyword), _) => Some(Expression::Zeroary(keyword)),
            _ => None,
        }
    }

    fn type_expression<'q>(&self, input: &'q str) -> Option<Expression<'q>> {
        match self.term(Rule::TypeTerm, input)? {
            (Term::Type(keyword), rest) => Some(Expression::Type {
                keyword,
                subject: self.subject_term(rest)?,
            }),
            _ => None,
        }
    }

    fn tag_expression<'q>(&self, input: &'q str) -> Option<Expression<'q>> {
        match self.term(Rule::TagTerm, input)? {
            (Term::Tag(tag), rest) => Some(Expression::Tag {
                tag,
                subject: self.subject_term(rest)?,
            }),
            _ => None,
        }
    }

    /// Matches a keyword term at the start of `input`, returning the term and
    /// the input left after it.
    fn term<'q>(&self, rule: Rule, input: &'q str) -> Option<(Term<'q>, &'q str)> {
        let (pattern, wrap): (_, fn(&'q str) -> Term<'q>) = match rule {
            Rule::TagTerm => (self.grammar.tag_term(), Term::Tag),
            Rule::TypeTerm => (self.grammar.type_term(), Term::Type),
            Rule::ZeroaryTerm => (self.grammar.zeroary_term(), Term::Zeroary),
            _ => return None,
        };
        let found = pattern.find(input)?;
        debug!(rule = %rule, keyword = found.keyword, "term matched");
        Some((wrap(found.keyword.trim()), input[found.consumed..].trim_start()))
    }

    fn subject_term<'q>(&self, input: &'q str) -> Option<Atom<'q>> {
        let input = input.trim();
        if is_id_atom(input) {
            Some(Atom::Id(input))
        } else if is_name_atom(input) {
            Some(Atom::Name(input))
        } else {
            None
        }
    }
}
