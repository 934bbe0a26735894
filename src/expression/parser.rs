//! Operator-precedence parser for boolean expressions
//!
//! The parser keeps two stacks, one of pending operators and one of finished
//! subtrees, and reduces operators into subtrees as precedence dictates. It
//! understands two shorthand forms used when typing equations by hand:
//!
//! - implicit AND: `AB` is `A * B` and `A(B + C)` is `A * (B + C)`
//! - postfix NOT: `A'` is `!A`, and `(A + B)'` is `!(A + B)`

use super::error::{ParseError, SyntaxErrorKind};
use super::{Expr, Operator};

/// Default limit on the height of a parsed tree
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parse a boolean expression from a string
///
/// Supports the following syntax:
/// - Variables: single letters, case-insensitive (`a` is `A`)
/// - `*` AND, `%` NAND (precedence 3)
/// - `+` OR, `^` XOR, `$` NOR (precedence 2)
/// - `!` prefix NOT, `'` postfix NOT (precedence 4)
/// - Parentheses for grouping; whitespace is ignored
///
/// Operators of equal precedence associate to the left.
///
/// # Examples
///
/// ```
/// use logic_compiler::{parse, Expr};
///
/// let implicit = parse("AB + C'").unwrap();
/// let explicit = parse("(A * B) + !C").unwrap();
/// assert_eq!(implicit, explicit);
///
/// assert!(parse("A +").is_err());
/// assert!(parse("(A").is_err());
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    parse_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// Parse a boolean expression, rejecting trees taller than `max_depth`
pub fn parse_with_limit(input: &str, max_depth: usize) -> Result<Expr, ParseError> {
    Parser::new(input, max_depth).run()
}

/// Entry on the operator stack
#[derive(Debug, Clone, Copy)]
enum Pending {
    Op { op: Operator, position: usize },
    OpenParen { position: usize },
}

impl Pending {
    fn precedence(self) -> u8 {
        match self {
            Pending::Op { op, .. } => op.precedence(),
            Pending::OpenParen { .. } => 0,
        }
    }
}

/// Kind of the previous significant token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Operator,
    OpenParen,
    /// A variable, a closed group or a postfix NOT result
    Operand,
}

struct Parser<'a> {
    input: &'a str,
    max_depth: usize,
    ops: Vec<Pending>,
    // Each finished subtree travels with its height
    operands: Vec<(Expr, usize)>,
    last: Last,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        Parser {
            input,
            max_depth,
            ops: Vec::new(),
            operands: Vec::new(),
            last: Last::Start,
        }
    }

    fn error(&self, kind: SyntaxErrorKind, position: Option<usize>) -> ParseError {
        ParseError::new(kind, self.input, position)
    }

    fn run(mut self) -> Result<Expr, ParseError> {
        for (position, c) in self.input.char_indices() {
            if c.is_whitespace() {
                continue;
            }

            if c.is_ascii_alphabetic() {
                self.implicit_and(position)?;
                self.push_operand(Expr::var(c), 1, position)?;
                self.last = Last::Operand;
            } else if c == '\'' {
                self.postfix_not(position)?;
            } else if c == '(' {
                self.implicit_and(position)?;
                self.ops.push(Pending::OpenParen { position });
                self.last = Last::OpenParen;
            } else if c == ')' {
                self.close_paren(position)?;
                self.last = Last::Operand;
            } else if let Some(op) = Operator::from_symbol(c) {
                self.check_operator_placement(op, position)?;
                self.push_operator(op, position)?;
                self.last = Last::Operator;
            } else {
                return Err(self.error(SyntaxErrorKind::UnexpectedCharacter(c), Some(position)));
            }
        }

        self.check_operand_follows()?;
        while let Some(top) = self.ops.last().copied() {
            if let Pending::OpenParen { position } = top {
                return Err(self.error(SyntaxErrorKind::UnclosedParen, Some(position)));
            }
            self.reduce()?;
        }

        if self.operands.len() > 1 {
            let count = self.operands.len();
            return Err(self.error(SyntaxErrorKind::UnjoinedOperands(count), None));
        }
        match self.operands.pop() {
            Some((expr, _)) => Ok(expr),
            None => Err(self.error(SyntaxErrorKind::Empty, None)),
        }
    }

    /// Binary operators need an operand on their left, prefix NOT must not have one
    fn check_operator_placement(&self, op: Operator, position: usize) -> Result<(), ParseError> {
        match (op, self.last) {
            (Operator::Not, Last::Operand) => {
                Err(self.error(SyntaxErrorKind::MisplacedPrefix, Some(position)))
            }
            (Operator::Not, _) | (_, Last::Operand) => Ok(()),
            _ => Err(self.error(SyntaxErrorKind::MissingOperand(op.symbol()), Some(position))),
        }
    }

    /// Reject an operator left without its right-hand operand, at `)` or end of input
    fn check_operand_follows(&self) -> Result<(), ParseError> {
        if self.last != Last::Operator {
            return Ok(());
        }
        match self.ops.last().copied() {
            Some(Pending::Op { op, position }) => Err(self.error(
                SyntaxErrorKind::MissingOperand(op.symbol()),
                Some(position),
            )),
            _ => Ok(()),
        }
    }

    /// Insert an AND when an operand is directly followed by another operand
    fn implicit_and(&mut self, position: usize) -> Result<(), ParseError> {
        if self.last == Last::Operand {
            self.push_operator(Operator::And, position)?;
        }
        Ok(())
    }

    fn push_operator(&mut self, op: Operator, position: usize) -> Result<(), ParseError> {
        // Prefix NOT applies to what follows, so nothing before it is complete yet
        if op != Operator::Not {
            while let Some(top) = self.ops.last().copied() {
                if matches!(top, Pending::OpenParen { .. }) || top.precedence() < op.precedence()
                {
                    break;
                }
                self.reduce()?;
            }
        }
        self.ops.push(Pending::Op { op, position });
        Ok(())
    }

    fn postfix_not(&mut self, position: usize) -> Result<(), ParseError> {
        if self.last != Last::Operand {
            return Err(self.error(SyntaxErrorKind::DanglingPostfix, Some(position)));
        }
        let (operand, depth) = self
            .operands
            .pop()
            .ok_or_else(|| self.error(SyntaxErrorKind::DanglingPostfix, Some(position)))?;
        self.push_operand(operand.negate(), depth + 1, position)?;
        self.last = Last::Operand;
        Ok(())
    }

    fn close_paren(&mut self, position: usize) -> Result<(), ParseError> {
        self.check_operand_follows()?;
        loop {
            match self.ops.last().copied() {
                None => {
                    return Err(self.error(SyntaxErrorKind::UnmatchedParen, Some(position)));
                }
                Some(Pending::OpenParen { .. }) => {
                    self.ops.pop();
                    return Ok(());
                }
                Some(Pending::Op { .. }) => self.reduce()?,
            }
        }
    }

    /// Pop one operator and fold it together with its operands into a subtree
    fn reduce(&mut self) -> Result<(), ParseError> {
        let (op, position) = match self.ops.pop() {
            Some(Pending::Op { op, position }) => (op, position),
            Some(Pending::OpenParen { position }) => {
                return Err(self.error(SyntaxErrorKind::UnclosedParen, Some(position)));
            }
            None => return Ok(()),
        };
        let missing = |parser: &Self| {
            parser.error(SyntaxErrorKind::MissingOperand(op.symbol()), Some(position))
        };

        if op == Operator::Not {
            let (operand, depth) = self.operands.pop().ok_or_else(|| missing(self))?;
            return self.push_operand(operand.negate(), depth + 1, position);
        }

        // Right operand sits on top of the stack
        let (right, right_depth) = self.operands.pop().ok_or_else(|| missing(self))?;
        let (left, left_depth) = self.operands.pop().ok_or_else(|| missing(self))?;
        let node = Expr::binary(op, left, right).ok_or_else(|| missing(self))?;
        self.push_operand(node, left_depth.max(right_depth) + 1, position)
    }

    fn push_operand(
        &mut self,
        expr: Expr,
        depth: usize,
        position: usize,
    ) -> Result<(), ParseError> {
        if depth > self.max_depth {
            return Err(self.error(SyntaxErrorKind::TooDeep(self.max_depth), Some(position)));
        }
        self.operands.push((expr, depth));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(c: char) -> Expr {
        Expr::var(c)
    }

    #[test]
    fn test_single_variable_is_uppercased() {
        assert_eq!(parse("a").unwrap(), var('A'));
        assert_eq!(parse("  F ").unwrap(), var('F'));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse("A+B*C").unwrap();
        assert_eq!(expr, var('A').or(var('B').and(var('C'))));
    }

    #[test]
    fn test_equal_precedence_is_left_associative() {
        assert_eq!(
            parse("A+B^C").unwrap(),
            var('A').or(var('B')).xor(var('C'))
        );
        assert_eq!(
            parse("A%B*C").unwrap(),
            var('A').nand(var('B')).and(var('C'))
        );
        assert_eq!(
            parse("A$B+C").unwrap(),
            var('A').nor(var('B')).or(var('C'))
        );
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse("AB").unwrap(), parse("A*B").unwrap());
        assert_eq!(parse("A(B+C)").unwrap(), parse("A*(B+C)").unwrap());
        assert_eq!(parse("(A+B)(C+D)").unwrap(), parse("(A+B)*(C+D)").unwrap());
        assert_eq!(parse("ABC").unwrap(), var('A').and(var('B')).and(var('C')));
    }

    #[test]
    fn test_implicit_multiplication_after_or() {
        // AB + C: the implicit AND must not swallow the OR
        assert_eq!(
            parse("AB+CD").unwrap(),
            var('A').and(var('B')).or(var('C').and(var('D')))
        );
    }

    #[test]
    fn test_postfix_not() {
        assert_eq!(parse("A'").unwrap(), parse("!A").unwrap());
        assert_eq!(parse("(A+B)'").unwrap(), parse("!(A+B)").unwrap());
        assert_eq!(parse("A''").unwrap(), var('A').negate().negate());
        assert_eq!(parse("A'B").unwrap(), var('A').negate().and(var('B')));
        assert_eq!(parse("A*B'").unwrap(), var('A').and(var('B').negate()));
    }

    #[test]
    fn test_prefix_not() {
        assert_eq!(parse("!A*B").unwrap(), var('A').negate().and(var('B')));
        assert_eq!(parse("!!A").unwrap(), var('A').negate().negate());
        assert_eq!(parse("A+!B").unwrap(), var('A').or(var('B').negate()));
        assert_eq!(
            parse("!(A*B)").unwrap(),
            var('A').and(var('B')).negate()
        );
    }

    #[test]
    fn test_binary_children_order() {
        // First pop becomes the right child
        match parse("A^B").unwrap() {
            Expr::Xor(l, r) => {
                assert_eq!(*l, var('A'));
                assert_eq!(*r, var('B'));
            }
            other => panic!("expected XOR, got {:?}", other),
        }
    }

    #[test]
    fn test_failures() {
        let cases = [
            ("", SyntaxErrorKind::Empty),
            ("   ", SyntaxErrorKind::Empty),
            ("()", SyntaxErrorKind::Empty),
            ("A+", SyntaxErrorKind::MissingOperand('+')),
            ("+A", SyntaxErrorKind::MissingOperand('+')),
            ("(A", SyntaxErrorKind::UnclosedParen),
            ("A)", SyntaxErrorKind::UnmatchedParen),
            ("'A", SyntaxErrorKind::DanglingPostfix),
            ("A+'", SyntaxErrorKind::DanglingPostfix),
            ("A!B", SyntaxErrorKind::MisplacedPrefix),
            ("A!", SyntaxErrorKind::MisplacedPrefix),
            ("A+B!", SyntaxErrorKind::MisplacedPrefix),
            ("A!+B", SyntaxErrorKind::MisplacedPrefix),
            ("(A!)", SyntaxErrorKind::MisplacedPrefix),
            ("!", SyntaxErrorKind::MissingOperand('!')),
            ("A+!", SyntaxErrorKind::MissingOperand('!')),
            ("(A+!)", SyntaxErrorKind::MissingOperand('!')),
            ("A+*B", SyntaxErrorKind::MissingOperand('*')),
            ("(+A)", SyntaxErrorKind::MissingOperand('+')),
            ("A&B", SyntaxErrorKind::UnexpectedCharacter('&')),
            ("A1", SyntaxErrorKind::UnexpectedCharacter('1')),
        ];
        for (input, kind) in cases {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind, kind, "input {:?}", input);
            assert_eq!(&*err.input, input);
        }
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(parse("(A").unwrap_err().position, Some(0));
        assert_eq!(parse("A + B)").unwrap_err().position, Some(5));
        assert_eq!(parse("AB?").unwrap_err().position, Some(2));
        assert_eq!(parse("A+B!").unwrap_err().position, Some(3));
        assert_eq!(parse("A*!").unwrap_err().position, Some(2));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}A{}", "(".repeat(10), ")".repeat(10));
        assert!(parse_with_limit(&deep, 4).is_ok());

        let primes = format!("A{}", "'".repeat(10));
        let err = parse_with_limit(&primes, 5).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::TooDeep(5));

        let chain = "A*B*C*D*E*F";
        assert!(parse_with_limit(chain, 6).is_ok());
        assert!(parse_with_limit(chain, 5).is_err());
    }
}
