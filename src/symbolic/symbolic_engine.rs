//! # Symbolic expression trees
//!
//! Expressions in a single variable built from exact rational polynomials:
//!
//! - `Poly` leaves hold a [`Polynomial<Rational64>`]; constants and the variable itself are
//!   polynomials of degree 0 and 1.
//! - `Add` and `Multiply` are n-ary, so rewrites can flatten and merge operands freely.
//! - `Fraction` is a quotient of two subtrees.
//! - `Function` is a named function applied to arguments, e.g. `sin(x)`.
//!
//! The tree itself knows nothing about the variable name or polynomial arithmetic; those come
//! from an [`ExprCalculator`], which is also the equality used when expressions are compared.
//!
//! # Example
//! ```
//! use RustedAlgebra::symbolic::symbolic_engine::{ExprCalculator, Node};
//! let calc = ExprCalculator::new("t");
//! let e = Node::add(vec![
//!     Node::function("sin", vec![Node::variable()]),
//!     Node::integer(2),
//! ]);
//! assert_eq!(calc.render(&e), "sin(t) + 2");
//! ```
use crate::algebra::calculator::{FieldCalculator, RingCalculator};
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use crate::algebra::number_calculators::RationalCalculator;
use crate::algebra::polynomial::{Polynomial, PolynomialCalculator};
use itertools::Itertools;
use num::rational::Rational64;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Node of an expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Polynomial in the expression variable, exact rational coefficients
    Poly(Polynomial<Rational64>),
    /// Sum of all children; empty sum is 0
    Add(Vec<Node>),
    /// Product of all children; empty product is 1
    Multiply(Vec<Node>),
    /// numerator / denominator
    Fraction(Box<Node>, Box<Node>),
    /// Named function such as `exp`, `ln`, `sin`, `cos`
    Function { name: String, args: Vec<Node> },
}

/// Discriminant of a [`Node`], used to register strategies per node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum NodeType {
    Poly,
    Add,
    Multiply,
    Fraction,
    Function,
}

fn rational_polys() -> PolynomialCalculator<RationalCalculator> {
    PolynomialCalculator::new(RationalCalculator)
}

impl Node {
    pub fn poly(p: Polynomial<Rational64>) -> Node {
        Node::Poly(p)
    }

    /// Rational constant as a degree-0 polynomial (the zero polynomial for `0`).
    pub fn constant(c: Rational64) -> Node {
        Node::Poly(rational_polys().constant(c))
    }

    pub fn integer(c: i64) -> Node {
        Node::constant(Rational64::from_integer(c))
    }

    /// The expression variable.
    pub fn variable() -> Node {
        Node::Poly(rational_polys().monomial(Rational64::from_integer(1), 1))
    }

    /// Polynomial from integer coefficients, lowest degree first.
    pub fn from_integer_coefficients(coefficients: &[i64]) -> Node {
        let coefficients = coefficients
            .iter()
            .map(|&c| Rational64::from_integer(c))
            .collect();
        Node::Poly(rational_polys().from_coefficients(coefficients))
    }

    pub fn add(children: Vec<Node>) -> Node {
        Node::Add(children)
    }

    pub fn multiply(children: Vec<Node>) -> Node {
        Node::Multiply(children)
    }

    pub fn fraction(numerator: Node, denominator: Node) -> Node {
        Node::Fraction(Box::new(numerator), Box::new(denominator))
    }

    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Function {
            name: name.into(),
            args,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Poly(_) => NodeType::Poly,
            Node::Add(_) => NodeType::Add,
            Node::Multiply(_) => NodeType::Multiply,
            Node::Fraction(_, _) => NodeType::Fraction,
            Node::Function { .. } => NodeType::Function,
        }
    }

    /// Name of a `Function` node, `None` for everything else.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Node::Function { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_poly(&self) -> Option<&Polynomial<Rational64>> {
        match self {
            Node::Poly(p) => Some(p),
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Poly(_) => Vec::new(),
            Node::Add(children) | Node::Multiply(children) => children.iter().collect(),
            Node::Fraction(num, den) => vec![num.as_ref(), den.as_ref()],
            Node::Function { args, .. } => args.iter().collect(),
        }
    }

    /// Same node with `f` applied to every direct child.
    pub fn map_children(&self, mut f: impl FnMut(&Node) -> Node) -> Node {
        match self {
            Node::Poly(_) => self.clone(),
            Node::Add(children) => Node::Add(children.iter().map(&mut f).collect()),
            Node::Multiply(children) => Node::Multiply(children.iter().map(&mut f).collect()),
            Node::Fraction(num, den) => {
                let num = f(num.as_ref());
                let den = f(den.as_ref());
                Node::fraction(num, den)
            }
            Node::Function { name, args } => Node::Function {
                name: name.clone(),
                args: args.iter().map(&mut f).collect(),
            },
        }
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Human-readable form with `var` as the variable name.
    pub fn render(&self, var: &str) -> String {
        match self {
            Node::Poly(p) => p.display_with(var).to_string(),
            Node::Add(children) => {
                if children.is_empty() {
                    return "0".to_string();
                }
                children.iter().map(|c| c.render(var)).join(" + ")
            }
            Node::Multiply(children) => {
                if children.is_empty() {
                    return "1".to_string();
                }
                children
                    .iter()
                    .map(|c| {
                        let text = c.render(var);
                        let wrap = match c {
                            Node::Add(_) | Node::Fraction(_, _) => true,
                            Node::Poly(_) => text.contains(' '),
                            _ => false,
                        };
                        if wrap { format!("({})", text) } else { text }
                    })
                    .join("*")
            }
            Node::Fraction(num, den) => {
                format!("{}/{}", num.render_operand(var), den.render_operand(var))
            }
            Node::Function { name, args } => {
                format!("{}({})", name, args.iter().map(|a| a.render(var)).join(", "))
            }
        }
    }

    /// Rendering as a fraction operand: parenthesized unless a single token.
    fn render_operand(&self, var: &str) -> String {
        let text = self.render(var);
        let atomic = match self {
            Node::Function { .. } => true,
            Node::Poly(_) => !text.contains(&[' ', '*', '/'][..]),
            _ => false,
        };
        if atomic { text } else { format!("({})", text) }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render("x"))
    }
}

/// Host-side calculator for expression trees: knows the variable name and does the
/// polynomial arithmetic strategies need.
#[derive(Debug, Clone)]
pub struct ExprCalculator {
    variable: String,
    polys: PolynomialCalculator<RationalCalculator>,
}

impl Default for ExprCalculator {
    fn default() -> Self {
        Self::new("x")
    }
}

impl ExprCalculator {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            polys: rational_polys(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn polynomial_calculator(&self) -> &PolynomialCalculator<RationalCalculator> {
        &self.polys
    }

    pub fn is_poly_equal(&self, a: &Polynomial<Rational64>, b: &Polynomial<Rational64>) -> bool {
        self.polys.is_equal(a, b)
    }

    /// Structural equality, with polynomial leaves compared by value.
    pub fn is_node_equal(&self, a: &Node, b: &Node) -> bool {
        match (a, b) {
            (Node::Poly(p), Node::Poly(q)) => self.is_poly_equal(p, q),
            (Node::Add(xs), Node::Add(ys)) | (Node::Multiply(xs), Node::Multiply(ys)) => {
                self.all_equal(xs, ys)
            }
            (Node::Fraction(n1, d1), Node::Fraction(n2, d2)) => {
                self.is_node_equal(n1, n2) && self.is_node_equal(d1, d2)
            }
            (
                Node::Function { name: f, args: xs },
                Node::Function { name: g, args: ys },
            ) => f == g && self.all_equal(xs, ys),
            _ => false,
        }
    }

    fn all_equal(&self, xs: &[Node], ys: &[Node]) -> bool {
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.is_node_equal(x, y))
    }

    pub fn render(&self, node: &Node) -> String {
        node.render(&self.variable)
    }

    /// Exact value at `x`. Functions have no exact rational value here and are rejected.
    pub fn evaluate(&self, node: &Node, x: &Rational64) -> AlgebraResult<Rational64> {
        let q = self.polys.coefficient_calculator();
        match node {
            Node::Poly(p) => Ok(self.polys.evaluate(p, x)),
            Node::Add(children) => children
                .iter()
                .try_fold(q.zero(), |acc, c| Ok(q.add(&acc, &self.evaluate(c, x)?))),
            Node::Multiply(children) => children
                .iter()
                .try_fold(q.one(), |acc, c| Ok(q.multiply(&acc, &self.evaluate(c, x)?))),
            Node::Fraction(num, den) => {
                q.divide(&self.evaluate(num, x)?, &self.evaluate(den, x)?)
            }
            Node::Function { name, .. } => Err(AlgebraError::UnsupportedCalculation(format!(
                "exact value of {}(..)",
                name
            ))),
        }
    }
}

impl EqualPredicate<Node> for ExprCalculator {
    fn is_equal(&self, a: &Node, b: &Node) -> bool {
        self.is_node_equal(a, b)
    }
}
