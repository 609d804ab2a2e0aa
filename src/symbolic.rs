///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// expression trees over one variable: polynomial leaves with rational coefficients, sums,
/// products, fractions and named functions; exact evaluation and rendering
///# Example#
/// ```
/// use RustedAlgebra::symbolic::symbolic_engine::{ExprCalculator, Node};
/// use num::rational::Rational64;
/// let e = Node::fraction(Node::integer(1), Node::variable());
/// let calc = ExprCalculator::default();
/// assert_eq!(calc.evaluate(&e, &Rational64::new(4, 1)).unwrap(), Rational64::new(1, 4));
/// ```
pub mod symbolic_engine;
///____________________________________________________________________________________________________________________________
/// # Simplification
/// rewrite rules dispatched by function name, node type, tags, then generic rules;
/// `Simplifier` repeats them over a tree until a fixpoint
///# Example#
/// ```
/// use RustedAlgebra::symbolic::symbolic_engine::Node;
/// use RustedAlgebra::symbolic::symbolic_simplify::{Simplifier, EXPAND_TAG};
/// let x = Node::variable();
/// let e = Node::multiply(vec![x.clone(), Node::add(vec![x, Node::integer(1)])]);
/// let simplified = Simplifier::with_defaults().with_tags([EXPAND_TAG]).simplify(&e);
/// assert_eq!(simplified.to_string(), "x^2 + x");
/// ```
pub mod symbolic_simplify;
mod symbolic_simplify_tests;
