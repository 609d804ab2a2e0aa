#[cfg(test)]
mod tests {
    use crate::algebra::calculator::RingCalculator;
    use crate::symbolic::symbolic_engine::{ExprCalculator, Node, NodeType};
    use crate::symbolic::symbolic_simplify::{
        EXPAND_TAG, FRACTION_TAG, FnStrategy, SimStrategy, Simplifier, StrategyHolder,
    };
    use num::rational::Rational64;
    use std::collections::BTreeSet;

    fn no_tags() -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn tags(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    fn constant_rule(name: &str, value: i64) -> Box<dyn SimStrategy> {
        Box::new(FnStrategy::new(name, move |_: &Node, _: &ExprCalculator| {
            Some(Node::integer(value))
        }))
    }

    fn x() -> Node {
        Node::variable()
    }

    fn sin_x() -> Node {
        Node::function("sin", vec![x()])
    }

    fn q(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    //___________________________________DISPATCH____________________________________

    #[test]
    fn test_named_rules_take_priority() {
        let calc = ExprCalculator::default();
        let mut holder = StrategyHolder::new();
        holder.add_generic(constant_rule("generic", 3));
        holder.add_tagged(&["t"], constant_rule("tagged", 2));
        holder.add_for_type(NodeType::Function, constant_rule("typed", 1));
        holder.add_named("f", constant_rule("named", 0));
        let f = Node::function("f", vec![x()]);
        let (result, rule) = holder.try_simplification(&f, &tags(&["t"]), &calc).unwrap();
        assert_eq!(result, Node::integer(0));
        assert_eq!(rule, "named");

        // a different function name skips the named bucket
        let g = Node::function("g", vec![x()]);
        let (_, rule) = holder.try_simplification(&g, &tags(&["t"]), &calc).unwrap();
        assert_eq!(rule, "typed");

        // a non-function node falls through to the tagged bucket, then to the generic one
        let (_, rule) = holder.try_simplification(&x(), &tags(&["t"]), &calc).unwrap();
        assert_eq!(rule, "tagged");
        let (_, rule) = holder.try_simplification(&x(), &no_tags(), &calc).unwrap();
        assert_eq!(rule, "generic");
        assert_eq!(holder.len(), 4);
    }

    #[test]
    fn test_no_op_rewrite_stops_dispatch() {
        let calc = ExprCalculator::default();
        let mut holder = StrategyHolder::new();
        holder.add_for_type(
            NodeType::Poly,
            Box::new(FnStrategy::new("identity", |n: &Node, _: &ExprCalculator| {
                Some(n.clone())
            })),
        );
        holder.add_generic(constant_rule("generic", 7));
        let (result, rule) = holder.try_simplification(&x(), &no_tags(), &calc).unwrap();
        assert_eq!(result, x());
        assert_eq!(rule, "identity");
    }

    #[test]
    fn test_declining_rule_lets_next_rule_run() {
        let calc = ExprCalculator::default();
        let mut holder = StrategyHolder::new();
        holder.add_for_type(
            NodeType::Poly,
            Box::new(FnStrategy::new("decline", |_: &Node, _: &ExprCalculator| None)),
        );
        holder.add_generic(constant_rule("generic", 7));
        assert_eq!(
            holder.perform_simplification(&x(), &no_tags(), &calc),
            Node::integer(7)
        );
    }

    #[test]
    fn test_unmatched_node_is_returned_unchanged() {
        let calc = ExprCalculator::default();
        let holder = StrategyHolder::new();
        assert!(holder.is_empty());
        let e = Node::add(vec![x(), sin_x()]);
        assert!(holder.try_simplification(&e, &no_tags(), &calc).is_none());
        assert_eq!(holder.perform_simplification(&e, &no_tags(), &calc), e);
    }

    #[test]
    fn test_tagged_rules_need_intersecting_tags() {
        let calc = ExprCalculator::default();
        let mut holder = StrategyHolder::new();
        holder.add_tagged(&["a", "b"], constant_rule("ab", 1));
        assert!(holder.try_simplification(&x(), &tags(&["c"]), &calc).is_none());
        assert!(holder.try_simplification(&x(), &tags(&["b", "c"]), &calc).is_some());
    }

    //___________________________________DEFAULT RULES____________________________________

    #[test]
    fn test_sum_terms_are_merged() {
        let calc = ExprCalculator::default();
        let holder = StrategyHolder::with_default_strategies();
        // x + 1 + x = 2x + 1
        let e = Node::add(vec![x(), Node::integer(1), x()]);
        let result = holder.perform_simplification(&e, &no_tags(), &calc);
        assert_eq!(result, Node::from_integer_coefficients(&[1, 2]));
        // sin(x) + 0 = sin(x)
        let e = Node::add(vec![sin_x(), Node::integer(0)]);
        assert_eq!(holder.perform_simplification(&e, &no_tags(), &calc), sin_x());
    }

    #[test]
    fn test_product_factors_are_merged() {
        let calc = ExprCalculator::default();
        let holder = StrategyHolder::with_default_strategies();
        let e = Node::multiply(vec![sin_x(), Node::integer(2), x()]);
        let result = holder.perform_simplification(&e, &no_tags(), &calc);
        assert_eq!(
            result,
            Node::multiply(vec![Node::from_integer_coefficients(&[0, 2]), sin_x()])
        );
        let zero = Node::multiply(vec![sin_x(), Node::integer(0)]);
        assert_eq!(
            holder.perform_simplification(&zero, &no_tags(), &calc),
            Node::integer(0)
        );
    }

    #[test]
    fn test_fraction_gcd_is_cancelled() {
        let calc = ExprCalculator::default();
        let holder = StrategyHolder::with_default_strategies();
        // (x^2 - 1) / (x - 1) = x + 1
        let e = Node::fraction(
            Node::from_integer_coefficients(&[-1, 0, 1]),
            Node::from_integer_coefficients(&[-1, 1]),
        );
        assert_eq!(
            holder.perform_simplification(&e, &no_tags(), &calc),
            Node::from_integer_coefficients(&[1, 1])
        );
        // 2x / 4 = x/2
        let e = Node::fraction(Node::from_integer_coefficients(&[0, 2]), Node::integer(4));
        let half_x = calc
            .polynomial_calculator()
            .from_coefficients(vec![q(0, 1), q(1, 2)]);
        assert_eq!(
            holder.perform_simplification(&e, &no_tags(), &calc),
            Node::poly(half_x)
        );
        // x / (2x + 2) = (1/2 x) / (x + 1)
        let e = Node::fraction(x(), Node::from_integer_coefficients(&[2, 2]));
        let result = holder.perform_simplification(&e, &no_tags(), &calc);
        assert_eq!(calc.render(&result), "(1/2*x)/(x + 1)");
        // already reduced
        let e = Node::fraction(Node::integer(2), x());
        assert!(holder.try_simplification(&e, &no_tags(), &calc).is_none());
    }

    #[test]
    fn test_trivial_function_values() {
        let calc = ExprCalculator::default();
        let holder = StrategyHolder::with_default_strategies();
        let cases = [("exp", 0, 1), ("ln", 1, 0), ("sin", 0, 0), ("cos", 0, 1)];
        for (name, at, value) in cases {
            let e = Node::function(name, vec![Node::integer(at)]);
            assert_eq!(
                holder.perform_simplification(&e, &no_tags(), &calc),
                Node::integer(value)
            );
        }
        let e = Node::function("exp", vec![Node::integer(1)]);
        assert!(holder.try_simplification(&e, &no_tags(), &calc).is_none());
    }

    #[test]
    fn test_summary_lists_every_bucket() {
        let summary = StrategyHolder::with_default_strategies().summary();
        for needle in ["function", "type", "tagged", "generic", "cos", "Fraction", EXPAND_TAG] {
            assert!(summary.contains(needle), "missing {} in\n{}", needle, summary);
        }
    }

    //___________________________________FIXPOINT____________________________________

    #[test]
    fn test_simplifier_reaches_fixpoint() {
        let simplifier = Simplifier::with_defaults();
        // sin(0) + x*(x + 1) + cos(0) = x^2 + x + 1
        let e = Node::add(vec![
            Node::function("sin", vec![Node::integer(0)]),
            Node::multiply(vec![x(), Node::add(vec![x(), Node::integer(1)])]),
            Node::function("cos", vec![Node::integer(0)]),
        ]);
        let result = simplifier.simplify(&e);
        assert_eq!(result, Node::from_integer_coefficients(&[1, 1, 1]));
    }

    #[test]
    fn test_expand_tag_distributes_products() {
        // x*(sin(x) + 1)
        let e = Node::multiply(vec![x(), Node::add(vec![sin_x(), Node::integer(1)])]);
        let plain = Simplifier::with_defaults().simplify(&e);
        assert_eq!(plain.to_string(), "x*(sin(x) + 1)");
        let expanded = Simplifier::with_defaults()
            .with_tags([EXPAND_TAG])
            .simplify(&e);
        assert_eq!(expanded.to_string(), "x*sin(x) + x");
    }

    #[test]
    fn test_fraction_tag_combines_sums() {
        let calc = ExprCalculator::default();
        // 1/x + 1/x = 2/x
        let e = Node::add(vec![
            Node::fraction(Node::integer(1), x()),
            Node::fraction(Node::integer(1), x()),
        ]);
        let untouched = Simplifier::with_defaults().simplify(&e);
        assert_eq!(untouched, e);
        let combined = Simplifier::with_defaults()
            .with_tags([FRACTION_TAG])
            .simplify(&e);
        assert_eq!(combined.to_string(), "2/x");
        let at = q(3, 1);
        assert_eq!(
            calc.evaluate(&combined, &at).unwrap(),
            calc.evaluate(&e, &at).unwrap()
        );
    }

    #[test]
    fn test_simplification_preserves_value() {
        let calc = ExprCalculator::default();
        let simplifier = Simplifier::with_defaults().with_tags([EXPAND_TAG, FRACTION_TAG]);
        // (x + 1)*(x - 1) / (x - 1) + 1/(x + 2) - 3
        let e = Node::add(vec![
            Node::fraction(
                Node::multiply(vec![
                    Node::from_integer_coefficients(&[1, 1]),
                    Node::from_integer_coefficients(&[-1, 1]),
                ]),
                Node::from_integer_coefficients(&[-1, 1]),
            ),
            Node::fraction(Node::integer(1), Node::from_integer_coefficients(&[2, 1])),
            Node::integer(-3),
        ]);
        let result = simplifier.simplify(&e);
        assert!(result.size() < e.size());
        for at in [q(2, 1), q(5, 3), q(-7, 2)] {
            assert_eq!(
                calc.evaluate(&result, &at).unwrap(),
                calc.evaluate(&e, &at).unwrap()
            );
        }
    }

    #[test]
    fn test_iteration_cap_returns_last_result() {
        let calc = ExprCalculator::default();
        // x -> x + 1 forever
        let mut holder = StrategyHolder::new();
        holder.add_for_type(
            NodeType::Poly,
            Box::new(FnStrategy::new("grow", |n: &Node, c: &ExprCalculator| {
                let p = n.as_poly()?;
                let polys = c.polynomial_calculator();
                Some(Node::poly(polys.add(p, &polys.one())))
            })),
        );
        let simplifier = Simplifier::new(holder, calc).with_max_iterations(3);
        let result = simplifier.simplify(&x());
        // 3 passes of 3 rewrites each
        assert_eq!(result, Node::from_integer_coefficients(&[9, 1]));
    }
}
