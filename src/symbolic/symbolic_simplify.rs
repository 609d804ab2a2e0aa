//! # Strategy-based simplification of expression trees
//!
//! A simplification rule is a [`SimStrategy`]: it looks at one node and either declines
//! (`None`) or returns a rewrite (`Some`). Returning `Some(node.clone())` is a legal no-op
//! rewrite; it still counts as a match and stops the search for further rules.
//!
//! ## Dispatch
//!
//! [`StrategyHolder::perform_simplification`] tries its buckets in a fixed priority order and
//! returns the first rewrite:
//!
//! 1. rules registered for the function name of a `Function` node (`exp`, `sin`, ...);
//! 2. rules registered for the node's [`NodeType`];
//! 3. tag-gated rules, only when the caller's tags intersect the rule's tags;
//! 4. fully generic rules.
//!
//! Within a bucket rules run in registration order. Dispatch is a single step on a single node.
//!
//! ## Fixpoint
//!
//! [`Simplifier`] drives the holder over a whole tree: children first, each node rewritten
//! until no rule matches or the result stops changing, and whole-tree passes repeated until a
//! pass changes nothing or `max_iterations` passes have run.
//!
//! ## Default rules
//!
//! [`StrategyHolder::with_default_strategies`] registers
//! - `Add`: flatten nested sums and add up polynomial terms;
//! - `Multiply`: flatten nested products and multiply polynomial factors;
//! - `Fraction`: cancel the polynomial gcd and make the denominator monic;
//! - `exp(0) = 1`, `ln(1) = 0`, `sin(0) = 0`, `cos(0) = 1`;
//! - tag `expand`: distribute a product over its first sum factor;
//! - tag `fraction`: bring a sum containing fractions over a common denominator;
//! - generic: unwrap sums and products with fewer than two operands.
use crate::algebra::calculator::RingCalculator;
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::polynomial::Polynomial;
use crate::symbolic::symbolic_engine::{ExprCalculator, Node, NodeType};
use log::{debug, warn};
use num::rational::Rational64;
use num_traits::{One, Zero};
use std::collections::{BTreeSet, HashMap};
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style};

pub const EXPAND_TAG: &str = "expand";
pub const FRACTION_TAG: &str = "fraction";

/// A single rewrite rule.
pub trait SimStrategy {
    fn name(&self) -> &str;
    /// `None` means "does not apply", letting the next rule try.
    fn simplify(&self, node: &Node, calc: &ExprCalculator) -> Option<Node>;
}

/// A rule built from a closure or function.
pub struct FnStrategy<F> {
    name: String,
    func: F,
}

impl<F> FnStrategy<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Node, &ExprCalculator) -> Option<Node>,
    {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> SimStrategy for FnStrategy<F>
where
    F: Fn(&Node, &ExprCalculator) -> Option<Node>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn simplify(&self, node: &Node, calc: &ExprCalculator) -> Option<Node> {
        (self.func)(node, calc)
    }
}

struct TaggedStrategy {
    tags: BTreeSet<String>,
    strategy: Box<dyn SimStrategy>,
}

/// Registry of rewrite rules with prioritized dispatch.
#[derive(Default)]
pub struct StrategyHolder {
    by_name: HashMap<String, Vec<Box<dyn SimStrategy>>>,
    by_type: HashMap<NodeType, Vec<Box<dyn SimStrategy>>>,
    tagged: Vec<TaggedStrategy>,
    generic: Vec<Box<dyn SimStrategy>>,
}

impl StrategyHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for `Function` nodes named `function_name`.
    pub fn add_named(&mut self, function_name: &str, strategy: Box<dyn SimStrategy>) {
        self.by_name
            .entry(function_name.to_string())
            .or_default()
            .push(strategy);
    }

    pub fn add_for_type(&mut self, node_type: NodeType, strategy: Box<dyn SimStrategy>) {
        self.by_type.entry(node_type).or_default().push(strategy);
    }

    /// Rule that runs only when one of `tags` is enabled.
    pub fn add_tagged(&mut self, tags: &[&str], strategy: Box<dyn SimStrategy>) {
        self.tagged.push(TaggedStrategy {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            strategy,
        });
    }

    pub fn add_generic(&mut self, strategy: Box<dyn SimStrategy>) {
        self.generic.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum::<usize>()
            + self.by_type.values().map(Vec::len).sum::<usize>()
            + self.tagged.len()
            + self.generic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First matching rewrite of `node` together with the name of the rule that produced it.
    pub fn try_simplification(
        &self,
        node: &Node,
        tags: &BTreeSet<String>,
        calc: &ExprCalculator,
    ) -> Option<(Node, &str)> {
        let named = node
            .function_name()
            .and_then(|name| self.by_name.get(name))
            .into_iter()
            .flatten();
        let typed = self.by_type.get(&node.node_type()).into_iter().flatten();
        let tagged = self
            .tagged
            .iter()
            .filter(|t| !t.tags.is_disjoint(tags))
            .map(|t| &t.strategy);
        let candidates = named.chain(typed).chain(tagged).chain(self.generic.iter());
        for strategy in candidates {
            if let Some(result) = strategy.simplify(node, calc) {
                return Some((result, strategy.name()));
            }
        }
        None
    }

    /// The first matching rewrite of `node`, or a copy of `node` when nothing applies.
    pub fn perform_simplification(
        &self,
        node: &Node,
        tags: &BTreeSet<String>,
        calc: &ExprCalculator,
    ) -> Node {
        match self.try_simplification(node, tags, calc) {
            Some((result, _)) => result,
            None => node.clone(),
        }
    }

    /// Table of registered rules per bucket.
    pub fn summary(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["bucket", "key", "rules"]);
        let mut names: Vec<&String> = self.by_name.keys().collect();
        names.sort();
        for name in names {
            let rules = rule_names(self.by_name[name].iter());
            builder.push_record(vec!["function".to_string(), name.clone(), rules]);
        }
        for node_type in NodeType::iter() {
            if let Some(rules) = self.by_type.get(&node_type) {
                let rules = rule_names(rules.iter());
                builder.push_record(vec!["type".to_string(), node_type.to_string(), rules]);
            }
        }
        for t in &self.tagged {
            let tags = t.tags.iter().cloned().collect::<Vec<_>>().join(",");
            builder.push_record(vec!["tagged".to_string(), tags, t.strategy.name().to_string()]);
        }
        if !self.generic.is_empty() {
            let rules = rule_names(self.generic.iter());
            builder.push_record(vec!["generic".to_string(), "*".to_string(), rules]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// Holder preloaded with the standard rules listed in the module docs.
    pub fn with_default_strategies() -> Self {
        let mut holder = Self::new();
        holder.add_for_type(
            NodeType::Add,
            Box::new(FnStrategy::new("merge sum terms", merge_sum_terms)),
        );
        holder.add_for_type(
            NodeType::Multiply,
            Box::new(FnStrategy::new("merge product factors", merge_product_factors)),
        );
        holder.add_for_type(
            NodeType::Fraction,
            Box::new(FnStrategy::new("cancel fraction", cancel_fraction)),
        );
        let trivial_values: [(&str, i64, i64); 4] =
            [("exp", 0, 1), ("ln", 1, 0), ("sin", 0, 0), ("cos", 0, 1)];
        for (name, at, value) in trivial_values {
            holder.add_named(
                name,
                Box::new(FnStrategy::new(
                    format!("{}({}) = {}", name, at, value),
                    move |node: &Node, calc: &ExprCalculator| {
                        function_at_constant(node, calc, at, value)
                    },
                )),
            );
        }
        holder.add_tagged(
            &[EXPAND_TAG],
            Box::new(FnStrategy::new("distribute product", distribute_product)),
        );
        holder.add_tagged(
            &[FRACTION_TAG],
            Box::new(FnStrategy::new("common denominator", common_denominator)),
        );
        holder.add_generic(Box::new(FnStrategy::new(
            "unwrap short operand list",
            unwrap_short_operands,
        )));
        holder
    }
}

fn rule_names<'a>(rules: impl Iterator<Item = &'a Box<dyn SimStrategy>>) -> String {
    rules.map(|r| r.name().to_string()).collect::<Vec<_>>().join(", ")
}

fn changed(original: &Node, result: Node) -> Option<Node> {
    if &result == original { None } else { Some(result) }
}

fn is_constant(node: &Node, calc: &ExprCalculator, value: i64) -> bool {
    match node {
        Node::Poly(p) => calc
            .polynomial_calculator()
            .as_constant(p)
            .is_some_and(|c| c == Rational64::from_integer(value)),
        _ => false,
    }
}

fn merge_sum_terms(node: &Node, calc: &ExprCalculator) -> Option<Node> {
    let Node::Add(children) = node else {
        return None;
    };
    let polys = calc.polynomial_calculator();
    let mut sum: Polynomial<Rational64> = polys.zero();
    let mut others = Vec::new();
    let mut stack: Vec<&Node> = children.iter().rev().collect();
    while let Some(child) = stack.pop() {
        match child {
            Node::Add(inner) => stack.extend(inner.iter().rev()),
            Node::Poly(p) => sum = polys.add(&sum, p),
            _ => others.push(child.clone()),
        }
    }
    if !sum.is_zero_polynomial() || others.is_empty() {
        others.push(Node::Poly(sum));
    }
    let result = match others.len() {
        1 => others.remove(0),
        _ => Node::Add(others),
    };
    changed(node, result)
}

fn merge_product_factors(node: &Node, calc: &ExprCalculator) -> Option<Node> {
    let Node::Multiply(children) = node else {
        return None;
    };
    let polys = calc.polynomial_calculator();
    let mut product: Polynomial<Rational64> = polys.one();
    let mut others = Vec::new();
    let mut stack: Vec<&Node> = children.iter().rev().collect();
    while let Some(child) = stack.pop() {
        match child {
            Node::Multiply(inner) => stack.extend(inner.iter().rev()),
            Node::Poly(p) => product = polys.multiply(&product, p),
            _ => others.push(child.clone()),
        }
    }
    if product.is_zero_polynomial() {
        return changed(node, Node::Poly(product));
    }
    let mut factors = Vec::with_capacity(others.len() + 1);
    if !polys.is_equal(&product, &polys.one()) || others.is_empty() {
        factors.push(Node::Poly(product));
    }
    factors.extend(others);
    let result = match factors.len() {
        1 => factors.remove(0),
        _ => Node::Multiply(factors),
    };
    changed(node, result)
}

fn cancel_fraction(node: &Node, calc: &ExprCalculator) -> Option<Node> {
    let Node::Fraction(num, den) = node else {
        return None;
    };
    if is_constant(den, calc, 1) {
        return Some(num.as_ref().clone());
    }
    let (Node::Poly(p), Node::Poly(q)) = (num.as_ref(), den.as_ref()) else {
        // 0 / anything nonzero
        if let Node::Poly(p) = num.as_ref() {
            if p.is_zero_polynomial() {
                return Some(Node::Poly(p.clone()));
            }
        }
        return None;
    };
    if q.is_zero_polynomial() {
        return None;
    }
    let polys = calc.polynomial_calculator();
    let g = polys.gcd(p, q).ok()?;
    let (mut p, mut q) = (p.clone(), q.clone());
    if g.degree().is_some_and(|d| d > 0) {
        p = polys.div_rem(&p, &g).ok()?.0;
        q = polys.div_rem(&q, &g).ok()?.0;
    }
    let lead = q.leading_coefficient().cloned()?;
    if !lead.is_one() {
        let inv = lead.recip();
        p = polys.scale(&p, &inv);
        q = polys.scale(&q, &inv);
    }
    let result = if polys.is_equal(&q, &polys.one()) {
        Node::Poly(p)
    } else {
        Node::fraction(Node::Poly(p), Node::Poly(q))
    };
    changed(node, result)
}

fn function_at_constant(node: &Node, calc: &ExprCalculator, at: i64, value: i64) -> Option<Node> {
    match node {
        Node::Function { args, .. } if args.len() == 1 && is_constant(&args[0], calc, at) => {
            Some(Node::integer(value))
        }
        _ => None,
    }
}

fn distribute_product(node: &Node, _calc: &ExprCalculator) -> Option<Node> {
    let Node::Multiply(factors) = node else {
        return None;
    };
    let k = factors.iter().position(|f| matches!(f, Node::Add(_)))?;
    let Node::Add(terms) = &factors[k] else {
        return None;
    };
    let expanded = terms
        .iter()
        .map(|term| {
            let mut product = factors.clone();
            product[k] = term.clone();
            Node::Multiply(product)
        })
        .collect();
    Some(Node::Add(expanded))
}

/// `a/b + c/d + e -> (a*d + c*b + e*b*d) / (b*d)`
fn common_denominator(node: &Node, _calc: &ExprCalculator) -> Option<Node> {
    let Node::Add(terms) = node else {
        return None;
    };
    if !terms.iter().any(|t| matches!(t, Node::Fraction(_, _))) {
        return None;
    }
    let split = |t: &Node| -> (Node, Option<Node>) {
        match t {
            Node::Fraction(n, d) => (n.as_ref().clone(), Some(d.as_ref().clone())),
            _ => (t.clone(), None),
        }
    };
    let times = |a: Node, b: Option<&Node>| -> Node {
        match b {
            Some(b) => Node::Multiply(vec![a, b.clone()]),
            None => a,
        }
    };
    let (mut num, mut den) = split(&terms[0]);
    for term in &terms[1..] {
        let (n, d) = split(term);
        num = Node::Add(vec![times(num, d.as_ref()), times(n, den.as_ref())]);
        den = match (den, d) {
            (Some(a), Some(b)) => Some(Node::Multiply(vec![a, b])),
            (a, b) => a.or(b),
        };
    }
    den.map(|den| Node::fraction(num, den))
}

fn unwrap_short_operands(node: &Node, _calc: &ExprCalculator) -> Option<Node> {
    match node {
        Node::Add(children) | Node::Multiply(children) if children.len() == 1 => {
            Some(children[0].clone())
        }
        Node::Add(children) if children.is_empty() => {
            Some(Node::constant(Rational64::zero()))
        }
        Node::Multiply(children) if children.is_empty() => {
            Some(Node::constant(Rational64::one()))
        }
        _ => None,
    }
}

pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// Repeats strategy dispatch over a whole tree until nothing changes.
pub struct Simplifier {
    holder: StrategyHolder,
    calc: ExprCalculator,
    tags: BTreeSet<String>,
    max_iterations: usize,
}

impl Simplifier {
    pub fn new(holder: StrategyHolder, calc: ExprCalculator) -> Self {
        Self {
            holder,
            calc,
            tags: BTreeSet::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Default rules over the variable `x`, no tags.
    pub fn with_defaults() -> Self {
        Self::new(
            StrategyHolder::with_default_strategies(),
            ExprCalculator::default(),
        )
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn holder(&self) -> &StrategyHolder {
        &self.holder
    }

    pub fn calculator(&self) -> &ExprCalculator {
        &self.calc
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn simplify(&self, node: &Node) -> Node {
        let mut current = node.clone();
        for pass in 1..=self.max_iterations {
            let next = self.pass(&current);
            if self.calc.is_node_equal(&next, &current) {
                debug!("simplified to {} after {} passes", self.calc.render(&next), pass);
                return next;
            }
            current = next;
        }
        warn!(
            "simplification of {} stopped after {} passes without reaching a fixpoint",
            self.calc.render(node),
            self.max_iterations
        );
        current
    }

    /// One bottom-up pass: children first, then the node until no rule applies.
    fn pass(&self, node: &Node) -> Node {
        let mut current = node.map_children(|c| self.pass(c));
        for _ in 0..self.max_iterations {
            match self
                .holder
                .try_simplification(&current, &self.tags, &self.calc)
            {
                Some((next, rule)) => {
                    if self.calc.is_node_equal(&next, &current) {
                        break;
                    }
                    debug!(
                        "{}: {} -> {}",
                        rule,
                        self.calc.render(&current),
                        self.calc.render(&next)
                    );
                    current = next;
                }
                None => break,
            }
        }
        current
    }
}
