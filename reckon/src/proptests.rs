//! Property-based tests for construction and simplification.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Node, Num, Number, Operator};

    /// Plain description of a tree; built into a `Num` inside each test
    #[derive(Debug, Clone)]
    enum Shape {
        Literal(i64),
        Decimal(i64, u8),
        Constant(i64),
        Sum(Vec<Shape>),
        Product(Vec<Shape>),
        Sub(Box<Shape>, Box<Shape>),
        Div(Box<Shape>, Box<Shape>),
        Floor(Box<Shape>),
        Pow(Box<Shape>, u32),
        Output(Box<Shape>),
    }

    // Small values, biased toward the identities the rules look for
    fn small_int() -> impl Strategy<Value = i64> {
        prop_oneof![Just(0i64), Just(1i64), Just(-1i64), -50i64..50i64]
    }

    fn leaf() -> impl Strategy<Value = Shape> {
        prop_oneof![
            small_int().prop_map(Shape::Literal),
            (small_int(), 1u8..4u8).prop_map(|(m, s)| Shape::Decimal(m, s)),
            small_int().prop_map(Shape::Constant),
        ]
    }

    fn shape() -> impl Strategy<Value = Shape> {
        leaf().prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Sum),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Product),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Sub(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Div(Box::new(a), Box::new(b))),
                inner.clone().prop_map(|a| Shape::Floor(Box::new(a))),
                (inner.clone(), 0u32..3u32).prop_map(|(a, e)| Shape::Pow(Box::new(a), e)),
                inner.prop_map(|a| Shape::Output(Box::new(a))),
            ]
        })
    }

    fn build(shape: &Shape) -> Num {
        match shape {
            Shape::Literal(v) => Num::literal(*v),
            Shape::Decimal(m, s) => {
                let value = Number::from_str(&format!("{}e-{}", m, s)).unwrap();
                Num::literal(value)
            }
            Shape::Constant(v) => Num::named_constant(format!("c{}", v), *v),
            Shape::Sum(terms) => Num::sum(terms.iter().map(build)),
            Shape::Product(factors) => Num::product(factors.iter().map(build)),
            Shape::Sub(a, b) => build(a).sub(build(b)),
            Shape::Div(a, b) => {
                let a = build(a);
                a.div(build(b)).unwrap_or(a)
            }
            Shape::Floor(a) => build(a).floor(),
            Shape::Pow(a, e) => {
                let a = build(a);
                a.pow(Num::literal(*e as i64)).unwrap_or(a)
            }
            Shape::Output(a) => Num::named_output("out", build(a)),
        }
    }

    /// No Add under an Add and no Mul under a Mul, except through a named output
    fn is_flat(num: &Num) -> bool {
        match num.node() {
            Node::Derived { op, operands, .. } => operands.iter().all(|operand| {
                let nested = op.is_associative() && operand.op() == Some(*op);
                !nested && is_flat(operand)
            }),
            Node::NamedOutput { inner, .. } => is_flat(inner),
            Node::Literal(_) | Node::NamedConstant { .. } => true,
        }
    }

    proptest! {
        #[test]
        fn simplify_preserves_value(s in shape()) {
            let n = build(&s);
            let simplified = n.simplify();
            prop_assert_eq!(simplified.value(), n.value());
        }

        #[test]
        fn simplify_is_idempotent(s in shape()) {
            let once = build(&s).simplify();
            let twice = once.simplify();
            prop_assert_eq!(twice.render(true), once.render(true));
            prop_assert_eq!(twice.render(false), once.render(false));
        }

        #[test]
        fn constructed_trees_are_flat(s in shape()) {
            let n = build(&s);
            prop_assert!(is_flat(&n));
            prop_assert!(is_flat(&n.simplify()));
        }

        #[test]
        fn rendering_never_panics(s in shape()) {
            let n = build(&s);
            let _ = n.render(true);
            let _ = n.render(false);
            let _ = n.simplify().render(true);
        }

        #[test]
        fn literal_keeps_its_value(m in -100_000i64..100_000i64, s in 0u8..6u8) {
            let value = Number::from_str(&format!("{}e-{}", m, s)).unwrap();
            let literal = Num::literal(value.clone());
            prop_assert_eq!(literal.value(), &value);
        }

        #[test]
        fn sum_of_literals_is_flat(values in prop::collection::vec(small_int(), 2..8)) {
            let n = Num::sum(values.iter().copied());
            prop_assert_eq!(n.op(), Some(Operator::Add));
            prop_assert_eq!(n.operands().len(), values.len());
        }
    }
}
