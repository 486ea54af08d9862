//! Algebraic laws of the outcome shapes
//!
//! - Functor: mapping the identity changes nothing; mapping a composition equals composing maps.
//! - Monad: wrapping is a left and right identity of `and_then`; `and_then` is associative.
//! - `invert` is an involution.
//! - `combine` is affirmed iff no element failed.

use proptest::prelude::*;
use upshot::{Fallible, Outcome, Verdict, combine};

type F = Fallible<i32, u8>;

fn arb_fallible() -> impl Strategy<Value = F> {
    prop_oneof![
        any::<i32>().prop_map(Fallible::Succeeded),
        any::<u8>().prop_map(Fallible::Failed),
    ]
}

fn arb_outcome() -> impl Strategy<Value = Outcome<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::Succeeded),
        Just(Outcome::Denied),
    ]
}

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    any::<bool>().prop_map(Verdict::from_bool)
}

fn halve(x: i32) -> F {
    if x % 2 == 0 {
        Fallible::Succeeded(x / 2)
    } else {
        Fallible::Failed(1)
    }
}

fn positive(x: i32) -> F {
    if x > 0 {
        Fallible::Succeeded(x)
    } else {
        Fallible::Failed(2)
    }
}

proptest! {
    #[test]
    fn prop_fallible_map_identity(m in arb_fallible()) {
        prop_assert_eq!(m.map(|x| x), m);
    }

    #[test]
    fn prop_fallible_map_composition(m in arb_fallible()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);
        prop_assert_eq!(m.map(f).map(g), m.map(|x| g(f(x))));
    }

    #[test]
    fn prop_fallible_left_identity(x in any::<i32>()) {
        prop_assert_eq!(F::Succeeded(x).and_then(halve), halve(x));
    }

    #[test]
    fn prop_fallible_right_identity(m in arb_fallible()) {
        prop_assert_eq!(m.and_then(F::Succeeded), m);
    }

    #[test]
    fn prop_fallible_associativity(m in arb_fallible()) {
        prop_assert_eq!(
            m.and_then(halve).and_then(positive),
            m.and_then(|x| halve(x).and_then(positive))
        );
    }

    #[test]
    fn prop_fallible_invert_involution(m in arb_fallible()) {
        prop_assert_eq!(m.invert().invert(), m);
    }

    #[test]
    fn prop_outcome_functor_and_monad(m in arb_outcome(), x in any::<i32>()) {
        let f = |v: i32| if v % 3 == 0 { Outcome::Denied } else { Outcome::Succeeded(v) };
        let g = |v: i32| Outcome::Succeeded(v.wrapping_add(1));

        prop_assert_eq!(m.map(|v| v), m);
        prop_assert_eq!(Outcome::Succeeded(x).and_then(f), f(x));
        prop_assert_eq!(m.and_then(Outcome::Succeeded), m);
        prop_assert_eq!(m.and_then(f).and_then(g), m.and_then(|v| f(v).and_then(g)));
    }

    #[test]
    fn prop_verdict_invert_involution(v in arb_verdict()) {
        prop_assert_eq!(v.invert().invert(), v);
        prop_assert_eq!(!v, v.invert());
    }

    #[test]
    fn prop_verdict_xor_is_inequality(a in arb_verdict(), b in arb_verdict()) {
        prop_assert_eq!(a.xor(b).is_affirmed(), a != b);
        prop_assert_eq!(a ^ b, a.xor(b));
    }

    #[test]
    fn prop_combine_affirmed_iff_no_failure(items in prop::collection::vec(arb_fallible(), 0..16)) {
        let expected = Verdict::from_bool(items.iter().all(Fallible::is_succeeded));
        prop_assert_eq!(combine(items), expected);
    }
}
