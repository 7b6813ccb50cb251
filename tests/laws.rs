//! Algebraic laws for outcomes, checked over direct and pending payloads alike.

use futures::executor::block_on;
use outcome::Outcome;
use proptest::prelude::*;

type Out = Outcome<i32, String>;

/// A member of either track with either payload mode.
#[derive(Debug, Clone)]
struct Member {
    ok: bool,
    pending: bool,
    value: i32,
}

impl Member {
    fn build(&self) -> Out {
        let value = self.value;
        match (self.ok, self.pending) {
            (true, false) => Out::success(value),
            (true, true) => Out::success_from_future(async move { value }),
            (false, false) => Out::failure(format!("e{value}")),
            (false, true) => Out::failure_from_future(async move { format!("e{value}") }),
        }
    }

    fn settled(&self) -> Result<i32, String> {
        if self.ok {
            Ok(self.value)
        } else {
            Err(format!("e{}", self.value))
        }
    }
}

fn member() -> impl Strategy<Value = Member> {
    (any::<bool>(), any::<bool>(), -1_000i32..1_000).prop_map(|(ok, pending, value)| Member {
        ok,
        pending,
        value,
    })
}

/// A chain step that fails on multiples of three and sometimes waits.
fn step(x: i32) -> Out {
    match x.rem_euclid(3) {
        0 => Out::failure(format!("three {x}")),
        1 => Out::success(x + 1),
        _ => Out::success_from_future(async move { x * 2 }),
    }
}

fn other(x: i32) -> Out {
    if x > 0 {
        Out::from_future(async move { Out::success(x - 1) })
    } else {
        Out::failure("negative".into())
    }
}

fn settle(out: Out) -> Result<i32, String> {
    block_on(out.into_result())
}

proptest! {
    #[test]
    fn prop_left_identity(a in -1_000i32..1_000) {
        prop_assert_eq!(settle(Out::success(a).flat_map(step)), settle(step(a)));
    }

    #[test]
    fn prop_right_identity(m in member()) {
        prop_assert_eq!(settle(m.build().flat_map(Out::success)), m.settled());
    }

    #[test]
    fn prop_associativity(m in member()) {
        let left = m.build().flat_map(step).flat_map(other);
        let right = m.build().flat_map(|x| step(x).flat_map(other));
        prop_assert_eq!(settle(left), settle(right));
    }

    #[test]
    fn prop_map_identity(m in member()) {
        prop_assert_eq!(settle(m.build().map(|x| x)), m.settled());
    }

    #[test]
    fn prop_map_composition(m in member()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x - 7;
        let chained = m.build().map(f).map(g);
        let composed = m.build().map(move |x| g(f(x)));
        prop_assert_eq!(settle(chained), settle(composed));
    }

    #[test]
    fn prop_sync_map_keeps_mode(m in member()) {
        let out = m.build().map(|x| x + 1).map_err(|e| e.len());
        prop_assert_eq!(out.is_pending(), m.pending);
        prop_assert_eq!(out.is_success(), m.ok);
    }

    #[test]
    fn prop_resolve_is_idempotent(m in member()) {
        let once = block_on(m.build().flat_map(step).resolve());
        let twice = block_on(once.clone().resolve());
        prop_assert!(!once.is_pending());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_all_collects_in_order(members in prop::collection::vec(member(), 0..8)) {
        let expected: Result<Vec<i32>, Vec<String>> = {
            let errors: Vec<String> = members
                .iter()
                .filter_map(|m| m.settled().err())
                .collect();
            if errors.is_empty() {
                Ok(members.iter().map(|m| m.value).collect())
            } else {
                Err(errors)
            }
        };
        let out = outcome::all(members.iter().map(Member::build));
        prop_assert_eq!(out.is_failure(), expected.is_err());
        prop_assert_eq!(block_on(out.into_result()), expected);
    }

    #[test]
    fn prop_any_succeeds_iff_some_member_does(members in prop::collection::vec(member(), 0..8)) {
        let out = block_on(outcome::any(members.iter().map(Member::build)).into_result());
        match out {
            Ok(v) => prop_assert!(members.iter().any(|m| m.ok && m.value == v)),
            Err(errors) => {
                prop_assert!(members.iter().all(|m| !m.ok));
                prop_assert_eq!(errors.len(), members.len());
            }
        }
    }
}
