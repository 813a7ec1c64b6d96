//! Property tests for mutation replay and query composition.

use mockwell_db::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    AddRange(Vec<u8>),
    Remove(u8),
    RemoveRange(Vec<u8>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(|v| Op::Add(v % 8)),
        prop::collection::vec(0u8..8, 0..5).prop_map(Op::AddRange),
        any::<u8>().prop_map(|v| Op::Remove(v % 8)),
        prop::collection::vec(0u8..8, 0..5).prop_map(Op::RemoveRange),
    ]
}

fn remove_first(model: &mut Vec<u8>, value: u8) {
    if let Some(pos) = model.iter().position(|v| *v == value) {
        model.remove(pos);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    #[test]
    fn test_mutations_replay_like_a_vec(
        seed in prop::collection::vec(0u8..8, 0..10),
        ops in prop::collection::vec(op(), 0..30),
    ) {
        let data = Backing::from(seed.clone());
        let set = MockSet::new(data.clone());
        let mut model = seed;

        for op in ops {
            match op {
                Op::Add(v) => {
                    set.add(v);
                    model.push(v);
                }
                Op::AddRange(vs) => {
                    set.add_range(vs.clone());
                    model.extend(vs);
                }
                Op::Remove(v) => {
                    set.remove(&v).unwrap();
                    remove_first(&mut model, v);
                }
                Op::RemoveRange(vs) => {
                    set.remove_range(&vs).unwrap();
                    for v in vs {
                        remove_first(&mut model, v);
                    }
                }
            }
        }

        prop_assert_eq!(data.snapshot(), model);
    }

    #[test]
    fn test_independent_filter_and_order_commute(
        rows in prop::collection::vec((0i32..20, 0i32..20), 0..40),
        threshold in 0i32..20,
    ) {
        let set = MockSet::new(Backing::from(rows));

        let filter_first = set.filter(move |r| r.0 >= threshold).order_by(|r| r.1).to_vec();
        let order_first = set.order_by(|r| r.1).filter(move |r| r.0 >= threshold).to_vec();

        prop_assert_eq!(filter_first, order_first);
    }

    #[test]
    fn test_ordering_is_stable(rows in prop::collection::vec((0i32..4, any::<u16>()), 0..40)) {
        let set = MockSet::new(Backing::from(rows.clone()));
        let sorted = set.order_by(|r| r.0).to_vec();

        let mut expected = rows;
        expected.sort_by_key(|r| r.0);
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn test_clear_then_add_keeps_new_rows(
        seed in prop::collection::vec(any::<u8>(), 0..20),
        after in prop::collection::vec(any::<u8>(), 0..20),
    ) {
        let data = Backing::from(seed.clone());
        let set = MockSet::new(data.clone());

        prop_assert_eq!(set.clear(), seed.len());
        set.add_range(after.clone());
        prop_assert_eq!(data.snapshot(), after);
    }
}
