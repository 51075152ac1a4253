use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{HashMap, HashSet};

/// Check the table layout directly from region bytes.
///
/// Every stored key must appear once and be reachable from its home slot
/// through occupied slots only, within the attempt limit.
fn validate_table<R: Region>(t: &IntIntMap<R>) -> usize {
    let mut keys = HashSet::new();

    for slot in 0..t.capacity() {
        let Some((key, _)) = t.read_slot(slot).expect("slot must decode") else {
            continue;
        };
        assert!(keys.insert(key), "key {key} stored twice");

        let mut cursor = t.home_slot(key);
        let mut steps = 1;
        while cursor != slot {
            assert!(
                t.read_slot(cursor).unwrap().is_some(),
                "gap at slot {cursor} before key {key}"
            );
            cursor = index::next_slot(cursor, t.capacity());
            steps += 1;
        }
        assert!(
            steps <= t.attempt_limit(),
            "key {key} is {steps} probes from home, limit {}",
            t.attempt_limit()
        );
    }

    keys.len()
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Put {
        #[proptest(strategy = "-48i64..48")]
        key: i64,
        value: i64,
    },
    Get {
        #[proptest(strategy = "-48i64..48")]
        key: i64,
    },
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=400)
}

fn table(slots: usize, config: Config) -> IntIntMap<Vec<u8>> {
    let size = (slots + 1) * RECORD_WIDTH;
    IntIntMap::with_config(vec![0u8; size], size, config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_codec_roundtrip(value in any::<i64>()) {
        let field = codec::encode(value);
        prop_assert!(field.iter().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        prop_assert_eq!(codec::decode(&field), Ok(value));
    }

    #[test]
    fn prop_record_roundtrip(key in any::<i64>(), value in any::<i64>()) {
        let record = codec::encode_record(key, value);
        prop_assert_eq!(codec::decode_record(&record), Ok(Some((key, value))));
    }

    #[test]
    fn prop_home_slot_in_range(key in any::<i64>(), slot_count in 1usize..100_000) {
        let slot = index::home_slot(key, slot_count);
        prop_assert!(slot < slot_count);
        prop_assert_eq!(slot, index::home_slot(key, slot_count));
    }

    /// Bounded probing: inserts may be refused, but nothing accepted is lost
    /// and refused inserts leave no trace.
    #[test]
    fn prop_equivalence_bounded(ops in ops_strategy(), slots in 4usize..40) {
        let mut t = table(slots, Config::default());
        let mut m: HashMap<i64, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Put { key, value } => match t.put(key, value) {
                    Ok(old_t) => {
                        let old_m = m.insert(key, value);
                        prop_assert_eq!(old_t, old_m);
                    }
                    Err(Error::ProbeExhausted { key: k, attempts }) => {
                        prop_assert_eq!(k, key);
                        prop_assert_eq!(attempts, t.attempt_limit());
                        prop_assert!(!m.contains_key(&key));
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {e}"),
                },
                Op::Get { key } => {
                    prop_assert_eq!(t.get(key).unwrap(), m.get(&key).copied());
                }
            }
        }

        prop_assert_eq!(validate_table(&t), m.len());
        for (&key, &value) in &m {
            prop_assert_eq!(t.get(key).unwrap(), Some(value));
        }
    }

    /// Full-scan probing refuses an insert only when every slot is taken.
    #[test]
    fn prop_equivalence_full_scan(ops in ops_strategy(), slots in 1usize..64) {
        let mut t = table(slots, Config::full_scan());
        let mut m: HashMap<i64, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Put { key, value } => match t.put(key, value) {
                    Ok(old_t) => {
                        let old_m = m.insert(key, value);
                        prop_assert_eq!(old_t, old_m);
                    }
                    Err(Error::ProbeExhausted { .. }) => {
                        prop_assert!(!m.contains_key(&key));
                        prop_assert_eq!(m.len(), t.capacity());
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {e}"),
                },
                Op::Get { key } => {
                    prop_assert_eq!(t.get(key).unwrap(), m.get(&key).copied());
                }
            }
        }

        prop_assert_eq!(validate_table(&t), m.len());
    }
}

#[test]
fn reattach_preserves_entries() {
    let mut t = table(32, Config::default());
    let mut m: HashMap<i64, i64> = HashMap::new();
    for key in -20..20 {
        if t.put(key, key * 3).is_ok() {
            m.insert(key, key * 3);
        }
    }

    let t = IntIntMap::attach(t.into_inner()).unwrap();
    assert_eq!(validate_table(&t), m.len());
    for key in -20..20 {
        assert_eq!(t.get(key).unwrap(), m.get(&key).copied());
    }
}
