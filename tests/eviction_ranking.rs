// ==============================================
// EVICTION RANKING TESTS (integration)
// ==============================================
//
// The population bound is enforced after each build by dropping the
// least-referenced entry other than the one just built.

use indexkit::cache::{DEFAULT_LIMIT, IndexCache};
use indexkit::ds::TrackedSeq;

fn pair_sequences(count: u32) -> Vec<TrackedSeq<u32>> {
    (0..count).map(|i| TrackedSeq::from(vec![i, i + 1])).collect()
}

#[test]
fn singly_queried_sequence_is_evicted_before_heavy_ones() {
    let cache = IndexCache::new();
    let seqs = pair_sequences(DEFAULT_LIMIT as u32);
    let (heavy, light) = seqs.split_at(DEFAULT_LIMIT - 1);

    for seq in heavy {
        for _ in 0..5 {
            assert_eq!(cache.index_of(seq, &seq[0]), Some(0));
        }
    }
    let light = &light[0];
    assert_eq!(cache.index_of(light, &light[1]), Some(1));
    assert_eq!(cache.len(), DEFAULT_LIMIT);

    let newcomer = TrackedSeq::from(vec![1_000u32]);
    assert_eq!(cache.index_of(&newcomer, &1_000), Some(0));

    assert_eq!(cache.len(), DEFAULT_LIMIT);
    assert!(!cache.contains(&light.key()));
    assert!(cache.contains(&newcomer.key()));
    for seq in heavy {
        assert!(cache.contains(&seq.key()));
        assert_eq!(cache.access_count(&seq.key()), Some(5));
    }
}

#[test]
fn tracked_population_never_exceeds_limit() {
    let limit = 6;
    let cache = IndexCache::with_limit(limit);
    let seqs = pair_sequences(50);

    for _ in 0..3 {
        for seq in &seqs {
            assert_eq!(cache.index_of(seq, &seq[1]), Some(1));
            assert!(cache.len() <= limit, "len {} > limit {}", cache.len(), limit);
        }
    }
    cache.check_invariants().unwrap();
}

#[test]
fn warm_lookups_never_evict() {
    let cache = IndexCache::with_limit(3);
    let seqs = pair_sequences(3);
    for seq in &seqs {
        cache.index_of(seq, &0);
    }
    for _ in 0..100 {
        for seq in &seqs {
            cache.index_of(seq, &seq[1]);
        }
    }
    for seq in &seqs {
        assert!(cache.contains(&seq.key()));
        assert_eq!(cache.access_count(&seq.key()), Some(101));
    }
}

#[test]
fn empty_sequences_do_not_occupy_slots() {
    let cache = IndexCache::with_limit(2);
    let seqs = pair_sequences(2);
    for seq in &seqs {
        cache.index_of(seq, &0);
    }
    for _ in 0..10 {
        let empty: TrackedSeq<u32> = TrackedSeq::from(Vec::new());
        assert_eq!(cache.index_of(&empty, &0), None);
    }
    assert_eq!(cache.len(), 2);
    for seq in &seqs {
        assert!(cache.contains(&seq.key()));
    }
}
