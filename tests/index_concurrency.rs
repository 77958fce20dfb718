// ==============================================
// INDEX CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Many threads issuing lookups against shared sequences must see exactly
// what a single-threaded linear scan sees, while the cache stays within
// its population bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use indexkit::cache::IndexCache;
use indexkit::ds::{ContentKeyed, TrackedSeq};

fn oracle(items: &[u32], value: u32) -> Option<usize> {
    items.iter().position(|v| *v == value)
}

fn make_sequences(count: usize, len: usize) -> Vec<TrackedSeq<u32>> {
    (0..count)
        .map(|s| {
            (0..len)
                .map(|i| ((i * 31 + s * 17) % (len / 2 + 1)) as u32)
                .collect()
        })
        .collect()
}

mod oracle_agreement {
    use super::*;

    #[test]
    fn concurrent_lookups_match_linear_scan() {
        let cache: Arc<IndexCache<u32>> = Arc::new(IndexCache::with_limit(32));
        let seqs = Arc::new(make_sequences(16, 64));
        let num_threads = 8;
        let lookups_per_thread = 2_000;
        let mismatches = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let cache = cache.clone();
                let seqs = seqs.clone();
                let mismatches = mismatches.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..lookups_per_thread {
                        let seq = &seqs[(thread_id + i) % seqs.len()];
                        let value = ((i * 7 + thread_id) % 40) as u32;
                        if cache.index_of(seq, &value) != oracle(seq, value) {
                            mismatches.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(mismatches.load(Ordering::Relaxed), 0);
        assert_eq!(cache.len(), 16);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn concurrent_lookups_with_constant_eviction_match_linear_scan() {
        // Far more sequences than the limit, so builds and evictions race
        // with warm lookups on every thread.
        let cache: Arc<IndexCache<u32>> = Arc::new(IndexCache::with_limit(4));
        let seqs = Arc::new(make_sequences(24, 48));
        let num_threads = 8;
        let lookups_per_thread = 1_500;
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let cache = cache.clone();
                let seqs = seqs.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..lookups_per_thread {
                        let seq = &seqs[(i * 5 + thread_id * 3) % seqs.len()];
                        let value = (i % 30) as u32;
                        assert_eq!(
                            cache.index_of(seq, &value),
                            oracle(seq, value),
                            "thread {} lookup {}",
                            thread_id,
                            i
                        );
                        assert!(cache.len() <= cache.limit());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn content_keyed_lookups_from_many_threads() {
        let cache: Arc<IndexCache<u32>> = Arc::new(IndexCache::new());
        let data: Arc<Vec<u32>> = Arc::new((0..256).map(|i| i % 50).collect());
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let cache = cache.clone();
                let data = data.clone();
                thread::spawn(move || {
                    for value in 0..60u32 {
                        let expected = oracle(&data, value);
                        assert_eq!(cache.index_of(&ContentKeyed::new(&data), &value), expected);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}

mod cold_key_race {
    use super::*;

    #[test]
    fn racing_misses_share_one_entry_and_count_every_lookup() {
        let iterations = 200;
        let num_threads = 8;

        for _ in 0..iterations {
            let cache: Arc<IndexCache<u32>> = Arc::new(IndexCache::new());
            let seq = TrackedSeq::from(vec![9u32, 4, 9, 1]);
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads)
                .map(|_| {
                    let cache = cache.clone();
                    let seq = seq.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        cache.index_of(&seq, &9)
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), Some(0));
            }

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.access_count(&seq.key()), Some(num_threads as u64));
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn racing_misses_build_exactly_once() {
        use indexkit::metrics::MetricsSnapshotProvider;

        let num_threads = 8;
        let cache: Arc<IndexCache<u32>> = Arc::new(IndexCache::new());
        let seq = TrackedSeq::from((0..10_000u32).collect::<Vec<_>>());
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = cache.clone();
                let seq = seq.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    assert_eq!(cache.index_of(&seq, &(t as u32)), Some(t));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.builds, 1);
        assert_eq!(snapshot.hits + snapshot.misses, num_threads as u64);
        assert_eq!(snapshot.misses, 1 + snapshot.build_races_lost);
    }
}
