use qsim_core::EventQueue;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_pop_yields_minimum_and_tracks_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut queue = EventQueue::new();
    let mut present: Vec<f64> = Vec::new();

    for step in 0..2_000u32 {
        if present.is_empty() || rng.gen_bool(0.6) {
            let key = rng.gen_range(0.0..100.0);
            queue.insert(key, step);
            present.push(key);
        } else {
            let (key, _) = queue.pop().expect("queue reported entries");
            let min = present.iter().copied().fold(f64::INFINITY, f64::min);
            assert_eq!(key, min, "pop must return the smallest key at step {step}");
            let idx = present.iter().position(|&k| k == key).unwrap();
            present.swap_remove(idx);
        }
        assert_eq!(queue.len(), present.len());
        assert_eq!(queue.is_empty(), present.is_empty());
    }
}

#[test]
fn test_drain_is_non_decreasing() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut queue = EventQueue::new();
    for i in 0..500 {
        // Coarse keys so plenty of ties occur.
        queue.insert(f64::from(rng.gen_range(0..50u32)), i);
    }
    let mut last = f64::NEG_INFINITY;
    let mut drained = 0;
    while let Some((key, _)) = queue.pop() {
        assert!(key >= last, "{key} popped after {last}");
        last = key;
        drained += 1;
    }
    assert_eq!(drained, 500);
    assert!(queue.pop().is_none());
}

#[test]
fn test_peek_matches_next_pop() {
    let mut queue = EventQueue::new();
    assert!(queue.peek().is_none());
    queue.insert(3.0, "c");
    queue.insert(1.0, "a");
    queue.insert(2.0, "b");
    assert_eq!(queue.peek(), Some((&1.0, &"a")));
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.pop(), Some((1.0, "a")));
    assert_eq!(queue.peek(), Some((&2.0, &"b")));
}

#[test]
fn test_equal_children_prefer_left() {
    let mut queue = EventQueue::new();
    queue.insert(0.0, "root");
    queue.insert(1.0, "left");
    queue.insert(1.0, "right");
    queue.insert(2.0, "leaf");

    let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|(_, v)| v)).collect();
    assert_eq!(order, vec!["root", "left", "right", "leaf"]);
}

#[test]
fn test_equal_keys_leave_in_fixed_order() {
    let mut queue = EventQueue::new();
    for label in ["a", "b", "c"] {
        queue.insert(1.0, label);
    }
    let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|(_, v)| v)).collect();
    assert_eq!(order, vec!["a", "c", "b"]);
}

#[test]
fn test_capacity_doubles_on_overflow() {
    let mut queue = EventQueue::new();
    let initial = queue.capacity();
    assert!(initial >= 10);
    for i in 0..=initial {
        queue.insert(i as f64, i);
    }
    assert_eq!(queue.len(), initial + 1);
    assert!(queue.capacity() >= 2 * initial);
}
