use qsim_core::{AssignmentPolicy, LeastLoaded, PolicyKind, RoundRobin};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_round_robin_is_counter_mod_servers() {
    for servers in 1..=7 {
        let mut policy = RoundRobin::new(servers);
        for i in 0..100u64 {
            policy.update((i % servers as u64) as usize, 5);
            assert_eq!(policy.assign(i), (i % servers as u64) as usize);
        }
    }
}

#[test]
fn test_least_loaded_starts_at_first_server() {
    let mut policy = LeastLoaded::new(4);
    assert_eq!(policy.assign(0), 0);
    policy.update(0, 1);
    assert_eq!(policy.assign(1), 1);
    policy.update(1, 1);
    policy.update(2, 1);
    policy.update(3, 1);
    let chosen = policy.assign(2);
    assert_eq!(policy.occupancy(chosen), 1);
    policy.update(2, 0);
    assert_eq!(policy.assign(3), 2);
}

#[test]
fn test_least_loaded_always_returns_minimum() {
    let servers = 6;
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut policy = LeastLoaded::new(servers);
    let mut load = vec![0usize; servers];

    for i in 0..5_000u64 {
        let chosen = policy.assign(i);
        let min = *load.iter().min().unwrap();
        assert_eq!(load[chosen], min, "server {chosen} is not least loaded at call {i}");

        // Mix arrivals to the chosen server with departures anywhere.
        if rng.gen_bool(0.55) {
            load[chosen] += 1;
            policy.update(chosen, load[chosen]);
        } else {
            let server = rng.gen_range(0..servers);
            if load[server] > 0 {
                load[server] -= 1;
                policy.update(server, load[server]);
            }
        }
    }
}

#[test]
fn test_policy_kind_selector_and_names() {
    assert_eq!(PolicyKind::from_selector(0).unwrap(), PolicyKind::RoundRobin);
    assert_eq!(PolicyKind::from_selector(1).unwrap(), PolicyKind::LeastLoaded);
    assert!(PolicyKind::from_selector(2).is_err());
    assert_eq!("least-loaded".parse::<PolicyKind>(), Ok(PolicyKind::LeastLoaded));
    assert_eq!(PolicyKind::RoundRobin.to_string(), "round-robin");
    assert!("fastest".parse::<PolicyKind>().is_err());

    let built = PolicyKind::LeastLoaded.build(3);
    assert_eq!(built.kind(), PolicyKind::LeastLoaded);
}
