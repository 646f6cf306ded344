//! Property tests for the lookup, synchronization and scroll invariants

use proptest::collection::vec;
use proptest::prelude::*;

use recsync::config::SyncConfig;
use recsync::{
    compute_scroll, ActiveIndexResolver, ClockSynchronizer, GapPolicy, PlayerEvent, PlayerHandle,
    ScrollAnchor, ScrollEdge, SimulatedPlayer, Slot, Span, TimeIndex, VisibilityWindowResolver,
};

/// Sorted spans: gaps between starts (ties allowed), optional lengths.
fn sorted_spans() -> impl Strategy<Value = Vec<Span>> {
    vec((0u32..40, prop::option::of(0u32..80)), 0..60).prop_map(|steps| {
        let mut start = 0.0;
        steps
            .into_iter()
            .map(|(gap, len)| {
                start += f64::from(gap) / 8.0;
                Span {
                    start,
                    end: len.map(|l| start + f64::from(l) / 8.0),
                }
            })
            .collect()
    })
}

/// Query times as a walk: mostly small forward steps, some backward jumps.
fn time_walk() -> impl Strategy<Value = Vec<f64>> {
    vec(-60.0f64..4.0, 1..120).prop_map(|deltas| {
        let mut t = -1.0;
        deltas
            .into_iter()
            .map(|d| {
                t += d;
                t
            })
            .collect()
    })
}

fn policy() -> impl Strategy<Value = GapPolicy> {
    prop_oneof![Just(GapPolicy::Hold), Just(GapPolicy::Gaps)]
}

proptest! {
    #[test]
    fn resolver_matches_binary_search(
        spans in sorted_spans(),
        times in time_walk(),
        policy in policy(),
    ) {
        let index = TimeIndex::build("prop", spans, policy).unwrap();
        let mut resolver = ActiveIndexResolver::new(3.0);
        resolver.insert(0u8, index.clone());

        for t in times {
            prop_assert_eq!(resolver.resolve(0, t), index.lookup(t), "t = {}", t);
        }
    }

    #[test]
    fn resolve_is_idempotent(spans in sorted_spans(), times in time_walk()) {
        let index = TimeIndex::build("prop", spans, GapPolicy::Gaps).unwrap();
        let mut resolver = ActiveIndexResolver::new(2.0);
        resolver.insert(0u8, index);

        for t in times {
            let first = resolver.resolve(0, t);
            prop_assert_eq!(resolver.resolve(0, t), first);
        }
    }

    #[test]
    fn hold_indices_never_decrease_while_time_moves_forward(
        spans in sorted_spans(),
        mut times in vec(0.0f64..300.0, 1..100),
    ) {
        times.sort_by(f64::total_cmp);
        let index = TimeIndex::build("prop", spans, GapPolicy::Hold).unwrap();
        let mut resolver = ActiveIndexResolver::new(2.0);
        resolver.insert(0u8, index);

        let mut previous = None;
        for t in times {
            let current = resolver.resolve(0, t);
            prop_assert!(current >= previous, "{:?} then {:?} at t = {}", previous, current, t);
            previous = current;
        }
    }

    #[test]
    fn visibility_matches_brute_force(spans in sorted_spans(), times in time_walk()) {
        let index = TimeIndex::build("windows", spans.clone(), GapPolicy::Gaps).unwrap();
        let mut windows = VisibilityWindowResolver::new(2.0);
        windows.insert(0u8, index);

        for t in times {
            let expected = spans.iter().any(|s| s.contains(t));
            prop_assert_eq!(windows.is_active(0, t), expected, "t = {}", t);

            let frontmost = spans.iter().rposition(|s| s.contains(t));
            prop_assert_eq!(windows.frontmost(0, t), frontmost, "t = {}", t);
        }
    }

    #[test]
    fn drift_stays_within_tolerance_while_the_secondary_answers(
        master_start in 0.0f64..1000.0,
        offset in 0.6f64..50.0,
        ahead in any::<bool>(),
        skew in 0.9f64..1.1,
        steps in vec(
            (0.01f64..1.0, prop::bool::weighted(0.2), prop::bool::weighted(0.1)),
            1..80,
        ),
    ) {
        let config = SyncConfig::default();
        let tolerance = config.tolerance_seconds;
        let master = SimulatedPlayer::new(master_start);
        let secondary = SimulatedPlayer::new(if ahead {
            master_start + offset
        } else {
            master_start - offset
        });
        secondary.set_skew(skew);

        let mut sync = ClockSynchronizer::new(config);
        sync.register(Slot::Master, master.clone());
        sync.register(Slot::Secondary, secondary.clone());
        prop_assert!((secondary.position() - master.position()).abs() <= tolerance);

        master.play().unwrap();
        sync.handle_event(PlayerEvent::Play);
        for (dt, stalled, outage) in steps {
            secondary.set_stalled(stalled);
            secondary.set_available(!outage);
            master.advance(dt);
            secondary.advance(dt);
            sync.on_time_update();
            if !outage {
                let drift = secondary.position() - master.position();
                prop_assert!(drift.abs() <= tolerance, "drift {} at {}", drift, master.position());
            }
        }
    }

    #[test]
    fn scrolled_view_needs_no_further_scroll(
        first in 0.0f64..100.0,
        node in 0.0f64..5000.0,
        height in 0.5f64..300.0,
        container in 50.0f64..1000.0,
        scroll_top in 0.0f64..5000.0,
        top_edge in any::<bool>(),
    ) {
        let edge = if top_edge { ScrollEdge::Top } else { ScrollEdge::Bottom };
        let mut anchor = ScrollAnchor {
            first_node_offset: first,
            current_node_offset: first + node,
            current_node_height: height,
            container_height: container,
            scroll_top,
        };

        let delta = compute_scroll(&anchor, edge);
        anchor.scroll_top = delta.apply(anchor.scroll_top);
        let again = compute_scroll(&anchor, edge);
        prop_assert!(again.is_none(), "second delta {}", again.delta);
    }
}

#[test]
fn documented_hold_and_gap_examples() {
    let chat = TimeIndex::build(
        "chat",
        vec![Span::point(0.0), Span::point(5.0), Span::point(12.0)],
        GapPolicy::Hold,
    )
    .unwrap();
    assert_eq!(chat.lookup(-1.0), None);
    assert_eq!(chat.lookup(0.0), Some(0));
    assert_eq!(chat.lookup(4.99), Some(0));
    assert_eq!(chat.lookup(5.0), Some(1));
    assert_eq!(chat.lookup(100.0), Some(2));

    let windows = TimeIndex::build(
        "screenshare",
        vec![Span::interval(10.0, 20.0), Span::interval(30.0, 40.0)],
        GapPolicy::Gaps,
    )
    .unwrap();
    assert_eq!(windows.lookup(9.0), None);
    assert_eq!(windows.lookup(15.0), Some(0));
    assert_eq!(windows.lookup(25.0), None);
    assert_eq!(windows.lookup(35.0), Some(1));
    assert_eq!(windows.lookup(45.0), None);
}

#[test]
fn fast_path_serves_playback_and_jumps_fall_back() {
    let index = TimeIndex::build(
        "chat",
        (0..100).map(|i| Span::point(f64::from(i))).collect(),
        GapPolicy::Hold,
    )
    .unwrap();
    let mut resolver = ActiveIndexResolver::new(2.0);
    resolver.insert(0u8, index);

    let mut t = 0.0;
    while t < 50.0 {
        resolver.resolve(0, t);
        t += 0.25;
    }
    let stats = resolver.stats();
    assert_eq!(stats.binary_searches, 1);
    assert_eq!(stats.fast_path, 199);

    assert_eq!(resolver.resolve(0, 10.5), Some(10));
    assert_eq!(resolver.stats().binary_searches, 2);
}
