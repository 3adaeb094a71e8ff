//! End-to-end scenarios against the public engine API.
//!
//! ## Running
//!
//! ```bash
//! cargo test --test scenarios -- --nocapture
//! ```

use std::sync::Arc;
use std::thread;

use sparse_order::{EngineConfig, ItemId, OrderError, OrderingEngine, Position};

const CLIENT: &str = "scenario";

fn ids(engine: &OrderingEngine, query: Option<&str>, offset: usize, limit: usize) -> Vec<ItemId> {
    engine
        .list_page(CLIENT, query, offset, limit)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect()
}

fn rank(engine: &OrderingEngine, id: ItemId) -> f64 {
    engine.rank_of(CLIENT, id).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_insert_before_default_then_chain() {
    let engine = OrderingEngine::new();

    engine.reorder_insert(CLIENT, 130, 30, Position::Before).unwrap();
    let r130 = rank(&engine, 130);
    assert!(29.0 < r130 && r130 < 30.0);

    engine.reorder_insert(CLIENT, 230, 130, Position::Before).unwrap();
    assert!(rank(&engine, 230) < rank(&engine, 130));
    assert!(rank(&engine, 130) < rank(&engine, 30));

    let page = ids(&engine, None, 0, 50);
    let at = page.iter().position(|&id| id == 230).unwrap();
    assert_eq!(&page[at..at + 3], &[230, 130, 30]);
    assert_eq!(page[at - 1], 29);
}

#[test]
fn scenario_insert_between_close_overrides() {
    let engine = OrderingEngine::new();
    {
        let session = engine.registry().session(CLIENT);
        let mut state = session.write();
        state.ranks_mut().set(100, 30.0001);
        state.ranks_mut().set(101, 30.0002);
    }

    engine.reorder_insert(CLIENT, 102, 101, Position::Before).unwrap();

    assert_eq!(ids(&engine, None, 29, 5), vec![30, 100, 102, 101, 31]);
}

#[test]
fn scenario_tied_overrides_renormalize() {
    let engine = OrderingEngine::new();
    {
        let session = engine.registry().session(CLIENT);
        let mut state = session.write();
        state.ranks_mut().set(100, 30.5);
        state.ranks_mut().set(101, 30.5);
    }

    let outcome = engine
        .reorder_insert(CLIENT, 102, 101, Position::Before)
        .unwrap();

    assert!(outcome.renormalized);
    assert_eq!(ids(&engine, None, 29, 5), vec![30, 100, 102, 101, 31]);
    assert!(rank(&engine, 102) - rank(&engine, 100) >= 1e-12);
    assert!(rank(&engine, 101) - rank(&engine, 102) >= 1e-12);
}

#[test]
fn scenario_move_before_first() {
    let engine = OrderingEngine::new();

    engine.reorder_insert(CLIENT, 2, 1, Position::Before).unwrap();

    assert_eq!(rank(&engine, 1), 1.0);
    assert!(rank(&engine, 2) < 1.0);
    assert_eq!(ids(&engine, None, 0, 5), vec![2, 1, 3, 4, 5]);
}

#[test]
fn scenario_set_whole_order() {
    let engine = OrderingEngine::new();

    engine.set_whole_order(CLIENT, &[5, 3, 1, 2, 4]).unwrap();

    assert_eq!(ids(&engine, None, 0, 5), vec![5, 3, 1, 2, 4]);
    assert_eq!(ids(&engine, None, 5, 2), vec![6, 7]);
}

#[test]
fn scenario_query_filter() {
    let engine = OrderingEngine::new();
    engine.reorder_insert(CLIENT, 512, 3, Position::After).unwrap();
    engine.reorder_insert(CLIENT, 7, 120, Position::Before).unwrap();

    let page = ids(&engine, Some("12"), 0, 10);
    assert_eq!(page.len(), 10);
    assert!(page.iter().all(|id| id.to_string().contains("12")));
    assert_eq!(page[0], 512);

    let ranks: Vec<f64> = page.iter().map(|&id| rank(&engine, id)).collect();
    assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn pagination_is_deterministic() {
    let engine = OrderingEngine::new();
    engine.reorder_insert(CLIENT, 40, 3, Position::Before).unwrap();

    let first = engine.list_page(CLIENT, Some("4"), 0, 20).unwrap();
    let second = engine.list_page(CLIENT, Some("4"), 0, 20).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pages_concatenate_across_boundaries() {
    let engine = OrderingEngine::with_config(EngineConfig::with_max_id(300)).unwrap();
    engine.reorder_insert(CLIENT, 250, 10, Position::After).unwrap();
    engine.reorder_insert(CLIENT, 1, 299, Position::Before).unwrap();
    engine.set_whole_order("other", &[9, 8]).unwrap();

    let whole = ids(&engine, None, 0, 100)
        .into_iter()
        .chain(ids(&engine, None, 100, 100))
        .chain(ids(&engine, None, 200, 100))
        .collect::<Vec<_>>();

    let mut by_sevens = Vec::new();
    let mut offset = 0;
    loop {
        let page = ids(&engine, None, offset, 7);
        if page.is_empty() {
            break;
        }
        offset += page.len();
        by_sevens.extend(page);
    }

    assert_eq!(whole.len(), 300);
    assert_eq!(whole, by_sevens);
}

#[test]
fn page_limit_is_enforced() {
    let engine = OrderingEngine::new();

    assert_eq!(
        engine.list_page(CLIENT, None, 0, 0).unwrap_err(),
        OrderError::InvalidPageSize { limit: 0, max: 100 }
    );
    assert!(engine.list_page(CLIENT, None, 0, 101).is_err());
}

#[test]
fn selection_shows_in_pages() {
    let engine = OrderingEngine::new();
    engine.toggle_selection(CLIENT, &[2, 5], true).unwrap();
    engine.reorder_insert(CLIENT, 5, 1, Position::Before).unwrap();

    let page = engine.list_page(CLIENT, None, 0, 3).unwrap();
    let rows: Vec<_> = page
        .iter()
        .map(|item| (item.id, item.label.as_str(), item.selected))
        .collect();
    assert_eq!(
        rows,
        vec![(5, "Item 5", true), (1, "Item 1", false), (2, "Item 2", true)]
    );
}

// ============================================================================
// Reset and sessions
// ============================================================================

#[test]
fn reset_restores_identity() {
    let engine = OrderingEngine::new();
    engine.set_whole_order(CLIENT, &[9, 8, 7]).unwrap();
    engine.toggle_selection(CLIENT, &[9], true).unwrap();

    engine.reset(CLIENT);

    assert_eq!(ids(&engine, None, 0, 3), vec![1, 2, 3]);
    assert!(!engine.is_selected(CLIENT, 9).unwrap());
    assert_eq!(engine.override_count(CLIENT), 0);
}

#[test]
fn concurrent_clients_do_not_interfere() {
    let engine = Arc::new(OrderingEngine::new());

    let handles: Vec<_> = (0..4u64)
        .map(|n| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let client = format!("client-{}", n);
                let moved = 1000 + n;
                for _ in 0..50 {
                    engine
                        .reorder_insert(&client, moved, 1, Position::Before)
                        .unwrap();
                    let page = engine.list_page(&client, None, 0, 2).unwrap();
                    assert_eq!(page[0].id, moved);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.client_count(), 4);
    for n in 0..4u64 {
        let page = engine
            .list_page(&format!("client-{}", n), None, 0, 2)
            .unwrap();
        assert_eq!(page[0].id, 1000 + n);
        assert_eq!(page[1].id, 1);
    }
}

#[test]
fn digest_tracks_state() {
    let engine = OrderingEngine::new();
    let empty = engine.state_digest(CLIENT).unwrap();

    engine.reorder_insert(CLIENT, 2, 1, Position::Before).unwrap();
    let moved = engine.state_digest(CLIENT).unwrap();
    assert_ne!(empty.state_root, moved.state_root);
    assert_eq!(moved.override_count, 1);

    engine.reset(CLIENT);
    assert_eq!(engine.state_digest(CLIENT).unwrap(), empty);
}
