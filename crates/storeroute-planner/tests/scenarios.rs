use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use storeroute_brute_force::HeldKarpOptimizer;
use storeroute_cache::{CacheKey, DistanceCache};
use storeroute_core::{Coordinate, StopId};
use storeroute_genetic::{GeneticConfig, GeneticOptimizer};
use storeroute_grid::{CostGrid, GridRouter};
use storeroute_planner::{PairwiseSource, PlannedRoute, RoutePlanner, Stop, StoreLayout};

fn c(row: i32, col: i32) -> Coordinate {
    Coordinate::new(row, col)
}

fn ids(names: &[&str]) -> Vec<StopId> {
    names.iter().map(|&n| StopId::from(n)).collect()
}

fn checkout_layout() -> StoreLayout {
    StoreLayout::new(vec![
        Stop::new("P1", (0, 0)),
        Stop::new("P2", (4, 4)),
        Stop::new("Kasse", (2, 2)),
    ])
    .unwrap()
}

fn exact_planner(
    grid: CostGrid,
    layout: StoreLayout,
    cache: Option<&DistanceCache>,
) -> RoutePlanner {
    RoutePlanner::new(grid, layout, cache, Box::new(HeldKarpOptimizer)).unwrap()
}

#[test]
fn two_products_then_checkout() {
    let planner = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), None);
    let route = planner
        .plan_route(c(0, 4), &ids(&["P1", "P2", "Kasse"]), &"Kasse".into())
        .unwrap();

    assert!(
        route.visit_order == ids(&["P1", "P2", "Kasse"])
            || route.visit_order == ids(&["P2", "P1", "Kasse"]),
        "unexpected order {:?}",
        route.visit_order
    );
    assert_eq!(route.path.len(), 11);
    assert_eq!(route.path.first(), Some(&c(0, 4)));
    assert_eq!(route.path.last(), Some(&c(2, 2)));
}

#[test]
fn genetic_optimizer_finds_the_same_length() {
    let optimizer = GeneticOptimizer::new(GeneticConfig {
        seed: Some(3),
        ..GeneticConfig::default()
    });
    let planner = RoutePlanner::new(
        CostGrid::uniform(5, 5, 1),
        checkout_layout(),
        None,
        Box::new(optimizer),
    )
    .unwrap();
    let route = planner
        .plan_route(c(0, 4), &ids(&["P1", "P2", "Kasse"]), &"Kasse".into())
        .unwrap();
    assert_eq!(route.path.len(), 11);
    assert_eq!(route.visit_order.last(), Some(&"Kasse".into()));
}

#[test]
fn single_stop_is_the_direct_path() {
    let mut intensity = vec![255u8; 36];
    // A dark block the direct path has to bend around.
    for cell in [13, 14, 19, 20] {
        intensity[cell] = 0;
    }
    let grid = CostGrid::from_intensity(6, 6, intensity).unwrap();
    let expected = GridRouter::new(&grid).shortest_path(c(0, 0), c(5, 5)).unwrap();

    let layout =
        StoreLayout::new(vec![Stop::new("Kasse", (5, 5)), Stop::new("P1", (0, 5))]).unwrap();
    let planner = exact_planner(grid, layout, None);
    let route = planner
        .plan_route(c(0, 0), &ids(&["Kasse"]), &"Kasse".into())
        .unwrap();

    assert_eq!(route.visit_order, ids(&["Kasse"]));
    assert_eq!(route.path, expected.path);
}

#[test]
fn duplicate_requests_are_visited_once() {
    let planner = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), None);
    let route = planner
        .plan_route(
            c(0, 4),
            &ids(&["P1", "Kasse", "P1", "P2", "Kasse"]),
            &"Kasse".into(),
        )
        .unwrap();
    assert_eq!(route.visit_order.len(), 3);
    assert_eq!(route.path.len(), 11);
}

#[test]
fn standing_on_a_stop_works() {
    let planner = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), None);
    let route = planner
        .plan_route(c(0, 0), &ids(&["P1", "Kasse"]), &"Kasse".into())
        .unwrap();
    assert_eq!(route.visit_order, ids(&["P1", "Kasse"]));
    assert_eq!(route.path, vec![c(0, 0), c(1, 1), c(2, 2)]);
}

#[test]
fn empty_layout_plans_nothing() {
    let planner = exact_planner(CostGrid::uniform(3, 3, 1), StoreLayout::default(), None);
    let route = planner.plan_route(c(1, 1), &[], &"anything".into()).unwrap();
    assert_eq!(route, PlannedRoute::default());
}

#[test]
fn second_planner_reads_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DistanceCache::new(dir.path().join("cache.json"));

    let first = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), Some(&cache));
    assert_eq!(first.pairwise_source(), PairwiseSource::Computed);
    let second = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), Some(&cache));
    assert_eq!(second.pairwise_source(), PairwiseSource::Cache);
    assert_eq!(first.pairwise_routes(), second.pairwise_routes());

    let query = ids(&["P1", "P2", "Kasse"]);
    assert_eq!(
        first.plan_route(c(0, 4), &query, &"Kasse".into()).unwrap(),
        second.plan_route(c(0, 4), &query, &"Kasse".into()).unwrap()
    );
}

#[test]
fn moving_a_stop_misses_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DistanceCache::new(dir.path().join("cache.json"));
    exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), Some(&cache));

    let moved = StoreLayout::new(vec![
        Stop::new("P1", (0, 1)),
        Stop::new("P2", (4, 4)),
        Stop::new("Kasse", (2, 2)),
    ])
    .unwrap();
    let planner = exact_planner(CostGrid::uniform(5, 5, 1), moved, Some(&cache));
    assert_eq!(planner.pairwise_source(), PairwiseSource::Computed);
    assert_eq!(cache.keys().len(), 2);
}

#[test]
fn truncated_cache_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.json");
    let cache = DistanceCache::new(&path);
    exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), Some(&cache));

    let full = fs::read(&path).unwrap();
    fs::write(&path, &full[..full.len() / 3]).unwrap();

    let planner = exact_planner(CostGrid::uniform(5, 5, 1), checkout_layout(), Some(&cache));
    assert_eq!(planner.pairwise_source(), PairwiseSource::Computed);
    let route = planner
        .plan_route(c(0, 4), &ids(&["P1", "P2", "Kasse"]), &"Kasse".into())
        .unwrap();
    assert_eq!(route.path.len(), 11);

    let key = CacheKey::for_stops(&checkout_layout().coordinates());
    assert!(cache.load(&key).unwrap().is_complete(3));
}

fn layouts() -> impl Strategy<Value = (Vec<u8>, Vec<(i32, i32)>, (i32, i32))> {
    (
        prop::collection::vec(any::<u8>(), 64),
        prop::collection::hash_set((0..8i32, 0..8i32), 2..6),
        (0..8i32, 0..8i32),
    )
        .prop_map(|(intensity, stops, current)| (intensity, stops.into_iter().collect(), current))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn routes_visit_every_stop_once_and_end_at_the_end((intensity, stops, current) in layouts()) {
        let grid = CostGrid::from_intensity(8, 8, intensity).unwrap();
        let layout = StoreLayout::new(
            stops
                .iter()
                .enumerate()
                .map(|(i, &at)| Stop::new(format!("s{i}"), at))
                .collect(),
        )
        .unwrap();
        let required: Vec<StopId> = layout.stops().iter().map(|s| s.id.clone()).collect();
        let end = required[required.len() - 1].clone();
        let end_at = Coordinate::from(stops[stops.len() - 1]);

        let planner = exact_planner(grid, layout, None);
        let route = planner.plan_route(current.into(), &required, &end).unwrap();

        prop_assert_eq!(route.visit_order.last(), Some(&end));
        prop_assert_eq!(route.visit_order.len(), required.len());
        let unique: HashSet<_> = route.visit_order.iter().collect();
        prop_assert_eq!(unique.len(), required.len());

        prop_assert_eq!(route.path.first(), Some(&Coordinate::from(current)));
        prop_assert_eq!(route.path.last(), Some(&end_at));
        for step in route.path.windows(2) {
            prop_assert_eq!(step[0].chebyshev(&step[1]), 1);
        }
    }
}

/// Every ordering of `items`.
fn orderings(items: &[Coordinate]) -> Vec<Vec<Coordinate>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut all = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in orderings(&rest) {
            tail.insert(0, head);
            all.push(tail);
        }
    }
    all
}

fn rough_floors() -> impl Strategy<Value = (Vec<u8>, Vec<(i32, i32)>, (i32, i32))> {
    (
        // A third of the cells are nearly impassable.
        prop::collection::vec(prop_oneof![2 => Just(255u8), 1 => Just(0u8)], 36),
        prop::collection::hash_set((0..6i32, 0..6i32), 3..5),
        (0..6i32, 0..6i32),
    )
        .prop_map(|(intensity, stops, current)| (intensity, stops.into_iter().collect(), current))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exact_planner_walks_the_cheapest_order((intensity, stops, current) in rough_floors()) {
        let grid = CostGrid::from_intensity(6, 6, intensity).unwrap();
        let router = GridRouter::new(&grid);
        let current = Coordinate::from(current);
        let coords: Vec<Coordinate> = stops.iter().map(|&at| Coordinate::from(at)).collect();
        let end_at = coords[coords.len() - 1];

        let mut best = u64::MAX;
        for order in orderings(&coords[..coords.len() - 1]) {
            let mut at = current;
            let mut cost = 0u64;
            for next in order.into_iter().chain([end_at]) {
                cost += router.shortest_path(at, next).unwrap().cost;
                at = next;
            }
            best = best.min(cost);
        }

        let layout = StoreLayout::new(
            coords
                .iter()
                .enumerate()
                .map(|(i, &at)| Stop::new(format!("s{i}"), at))
                .collect(),
        )
        .unwrap();
        let required: Vec<StopId> = layout.stops().iter().map(|s| s.id.clone()).collect();
        let end = required[required.len() - 1].clone();
        let planner = exact_planner(grid.clone(), layout, None);
        let route = planner.plan_route(current, &required, &end).unwrap();

        let walked: u64 = route.path[1..]
            .iter()
            .map(|&cell| grid.cost(cell).unwrap() as u64)
            .sum();
        prop_assert_eq!(walked, best);
    }
}
