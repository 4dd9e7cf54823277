use crate::assemble::{orient, stitch};
use crate::graph::QueryGraph;
use crate::layout::{Stop, StoreLayout};
use crate::pairwise::{cost_table, load_or_compute, PairwiseSource};
use log::{debug, info};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use storeroute_cache::DistanceCache;
use storeroute_core::{
    Coordinate, Cost, NodeIndex, PairwiseRoutes, Result, RouteError, RouteOptimizer, StopId,
};
use storeroute_genetic::GeneticOptimizer;
use storeroute_grid::{CostGrid, GridRouter};

/// A planned walk through the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlannedRoute {
    /// Every cell walked, from the current position to the end stop
    pub path: Vec<Coordinate>,
    /// Requested stops in walking order; the end stop comes last
    pub visit_order: Vec<StopId>,
}

/// Plans routes over one store map and stop layout.
///
/// Building a planner computes the path between every pair of stops, or
/// reads it from the distance cache. Queries only search from the caller's
/// position, so planning stays cheap once the planner exists. A planner is
/// immutable and can be shared between threads.
pub struct RoutePlanner {
    grid: CostGrid,
    layout: StoreLayout,
    routes: PairwiseRoutes,
    costs: HashMap<(NodeIndex, NodeIndex), Cost>,
    source: PairwiseSource,
    optimizer: Box<dyn RouteOptimizer>,
}

impl RoutePlanner {
    pub fn new(
        grid: CostGrid,
        layout: StoreLayout,
        cache: Option<&DistanceCache>,
        optimizer: Box<dyn RouteOptimizer>,
    ) -> Result<Self> {
        for stop in layout.stops() {
            grid.index_of(stop.coordinate)?;
        }

        let (routes, source) = load_or_compute(&GridRouter::new(&grid), &layout, cache)?;
        let costs = cost_table(&routes);
        info!(
            "Route planner ready: {} stops on a {}x{} grid, pairwise paths {:?}, optimizer {}",
            layout.len(),
            grid.rows(),
            grid.cols(),
            source,
            optimizer.name()
        );

        Ok(Self {
            grid,
            layout,
            routes,
            costs,
            source,
            optimizer,
        })
    }

    /// Planner using the genetic optimizer with its default settings.
    pub fn with_default_optimizer(
        grid: CostGrid,
        layout: StoreLayout,
        cache: Option<&DistanceCache>,
    ) -> Result<Self> {
        Self::new(grid, layout, cache, Box::new(GeneticOptimizer::default()))
    }

    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn pairwise_routes(&self) -> &PairwiseRoutes {
        &self.routes
    }

    /// Whether the stop-to-stop paths were computed or loaded from the cache.
    pub fn pairwise_source(&self) -> PairwiseSource {
        self.source
    }

    pub fn optimizer_name(&self) -> &str {
        self.optimizer.name()
    }

    /// Route from `current` through every stop in `required`, finishing at
    /// `end`.
    ///
    /// `end` must be one of `required`. Repeated ids are visited once. An
    /// empty layout yields an empty route.
    pub fn plan_route(
        &self,
        current: Coordinate,
        required: &[StopId],
        end: &StopId,
    ) -> Result<PlannedRoute> {
        if self.layout.is_empty() {
            return Ok(PlannedRoute::default());
        }
        self.grid.index_of(current)?;

        let started = Instant::now();
        let stops = self.resolve(required)?;
        let end_node = self
            .layout
            .node_of(end)
            .filter(|node| stops.contains(node))
            .ok_or_else(|| {
                RouteError::InvalidQuery(format!("end stop {end} is not among the required stops"))
            })?;

        let targets: Vec<(NodeIndex, Coordinate)> = stops
            .iter()
            .map(|&node| self.stop_at(node).map(|stop| (node, stop.coordinate)))
            .collect::<Result<_>>()?;
        let from_current = GridRouter::new(&self.grid).from_point(current, &targets)?;

        let graph = QueryGraph::build(&stops, end_node, &self.costs, &from_current)?;
        let tour = self.optimizer.optimize(graph.edges(), graph.node_count())?;
        let local_order = orient(&tour, &graph)?;

        let order: Vec<NodeIndex> = local_order
            .iter()
            .map(|&local| {
                graph.layout_node(local).ok_or_else(|| {
                    RouteError::InternalInvariant(format!("local node {local} has no stop"))
                })
            })
            .collect::<Result<_>>()?;
        let path = stitch(&order, &[&self.routes.segments, &from_current.segments])?;
        let visit_order = order[1..]
            .iter()
            .map(|&node| self.stop_at(node).map(|stop| stop.id.clone()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Planned {} stops from {} in {:.2?} ({} cells)",
            visit_order.len(),
            current,
            started.elapsed(),
            path.len()
        );
        Ok(PlannedRoute { path, visit_order })
    }

    /// Layout nodes of `required`, first occurrence kept.
    fn resolve(&self, required: &[StopId]) -> Result<Vec<NodeIndex>> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(required.len());
        for id in required {
            let node = self
                .layout
                .node_of(id)
                .ok_or_else(|| RouteError::InvalidQuery(format!("unknown stop id {id}")))?;
            if seen.insert(node) {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn stop_at(&self, node: NodeIndex) -> Result<&Stop> {
        self.layout
            .stop(node)
            .ok_or_else(|| RouteError::InternalInvariant(format!("node {node} has no stop")))
    }
}
