mod config;
mod svg;

use anyhow::{anyhow, Context, Result};
use clap::{arg, Command};
use config::StoreConfig;
use log::info;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use storeroute_cache::DistanceCache;
use storeroute_core::{Coordinate, StopId};
use storeroute_grid::CostGrid;
use storeroute_planner::{PairwiseSource, RoutePlanner};
use svg::RouteOverlay;

fn cli() -> Command {
    Command::new("storeroute")
        .about("Plans walking routes through a store")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("precompute")
                .about("Computes the paths between all stops and stores them in the cache")
                .arg(
                    arg!(<CONFIG> "Path to the store's TOML config")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Plans a route and prints it as JSON")
                .arg(
                    arg!(<CONFIG> "Path to the store's TOML config")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--from <POSITION> "Current position as ROW,COL")
                        .value_parser(parse_coordinate),
                )
                .arg(arg!(--end <ID> "Stop the route must finish at"))
                .arg(arg!([STOPS] ... "Stop ids to visit; the end stop is added if missing"))
                .arg(
                    arg!(--svg <PATH> "Also write an SVG overlay of the route")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("precompute", sub_m)) => match sub_m.get_one::<PathBuf>("CONFIG") {
            Some(config) => precompute(config),
            None => Err(anyhow!("missing config path")),
        },
        Some(("plan", sub_m)) => {
            let config = sub_m.get_one::<PathBuf>("CONFIG");
            let from = sub_m.get_one::<Coordinate>("from");
            let end = sub_m.get_one::<String>("end");
            let stops: Vec<String> = sub_m
                .get_many::<String>("STOPS")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default();
            match (config, from, end) {
                (Some(config), Some(&from), Some(end)) => plan(
                    config,
                    from,
                    end,
                    &stops,
                    sub_m.get_one::<PathBuf>("svg").map(PathBuf::as_path),
                ),
                _ => Err(anyhow!("plan needs CONFIG, --from and --end")),
            }
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {value:?}"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad column {col:?}: {e}"))?;
    Ok(Coordinate::new(row, col))
}

fn build_planner(config_path: &Path) -> Result<(StoreConfig, RoutePlanner)> {
    let config = StoreConfig::load(config_path)?;
    let grid = CostGrid::load(&config.map.image)?;
    let layout = config.layout()?;
    let cache = config
        .cache
        .enabled
        .then(|| DistanceCache::new(&config.cache.path));

    let planner = RoutePlanner::new(grid, layout, cache.as_ref(), config.optimizer.build())
        .context("failed to prepare the route planner")?;
    Ok((config, planner))
}

fn precompute(config_path: &Path) -> Result<()> {
    let (config, planner) = build_planner(config_path)?;
    let source = match planner.pairwise_source() {
        PairwiseSource::Cache => "cache",
        PairwiseSource::Computed => "computed",
    };
    println!(
        "{}",
        json!({
            "stops": planner.layout().len(),
            "paths": planner.pairwise_routes().edges.len(),
            "source": source,
            "cache": config.cache.enabled.then(|| config.cache.path.display().to_string()),
        })
    );
    Ok(())
}

fn plan(
    config_path: &Path,
    from: Coordinate,
    end: &str,
    stops: &[String],
    svg_path: Option<&Path>,
) -> Result<()> {
    let (_, planner) = build_planner(config_path)?;

    let end = StopId::from(end);
    let mut required: Vec<StopId> = stops.iter().map(|s| StopId::from(s.as_str())).collect();
    if !required.contains(&end) {
        required.push(end.clone());
    }

    let route = planner
        .plan_route(from, &required, &end)
        .with_context(|| format!("failed to plan a route from {from}"))?;
    info!(
        "Planned {} stops with the {} optimizer, {} cells walked",
        route.visit_order.len(),
        planner.optimizer_name(),
        route.path.len()
    );

    if let Some(svg_path) = svg_path {
        let stops = route
            .visit_order
            .iter()
            .filter_map(|id| planner.layout().node_of(id))
            .filter_map(|node| planner.layout().stop(node))
            .map(|stop| stop.coordinate)
            .collect();
        let grid = planner.grid();
        let overlay = RouteOverlay::new(grid.rows(), grid.cols(), from, &route.path)
            .with_stops(stops)
            .render();
        fs::write(svg_path, overlay)
            .with_context(|| format!("failed to write {}", svg_path.display()))?;
        info!("Wrote route overlay to {}", svg_path.display());
    }

    println!("{}", serde_json::to_string(&route)?);
    Ok(())
}
