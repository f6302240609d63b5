use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use routemetrics::io::{
    angle_points_to_geojson, fs::ensure_dir_exists, length_segments_to_geojson, read_route_layer_from_path,
    write_geojson,
};
use routemetrics::Crs;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::MeasureArgs) -> Result<()> {
    let crs = args.crs.as_deref()
        .map(str::parse::<Crs>)
        .transpose()
        .context("invalid --crs")?;
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    info!("[measure] reading routes from {}", args.input.display());
    let layer = read_route_layer_from_path(&args.input, crs)?;

    info!("[measure] measuring {} routes in {}", layer.len(), layer.crs);
    let metrics = layer.measure()
        .with_context(|| format!("failed to measure routes in {}", args.input.display()))?;

    // Both layers are serialized before either is written, so a failure leaves old outputs intact.
    let angles = angle_points_to_geojson(&metrics);
    let segments = length_segments_to_geojson(&metrics);

    ensure_dir_exists(&out_dir)?;
    let points_path = out_dir.join(&args.points_name);
    let segments_path = out_dir.join(&args.segments_name);

    info!("[measure] writing angle points to {}", points_path.display());
    write_geojson(&points_path, &angles)?;
    info!("[measure] writing length segments to {}", segments_path.display());
    write_geojson(&segments_path, &segments)?;

    if args.summary {
        for route in &metrics.routes {
            let label = route.id.clone().unwrap_or_else(|| format!("#{}", route.feature_index));
            let max_angle = route.metrics.max_angle()
                .map_or_else(|| "-".to_string(), |angle| format!("{angle:.2}"));
            println!(
                "{label}: {} segments, {:.2} m, {} angles, max angle {max_angle}",
                route.metrics.length_segments.len(),
                route.metrics.total_length_meters,
                route.metrics.angle_points.len(),
            );
        }
        println!("total: {} routes, {:.2} m", metrics.routes.len(), metrics.total_length_meters());
    }

    Ok(())
}
