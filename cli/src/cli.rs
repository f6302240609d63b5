use std::path::PathBuf;

/// Route angle and segment length CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "routemetrics", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Measure turning angles and segment lengths of every route in a GeoJSON file
    Measure(MeasureArgs),

    /// Print the UTM zone selected for a longitude/latitude
    Zone(ZoneArgs),
}

#[derive(clap::Args, Debug)]
pub struct MeasureArgs {
    /// Input GeoJSON with LineString / MultiLineString routes
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Source CRS (e.g. EPSG:2154 or a +proj string), overrides the file's crs member
    #[arg(long)]
    pub crs: Option<String>,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// File name of the angle point layer
    #[arg(long, default_value = "route_angles.geojson")]
    pub points_name: String,

    /// File name of the segment length layer
    #[arg(long, default_value = "route_segments.geojson")]
    pub segments_name: String,

    /// Print a per-route summary to stdout
    #[arg(long)]
    pub summary: bool,
}

#[derive(clap::Args, Debug)]
pub struct ZoneArgs {
    /// Longitude in degrees
    #[arg(allow_hyphen_values = true)]
    pub lon: f64,

    /// Latitude in degrees
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,
}
