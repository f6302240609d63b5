use anyhow::{ensure, Result};
use routemetrics::UtmZone;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ZoneArgs) -> Result<()> {
    ensure!(args.lon.is_finite() && args.lat.is_finite(), "longitude and latitude must be finite");
    ensure!((-180.0..=180.0).contains(&args.lon), "longitude {} is outside [-180, 180]", args.lon);
    ensure!((-90.0..=90.0).contains(&args.lat), "latitude {} is outside [-90, 90]", args.lat);

    let zone = UtmZone::from_lon_lat(args.lon, args.lat);
    println!("UTM zone {zone} (EPSG:{})", zone.epsg());
    Ok(())
}
