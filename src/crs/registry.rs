use std::borrow::Cow;

pub(super) const WGS84_GEOGRAPHIC: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";
const NAD83_GEOGRAPHIC: &str = "+proj=longlat +datum=NAD83 +no_defs +type=crs";
const ETRS89_GEOGRAPHIC: &str = "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs";
const WEB_MERCATOR: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs";
const LAMBERT_93: &str = "+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 +x_0=700000 +y_0=6600000 \
    +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs";
const BRITISH_NATIONAL_GRID: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 \
    +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs +type=crs";
const NY_LONG_ISLAND_FT: &str = "+proj=lcc +lat_0=40.1666666666667 +lon_0=-74 +lat_1=41.0333333333333 \
    +lat_2=40.6666666666667 +x_0=300000.0000000001 +y_0=0 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 \
    +units=us-ft +no_defs +type=crs";

/// PROJ.4 definition for a WGS84 / NAD83 UTM zone.
pub(super) fn utm_definition(zone: u8, north: bool, datum: &str) -> String {
    let south = if north { "" } else { " +south" };
    format!("+proj=utm +zone={zone}{south} +datum={datum} +units=m +no_defs +type=crs")
}

/// Look up the PROJ.4 definition for an EPSG code, if it is one we know.
pub(super) fn proj4_definition(code: u32) -> Option<Cow<'static, str>> {
    let definition = match code {
        4326 => Cow::Borrowed(WGS84_GEOGRAPHIC),
        4269 => Cow::Borrowed(NAD83_GEOGRAPHIC),
        4258 => Cow::Borrowed(ETRS89_GEOGRAPHIC),
        3857 | 900913 => Cow::Borrowed(WEB_MERCATOR),
        2154 => Cow::Borrowed(LAMBERT_93),
        27700 => Cow::Borrowed(BRITISH_NATIONAL_GRID),
        2263 => Cow::Borrowed(NY_LONG_ISLAND_FT),
        32601..=32660 => Cow::Owned(utm_definition((code - 32600) as u8, true, "WGS84")),
        32701..=32760 => Cow::Owned(utm_definition((code - 32700) as u8, false, "WGS84")),
        26901..=26923 => Cow::Owned(utm_definition((code - 26900) as u8, true, "NAD83")),
        _ => return None,
    };
    Some(definition)
}
