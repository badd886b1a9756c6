//! Static lookup tables: airports, regions and stations, meteoweb map types.

mod airports;
mod meteoweb;
mod stations;

pub use airports::icao_by_name;
pub use meteoweb::{MAP_TYPES, MapType, map_type};
pub use stations::{region_code, station_code};
