pub mod body;
pub mod params;
