pub mod usgs;
