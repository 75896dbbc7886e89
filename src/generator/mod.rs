//! Generated site artifacts.

pub mod sitemap;
