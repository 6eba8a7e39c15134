//! Core of the recipe catalog: domain records, ports, and the paginated
//! card carousel used to browse them.

pub mod application;
pub mod carousel;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

pub use carousel::{Card, Carousel, GridPosition, PageLabel, PageState};
pub use config::CarouselConfig;
pub use domain::{Article, CatalogItem, ItemKind, Note, Recipe};
pub use error::{CatalogError, Result};
