//! 服务模块

pub mod catalog_service;
pub mod catalog_view;
pub mod facets;
pub mod filter;
pub mod group;
pub mod memo;
pub mod sort;
pub mod tree_builder;

pub use catalog_service::{CatalogService, CatalogServiceImpl, create_catalog_service};
pub use catalog_view::{ViewEngine, ViewOutput};
pub use facets::{CatalogFacets, ContextRange, FacetCount, compute_facets};
pub use filter::filter_records;
pub use group::{ALL_MODELS_LABEL, GroupedRecords, group_records, total_memberships};
pub use sort::{collate_names, compare_names, sort_records};
pub use tree_builder::{TreeBuild, build_tree, build_tree_with_report};
