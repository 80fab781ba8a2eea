// Library root: header resolution, numeric cleaning, percentile ranking and
// the synthetic composite score for scouting datasets.

pub mod cleaning;
pub mod composite;
pub mod dataset;
pub mod mapping;
pub mod metrics;
pub mod normalize;
pub mod percentile;
pub mod resolver;
pub mod session;
pub mod table;

pub use composite::{compute_composite, CompositeWeights, InvalidWeight, WeightField};
pub use dataset::{Cell, Column, Dataset};
pub use mapping::ColumnMapping;
pub use metrics::{Direction, Metric};
pub use resolver::resolve_mapping;
pub use session::Session;
pub use table::{build_composite_table, build_percentile_table, CompositeTable, PercentileTable};
