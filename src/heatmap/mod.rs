pub mod model;

pub use model::{AxisTick, HeatmapCell, HeatmapModel, LegendSwatch};
