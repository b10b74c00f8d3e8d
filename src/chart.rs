//! Chart-data aggregation engine.
//!
//! A [`ChartRequest`] is validated into a [`ChartSpec`] before any data is
//! touched; [`aggregate`] then groups the dataset and returns a
//! [`ChartPayload`] in the shape the chart family expects.

pub mod aggregate;
pub mod types;

pub use aggregate::{COUNT_COLUMN, aggregate};
pub use types::{
    Aggregation, AxisParameters, ChartPayload, ChartRequest, ChartResponse, ChartSpec,
    ChartType, GroupedPayload, Point, PointsPayload, RequestParameters,
};
