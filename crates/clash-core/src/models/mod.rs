mod clash_group;
mod clash_record;
mod geometry;
mod grid;
mod grouping_mode;
mod ids;
mod property;
mod report;
mod request;
mod status;

pub use clash_group::{ClashGroup, ClashNode};
pub use clash_record::{ClashRecord, ClashSide};
pub use clash_test::ClashTest;
pub use geometry::Point3;
pub use grid::{GridIntersection, GridLevel};
pub use grouping_mode::GroupingMode;
pub use ids::{ElementId, NodeId, SubscriptionId};
pub use property::{Property, PropertyCategory, PropertyValue};
pub use report::{
    BatchEntry, BatchReport, CollapsedContext, OperationKind, OperationOutcome, OperationReport,
    SkipReason, TargetResult,
};
pub use request::GroupingRequest;
pub use status::ClashStatus;
