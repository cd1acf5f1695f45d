pub(crate) mod batch;
pub(crate) mod fields;
pub(crate) mod model;
pub(crate) mod plan;
pub(crate) mod render;
pub(crate) mod report;
pub(crate) mod schema;
