pub(crate) mod composite;
pub(crate) mod surface;
pub(crate) mod vector;
