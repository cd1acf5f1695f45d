pub(crate) mod elements;
pub(crate) mod shapes;
