pub(crate) mod motif;
pub(crate) mod scrim;
