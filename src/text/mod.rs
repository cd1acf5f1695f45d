pub(crate) mod bitmap;
pub(crate) mod engine;
pub(crate) mod fit;
pub(crate) mod fonts;
pub(crate) mod layers;
