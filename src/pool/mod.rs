pub(crate) mod opts;
pub(crate) mod pass;
pub(crate) mod renderer;
pub(crate) mod workers;
