pub(crate) mod shader;
