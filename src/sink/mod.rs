pub(crate) mod completion;
