pub(crate) mod resolver;
pub(crate) mod storage;
