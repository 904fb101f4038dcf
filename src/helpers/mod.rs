pub(crate) mod comparable;
pub(crate) mod matching;
pub(crate) mod ordered;
pub(crate) mod try_process;
