pub(crate) mod fallback;
pub(crate) mod loader;
pub(crate) mod source;
