pub(crate) mod assign;
pub(crate) mod compositor;
pub(crate) mod photo;
