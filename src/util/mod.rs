pub(crate) mod datetime;
pub(crate) mod text;
