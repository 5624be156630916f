pub(crate) mod controller;
pub(crate) mod entry;
pub(crate) mod index;
