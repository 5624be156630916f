pub(crate) mod calibrate;
