pub(crate) mod polyline;
