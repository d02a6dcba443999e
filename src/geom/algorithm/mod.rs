pub(crate) mod overlay;
#[cfg(feature = "proj")]
pub(crate) mod proj;
