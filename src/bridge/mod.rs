pub(crate) mod channel;
pub(crate) mod host;
pub(crate) mod preview;
pub(crate) mod protocol;
pub(crate) mod surface;
