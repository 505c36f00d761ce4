pub(crate) mod document;
pub(crate) mod icons;
pub(crate) mod markup;
pub(crate) mod templates;
