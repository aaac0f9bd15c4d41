pub(crate) mod flexbox;
pub(crate) mod flow;

pub use flexbox::FlexLine;
