//! Target-language renderers over the emission plans.

pub mod typescript;
