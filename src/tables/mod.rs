pub(crate) mod symbol;
pub(crate) mod constant;
pub(crate) mod token;

pub(crate) use symbol::*;
pub(crate) use constant::ConstantTable;
pub(crate) use token::{TokenCategory, TokenTable};
