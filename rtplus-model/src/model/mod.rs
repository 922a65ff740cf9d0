//! RT+ row types

mod membership;
mod person;
mod record;
mod skill_check;
mod value;

pub use membership::*;
pub use person::*;
pub use record::*;
pub use skill_check::*;
pub use value::*;
