pub mod bounded;
pub mod catalog;
pub mod date_format;
pub mod duration;
pub mod html;
pub mod route;
pub mod rut;
pub mod signature;

pub use bounded::*;
pub use catalog::*;
pub use date_format::*;
pub use duration::*;
pub use html::*;
pub use route::*;
pub use rut::*;
pub use signature::*;
