pub mod encode;
pub mod pad;
pub mod surface;

pub use encode::*;
pub use pad::*;
pub use surface::*;
