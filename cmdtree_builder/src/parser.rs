mod base;
mod interface;
mod middleware;
mod printer;

pub use base::ParseError;
pub(crate) use base::*;
pub use interface::TabWriter;
pub(crate) use interface::*;
pub use middleware::Dispatcher;
