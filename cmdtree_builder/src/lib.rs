//! Builder module for `cmdtree`.
//! See [documentation root](https://docs.rs/cmdtree/latest/cmdtree/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{Dispatcher, ParseError, TabWriter};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
