#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a JSON value model with a two way text codec. A [`Value`] is
//! a tree of null, bool, integer, float, string, array and object nodes that
//! can be built by hand, mutated through auto-vivifying paths and rendered
//! back to text.
//!
//! ## How to use it ?
//!
//! ### Parsing
//!
//! ```rust
//! use slot_json::from_text;
//!
//! let root = from_text(r#"{"numbers":[1,2,3],"info":{"name":"Chad","age":30}}"#).unwrap();
//!
//! assert_eq!(root["info"]["name"].as_str(), Some("Chad"));
//! assert_eq!(root["numbers"].len(), 3);
//! ```
//!
//! ### Building
//!
//! Indexing a `null` value for writing turns it into the container the index
//! asks for. Arrays grow to fit, padding with `null`.
//!
//! ```rust
//! use slot_json::{to_text, Value};
//!
//! let mut root = Value::Null;
//! root["a"][2] = Value::from(1);
//!
//! assert_eq!(to_text(&root, false), r#"{"a":[null,null,1]}"#);
//! ```
//!
//! Reading goes through [`Value::find`] and [`Value::try_as`], which never
//! fail, or through [`Value::get`] and [`Value::to`] which report an
//! [`AccessError`](error::AccessError).
//!
//! ### Serializing in a struct
//!
//! `Value` implements serde's `Serialize` and `Deserialize`:
//!
//! ```rust
//! use serde::Deserialize;
//! use slot_json::from_text;
//!
//! #[derive(Deserialize)]
//! struct Test {
//!     pub hello: String,
//! }
//!
//! let parsed = from_text(r#"{"hello": "world"}"#).unwrap();
//!
//! let test: Test = serde_json::from_value(serde_json::to_value(parsed).unwrap()).unwrap();
//!
//! assert_eq!(test.hello, "world");
//! ```
//!
//! ## Limits
//!
//! There is no nesting limit: very deeply nested input can exhaust the stack.
//! A `Value` is not meant to be mutated from several threads at once.

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;

mod codec;
mod de;
mod input;
mod parser;
mod ser;
#[cfg(feature = "wasm")]
mod wasm;

pub mod error;
pub mod text;
pub mod value;
pub mod writer;

pub use codec::{from_file, from_text, to_file, to_text};
pub use parser::parse;
pub use value::{Kind, Slot, Value};
pub use writer::Options;
