//! # Query String Grammar - Syntax Tree
//!
//! This module defines the tokens and the tree produced by parsing a query
//! string such as:
//!
//! ```text
//! ?filter[status]=open|closed&sort=name,date
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[value]** - Param values: scalars, piped lists, comma lists
//! - **[param]** - A single `name[index]=value` unit and its [`Index`]
//! - **[querystring]** - The root: `?` followed by params
//!
//! ## Core Concepts
//!
//! ### Params
//!
//! Every query string starts with `?` and contains one or more params joined
//! by `&`:
//!
//! ```text
//! ?a=1&b=2
//! ```
//!
//! ### Indices
//!
//! A param name may be followed by bracket groups. Fragments are recorded in
//! source order, so `a[0][b]=v` has the index `["0", "b"]`. In the extended
//! grammar a group may itself contain groups; `a[[0][b]]=v` yields the same
//! index.
//!
//! ### Values
//!
//! - `k=v` → `Scalar("v")`
//! - `k=a|b|c` → `Piped([a, b, c])`
//! - `k=a,b` → `Commaed([a, b])`
//!
//! `|` and `,` cannot be mixed inside a single value.
//!
//! ## Canonical Form
//!
//! Every tree type implements `Display`, writing the canonical string with no
//! whitespace. Parsing that string again yields an equal tree.
pub mod param;
pub mod querystring;
pub mod tokens;
pub mod value;

pub use param::{Index, Param};
pub use querystring::Querystring;
pub use tokens::{Token, TokenKind};
pub use value::Value;
