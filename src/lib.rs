//! # autofactory
//!
//! A convention-based factory of strategies. Register the concrete
//! implementations of a base trait in a [`Catalog`] (or the process-wide
//! [`global`] catalog), then compose a [`Factory`] that lets callers select
//! instances by predicate on the concrete type or on metadata tags, without
//! a hand-written registry at every call site.
//!
//! ## Core concepts
//!
//! - **Part**: a registered concrete type implementing the base trait, plus
//!   its lazily constructed instance.
//! - **Catalog**: an ordered registry of parts for one base trait, the
//!   stand-in for a scanned assembly. Each part declares one or more
//!   constructor overloads and optional metadata tags.
//! - **Typed parameter**: a (declared type, value) pair injected into part
//!   constructors; overloads are matched positionally by declared type, so
//!   two constructors taking the same types in a different order stay
//!   unambiguous.
//! - **Realization**: a part's constructor runs at most once per factory,
//!   on first access; every lookup afterwards shares the same `Arc`.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use autofactory::{global, params, Factory};
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct English {
//!   greeting: String,
//! }
//! impl Greeter for English {
//!   fn greet(&self) -> String {
//!     self.greeting.clone()
//!   }
//! }
//!
//! struct German;
//! impl Greeter for German {
//!   fn greet(&self) -> String {
//!     "Hallo!".to_string()
//!   }
//! }
//!
//! // Register the concrete greeters once, from anywhere in the program.
//! let catalog = global::<dyn Greeter>();
//! catalog.register::<English>(|part| {
//!   part.constructor1(|greeting: String| Arc::new(English { greeting }));
//! });
//! catalog.register::<German>(|part| {
//!   part.constructor(|| Arc::new(German));
//! });
//!
//! // Compose a factory, injecting a String constructor parameter. German
//! // only has a parameterless constructor, so it is skipped here.
//! let factory = Factory::<dyn Greeter>::create(&params![String::from("Hello!")]);
//! assert_eq!(factory.len(), 1);
//!
//! // Select by predicate on the concrete type; construction happens lazily.
//! let english = factory.seek_part(|t| t.short_name() == "English")?;
//! assert_eq!(english.greet(), "Hello!");
//! # Ok::<(), autofactory::ResolveError>(())
//! ```

mod catalog;
mod core;
mod error;
mod factory;
mod global;
mod macros;
mod params;

pub use catalog::{Catalog, PartBuilder};
pub use error::{BoxError, ConfigError, ResolveError};
pub use factory::{Factory, PartsIter};
pub use global::global;
pub use params::{TypeKey, TypedParameter};
