//! Process-wide catalogs, one per base trait.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::catalog::Catalog;

// One catalog per base trait for the whole process, each created on first
// access. Entries are type-erased; the TypeId of the base trait is the key.
static CATALOGS: Lazy<DashMap<TypeId, Arc<dyn Any + Send + Sync>>> = Lazy::new(DashMap::new);

/// The process-wide catalog for the base trait `B`.
///
/// This is the default part source of [`Factory::create`](crate::Factory::create),
/// playing the role a caller's own compiled unit plays on platforms with
/// assembly scanning: parts registered here, from anywhere in the program,
/// are discovered without passing a catalog around.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use autofactory::global;
///
/// trait Exporter: Send + Sync {}
/// struct Csv;
/// impl Exporter for Csv {}
///
/// global::<dyn Exporter>().register::<Csv>(|part| {
///   part.constructor(|| Arc::new(Csv));
/// });
/// assert!(!global::<dyn Exporter>().is_empty());
/// ```
pub fn global<B: ?Sized + Any>() -> Arc<Catalog<B>> {
  let entry = CATALOGS
    .entry(TypeId::of::<B>())
    .or_insert_with(|| Arc::new(Catalog::<B>::new()) as Arc<dyn Any + Send + Sync>)
    .value()
    .clone();
  entry
    .downcast::<Catalog<B>>()
    .expect("global catalog entry matches its base type id")
}
