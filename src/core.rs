//! Core, non-public data structures for catalogs and factories.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{BoxError, ResolveError};
use crate::params::{TypeKey, TypedParameter};

/// A deferred constructor invocation with its parameters already bound.
pub(crate) type Thunk<B> = Box<dyn Fn() -> Result<Arc<B>, BoxError> + Send + Sync>;

/// Binds supplied parameters into a [`Thunk`]. Returns `None` when a value
/// cannot be extracted positionally; the candidate is then skipped.
pub(crate) type BindFn<B> = Box<dyn Fn(&[TypedParameter]) -> Option<Thunk<B>> + Send + Sync>;

/// One registered constructor: its declared positional parameter types and
/// the bind function that closes over the user's construction closure.
pub(crate) struct ConstructorSpec<B: ?Sized> {
  pub(crate) params: Vec<TypeKey>,
  pub(crate) bind: BindFn<B>,
}

impl<B: ?Sized> ConstructorSpec<B> {
  /// A constructor qualifies when its declared parameter sequence matches
  /// the supplied parameters in type and order.
  pub(crate) fn matches(&self, supplied: &[TypedParameter]) -> bool {
    self.params.len() == supplied.len()
      && self
        .params
        .iter()
        .zip(supplied)
        .all(|(declared, supplied)| declared.id() == supplied.key().id())
  }
}

/// A discovered part: its concrete type key, its metadata tags, and the
/// lazily realized instance.
pub(crate) struct Part<B: ?Sized> {
  pub(crate) key: TypeKey,
  pub(crate) tags: Vec<Arc<dyn Any + Send + Sync>>,
  cell: OnceCell<Arc<B>>,
  thunk: Thunk<B>,
}

impl<B: ?Sized> Part<B> {
  pub(crate) fn new(key: TypeKey, tags: Vec<Arc<dyn Any + Send + Sync>>, thunk: Thunk<B>) -> Self {
    Self {
      key,
      tags,
      cell: OnceCell::new(),
      thunk,
    }
  }

  /// Realizes the instance, at most once per part. Concurrent callers are
  /// serialized by the cell and all observe the same `Arc`.
  pub(crate) fn instance(&self, base: &'static str) -> Result<Arc<B>, ResolveError> {
    self
      .cell
      .get_or_try_init(|| {
        tracing::trace!(base, part = self.key.name(), "realizing part");
        (self.thunk)()
      })
      .map(Arc::clone)
      .map_err(|source| ResolveError::Construction {
        base,
        part: self.key.name(),
        source,
      })
  }
}
