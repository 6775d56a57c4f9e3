//! The factory facade: composition over catalogs and predicate-based
//! selection of lazily constructed parts.

use std::any::{type_name, Any};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::core::Part;
use crate::error::{ConfigError, ResolveError};
use crate::global::global;
use crate::params::{TypeKey, TypedParameter};

/// A factory of the discovered parts of base trait `B`.
///
/// Composed once from one or more [`Catalog`]s and a set of typed
/// constructor parameters, then queried. The part set is immutable after
/// composition; each part's instance is constructed at most once, on first
/// access, and shared by every subsequent lookup.
pub struct Factory<B: ?Sized + 'static> {
  base: &'static str,
  parts: Vec<Part<B>>,
}

impl<B: ?Sized + Any> Factory<B> {
  /// Composes a factory over the process-wide [`global`] catalog for `B`.
  pub fn create(params: &[TypedParameter]) -> Self {
    let catalog = global::<B>();
    Self::compose(&[&*catalog], params)
  }

  /// Composes a factory over a single explicit catalog.
  pub fn from_catalog(catalog: &Catalog<B>, params: &[TypedParameter]) -> Self {
    Self::compose(&[catalog], params)
  }

  /// Composes a factory over several catalogs, in order. A concrete type
  /// appearing in more than one catalog yields a single part, from the
  /// first catalog able to compose it.
  pub fn from_catalogs(
    catalogs: &[&Catalog<B>],
    params: &[TypedParameter],
  ) -> Result<Self, ConfigError> {
    if catalogs.is_empty() {
      return Err(ConfigError::NoCatalogs {
        base: type_name::<B>(),
      });
    }
    Ok(Self::compose(catalogs, params))
  }

  /// Positional-array form of [`Factory::create`]: `values[i]` is declared
  /// as `types[i]`. Semantically equivalent to pairing the arrays into
  /// [`TypedParameter`]s.
  pub fn create_raw(
    values: Vec<Box<dyn Any + Send + Sync>>,
    types: &[TypeKey],
  ) -> Result<Self, ConfigError> {
    let params = pair_raw(values, types)?;
    Ok(Self::create(&params))
  }

  /// Positional-array form of [`Factory::from_catalogs`].
  pub fn from_catalogs_raw(
    catalogs: &[&Catalog<B>],
    values: Vec<Box<dyn Any + Send + Sync>>,
    types: &[TypeKey],
  ) -> Result<Self, ConfigError> {
    let params = pair_raw(values, types)?;
    Self::from_catalogs(catalogs, &params)
  }

  fn compose(catalogs: &[&Catalog<B>], params: &[TypedParameter]) -> Self {
    let mut seen = HashSet::new();
    let mut parts = Vec::new();
    for catalog in catalogs {
      catalog.compose_into(params, &mut seen, &mut parts);
    }
    let base = type_name::<B>();
    tracing::debug!(base, parts = parts.len(), "composed factory");
    Self { base, parts }
  }

  /// The concrete type of every discovered part, in discovery order.
  /// A pure metadata query: realizes nothing, and the order is stable
  /// across repeated calls.
  pub fn part_types(&self) -> Vec<TypeKey> {
    self.parts.iter().map(|p| p.key).collect()
  }

  pub fn len(&self) -> usize {
    self.parts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parts.is_empty()
  }

  /// The instance of every part whose concrete type satisfies `predicate`,
  /// in discovery order.
  ///
  /// The returned sequence is a one-pass lazy projection: each matching
  /// part is realized as its element is consumed. A failed realization
  /// yields one `Err` and ends the sequence.
  pub fn seek_parts(&self, predicate: impl Fn(&TypeKey) -> bool) -> PartsIter<'_, B> {
    let matched = self.parts.iter().filter(|p| predicate(&p.key)).collect();
    PartsIter::new(self.base, matched)
  }

  /// The single part whose concrete type satisfies `predicate`.
  ///
  /// Strictly single-or-error: zero matches is [`ResolveError::NotFound`]
  /// and more than one is [`ResolveError::Ambiguous`]. Nothing is realized
  /// unless the match is unique.
  pub fn seek_part(&self, predicate: impl Fn(&TypeKey) -> bool) -> Result<Arc<B>, ResolveError> {
    let mut matched = self.parts.iter().filter(|p| predicate(&p.key));
    let part = matched.next().ok_or(ResolveError::NotFound { base: self.base })?;
    let extra = matched.count();
    if extra > 0 {
      return Err(ResolveError::Ambiguous {
        base: self.base,
        count: extra + 1,
      });
    }
    part.instance(self.base)
  }

  /// The instances of parts carrying a tag of type `A` that satisfies
  /// `predicate`, in discovery order.
  ///
  /// A part is yielded once per qualifying tag: a type tagged twice with
  /// tags that both satisfy the predicate appears twice in the sequence
  /// (both entries share the one memoized instance).
  pub fn seek_parts_by_tag<A: Any>(&self, predicate: impl Fn(&A) -> bool) -> PartsIter<'_, B> {
    let mut matched = Vec::new();
    for part in &self.parts {
      for tag in &part.tags {
        if tag.downcast_ref::<A>().map_or(false, &predicate) {
          matched.push(part);
        }
      }
    }
    PartsIter::new(self.base, matched)
  }

  /// Single-or-error selection over the tag-expanded sequence of
  /// [`Factory::seek_parts_by_tag`]. A part whose tags qualify twice counts
  /// as two matches.
  pub fn seek_part_by_tag<A: Any>(
    &self,
    predicate: impl Fn(&A) -> bool,
  ) -> Result<Arc<B>, ResolveError> {
    let mut found: Option<&Part<B>> = None;
    let mut count = 0usize;
    for part in &self.parts {
      for tag in &part.tags {
        if tag.downcast_ref::<A>().map_or(false, &predicate) {
          found = Some(part);
          count += 1;
        }
      }
    }
    match (found, count) {
      (Some(part), 1) => part.instance(self.base),
      (None, _) => Err(ResolveError::NotFound { base: self.base }),
      (Some(_), count) => Err(ResolveError::Ambiguous {
        base: self.base,
        count,
      }),
    }
  }

  /// The part whose concrete type is exactly `C`, independent of any
  /// predicate-based lookup.
  pub fn get_part<C: Any>(&self) -> Result<Arc<B>, ResolveError> {
    self.get_part_by_key(&TypeKey::of::<C>())
  }

  /// The part whose concrete type is exactly `key`, by runtime key.
  pub fn get_part_by_key(&self, key: &TypeKey) -> Result<Arc<B>, ResolveError> {
    self
      .parts
      .iter()
      .find(|p| p.key.id() == key.id())
      .ok_or(ResolveError::UnknownPart {
        base: self.base,
        part: key.name(),
      })?
      .instance(self.base)
  }
}

impl<B: ?Sized + 'static> fmt::Debug for Factory<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Factory")
      .field("base", &self.base)
      .field("parts", &self.parts.iter().map(|p| p.key).collect::<Vec<_>>())
      .finish()
  }
}

fn pair_raw(
  values: Vec<Box<dyn Any + Send + Sync>>,
  types: &[TypeKey],
) -> Result<Vec<TypedParameter>, ConfigError> {
  if values.len() != types.len() {
    return Err(ConfigError::ParameterArity {
      values: values.len(),
      types: types.len(),
    });
  }
  values
    .into_iter()
    .zip(types)
    .map(|(value, key)| TypedParameter::new(*key, value))
    .collect()
}

/// Lazy one-pass sequence returned by [`Factory::seek_parts`] and
/// [`Factory::seek_parts_by_tag`].
///
/// Elements are realized as they are consumed. After yielding an `Err` the
/// iterator is fused: the remainder of that consumption is aborted.
pub struct PartsIter<'f, B: ?Sized + 'static> {
  base: &'static str,
  inner: std::vec::IntoIter<&'f Part<B>>,
  failed: bool,
}

impl<'f, B: ?Sized + 'static> PartsIter<'f, B> {
  fn new(base: &'static str, matched: Vec<&'f Part<B>>) -> Self {
    Self {
      base,
      inner: matched.into_iter(),
      failed: false,
    }
  }
}

impl<'f, B: ?Sized + 'static> Iterator for PartsIter<'f, B> {
  type Item = Result<Arc<B>, ResolveError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }
    let part = self.inner.next()?;
    match part.instance(self.base) {
      Ok(instance) => Some(Ok(instance)),
      Err(err) => {
        self.failed = true;
        Some(Err(err))
      }
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.failed {
      (0, Some(0))
    } else {
      (0, self.inner.size_hint().1)
    }
  }
}
