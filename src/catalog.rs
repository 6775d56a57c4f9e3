//! The part catalog: an explicit, ordered registry of concrete types
//! implementing one base trait.
//!
//! A [`Catalog`] is the stand-in for a scanned assembly: where reflective
//! platforms discover implementing types at runtime, here each concrete type
//! is registered once, together with its constructor overloads and any
//! metadata tags. Registration order is preserved and becomes the discovery
//! order of every factory composed from the catalog.

use std::any::{type_name, Any, TypeId};
use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{BindFn, ConstructorSpec, Part, Thunk};
use crate::error::BoxError;
use crate::params::{TypeKey, TypedParameter};

pub(crate) struct Registration<B: ?Sized> {
  key: TypeKey,
  constructors: Vec<ConstructorSpec<B>>,
  tags: Vec<Arc<dyn Any + Send + Sync>>,
}

/// An ordered, thread-safe registry of the concrete parts of base trait `B`.
pub struct Catalog<B: ?Sized + 'static> {
  entries: RwLock<Vec<Registration<B>>>,
}

impl<B: ?Sized + 'static> Catalog<B> {
  pub fn new() -> Self {
    Self {
      entries: RwLock::new(Vec::new()),
    }
  }

  /// Registers the concrete type `C` as a part of `B`.
  ///
  /// The closure configures the part's constructor overloads and metadata
  /// tags on the given [`PartBuilder`]. The construction closures must
  /// produce instances of `C`; the unsize coercion to `Arc<B>` happens at
  /// the call site, where the concrete type is known:
  ///
  /// ```
  /// use std::sync::Arc;
  /// use autofactory::Catalog;
  ///
  /// trait Codec: Send + Sync {}
  /// struct Json;
  /// impl Codec for Json {}
  ///
  /// let catalog = Catalog::<dyn Codec>::new();
  /// catalog.register::<Json>(|part| {
  ///   part.constructor(|| Arc::new(Json)).tag("text");
  /// });
  /// assert_eq!(catalog.len(), 1);
  /// ```
  ///
  /// Registering a type that is already present replaces the earlier
  /// registration in place: the last registration wins and the original
  /// order position is kept.
  pub fn register<C: Any>(&self, configure: impl FnOnce(&mut PartBuilder<B>)) {
    let mut builder = PartBuilder::new(TypeKey::of::<C>());
    configure(&mut builder);
    let registration = builder.finish();
    tracing::debug!(
      base = type_name::<B>(),
      part = registration.key.name(),
      constructors = registration.constructors.len(),
      "registered part"
    );
    let mut entries = self.entries.write();
    match entries.iter_mut().find(|r| r.key == registration.key) {
      Some(slot) => *slot = registration,
      None => entries.push(registration),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }

  /// Appends one part per composable registration, in registration order.
  ///
  /// A registration is skipped when its type was already composed from an
  /// earlier catalog, or when none of its constructors matches the supplied
  /// parameter shape. Discovery is best-effort per type; nothing is
  /// constructed here.
  pub(crate) fn compose_into(
    &self,
    params: &[TypedParameter],
    seen: &mut HashSet<TypeId>,
    parts: &mut Vec<Part<B>>,
  ) {
    for registration in self.entries.read().iter() {
      if seen.contains(&registration.key.id()) {
        continue;
      }
      let Some(spec) = registration.constructors.iter().find(|c| c.matches(params)) else {
        continue;
      };
      let Some(thunk) = (spec.bind)(params) else {
        continue;
      };
      seen.insert(registration.key.id());
      parts.push(Part::new(registration.key, registration.tags.clone(), thunk));
    }
  }
}

impl<B: ?Sized + 'static> Default for Catalog<B> {
  fn default() -> Self {
    Self::new()
  }
}

/// Configures one part inside [`Catalog::register`].
///
/// A part may declare several constructor overloads; at composition time the
/// first overload whose declared parameter sequence matches the supplied
/// parameters in type and order is selected. Parameter types must be `Clone`
/// because the same supplied values are handed to every composed part.
pub struct PartBuilder<B: ?Sized + 'static> {
  key: TypeKey,
  constructors: Vec<ConstructorSpec<B>>,
  tags: Vec<Arc<dyn Any + Send + Sync>>,
}

impl<B: ?Sized + 'static> PartBuilder<B> {
  fn new(key: TypeKey) -> Self {
    Self {
      key,
      constructors: Vec::new(),
      tags: Vec::new(),
    }
  }

  fn finish(self) -> Registration<B> {
    Registration {
      key: self.key,
      constructors: self.constructors,
      tags: self.tags,
    }
  }

  fn push(&mut self, params: Vec<TypeKey>, bind: BindFn<B>) -> &mut Self {
    self.constructors.push(ConstructorSpec { params, bind });
    self
  }

  /// Parameterless constructor.
  pub fn constructor<F>(&mut self, build: F) -> &mut Self
  where
    F: Fn() -> Arc<B> + Send + Sync + 'static,
  {
    self.try_constructor(move || Ok(build()))
  }

  /// Parameterless fallible constructor. The error becomes the preserved
  /// cause of a [`ResolveError::Construction`](crate::ResolveError).
  pub fn try_constructor<F>(&mut self, build: F) -> &mut Self
  where
    F: Fn() -> Result<Arc<B>, BoxError> + Send + Sync + 'static,
  {
    let build = Arc::new(build);
    self.push(
      Vec::new(),
      Box::new(move |_supplied: &[TypedParameter]| {
        let build = Arc::clone(&build);
        Some(Box::new(move || build()) as Thunk<B>)
      }),
    )
  }

  /// One-parameter constructor, matched against a single supplied parameter
  /// declared as `P1`.
  pub fn constructor1<P1, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    F: Fn(P1) -> Arc<B> + Send + Sync + 'static,
  {
    self.try_constructor1(move |p1| Ok(build(p1)))
  }

  pub fn try_constructor1<P1, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    F: Fn(P1) -> Result<Arc<B>, BoxError> + Send + Sync + 'static,
  {
    let build = Arc::new(build);
    self.push(
      vec![TypeKey::of::<P1>()],
      Box::new(move |supplied: &[TypedParameter]| {
        let p1 = supplied.first()?.value_as::<P1>()?.clone();
        let build = Arc::clone(&build);
        Some(Box::new(move || build(p1.clone())) as Thunk<B>)
      }),
    )
  }

  /// Two-parameter constructor. Matching is positional, so overloads taking
  /// the same types in a different order are distinct.
  pub fn constructor2<P1, P2, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    P2: Any + Send + Sync + Clone,
    F: Fn(P1, P2) -> Arc<B> + Send + Sync + 'static,
  {
    self.try_constructor2(move |p1, p2| Ok(build(p1, p2)))
  }

  pub fn try_constructor2<P1, P2, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    P2: Any + Send + Sync + Clone,
    F: Fn(P1, P2) -> Result<Arc<B>, BoxError> + Send + Sync + 'static,
  {
    let build = Arc::new(build);
    self.push(
      vec![TypeKey::of::<P1>(), TypeKey::of::<P2>()],
      Box::new(move |supplied: &[TypedParameter]| {
        let p1 = supplied.first()?.value_as::<P1>()?.clone();
        let p2 = supplied.get(1)?.value_as::<P2>()?.clone();
        let build = Arc::clone(&build);
        Some(Box::new(move || build(p1.clone(), p2.clone())) as Thunk<B>)
      }),
    )
  }

  /// Three-parameter constructor.
  pub fn constructor3<P1, P2, P3, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    P2: Any + Send + Sync + Clone,
    P3: Any + Send + Sync + Clone,
    F: Fn(P1, P2, P3) -> Arc<B> + Send + Sync + 'static,
  {
    self.try_constructor3(move |p1, p2, p3| Ok(build(p1, p2, p3)))
  }

  pub fn try_constructor3<P1, P2, P3, F>(&mut self, build: F) -> &mut Self
  where
    P1: Any + Send + Sync + Clone,
    P2: Any + Send + Sync + Clone,
    P3: Any + Send + Sync + Clone,
    F: Fn(P1, P2, P3) -> Result<Arc<B>, BoxError> + Send + Sync + 'static,
  {
    let build = Arc::new(build);
    self.push(
      vec![TypeKey::of::<P1>(), TypeKey::of::<P2>(), TypeKey::of::<P3>()],
      Box::new(move |supplied: &[TypedParameter]| {
        let p1 = supplied.first()?.value_as::<P1>()?.clone();
        let p2 = supplied.get(1)?.value_as::<P2>()?.clone();
        let p3 = supplied.get(2)?.value_as::<P3>()?.clone();
        let build = Arc::clone(&build);
        Some(Box::new(move || build(p1.clone(), p2.clone(), p3.clone())) as Thunk<B>)
      }),
    )
  }

  /// Attaches a metadata tag to the part.
  ///
  /// Tags are queried by [`Factory::seek_parts_by_tag`](crate::Factory::seek_parts_by_tag).
  /// A part may carry any number of tags, including several tags of the same
  /// Rust type.
  pub fn tag<A: Any + Send + Sync>(&mut self, tag: A) -> &mut Self {
    self.tags.push(Arc::new(tag));
    self
  }
}
