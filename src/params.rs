//! Public descriptors: type identity and typed constructor parameters.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Identity of a Rust type: its `TypeId` paired with its name.
///
/// Used both as the concrete-type descriptor of a part and as the declared
/// type of a constructor parameter. Selection predicates receive a `TypeKey`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  /// The fully qualified type name.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The unqualified type name, with the module path stripped. Best effort
  /// for generic types, whose names embed their arguments.
  pub fn short_name(&self) -> &'static str {
    self.name.rsplit("::").next().unwrap_or(self.name)
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

/// An immutable pairing of a declared type and a value, describing one
/// positional constructor argument.
///
/// The declared type is what constructor matching goes by, which is what
/// disambiguates overloaded constructors whose parameters could both accept
/// the value. [`TypedParameter::of`] declares the parameter as the static
/// type `T`, which may be wider than the value's origin:
///
/// ```
/// use std::sync::Arc;
/// use autofactory::TypedParameter;
///
/// trait Animal: Send + Sync {}
/// struct Cat;
/// impl Animal for Cat {}
///
/// // Declared as `Arc<dyn Animal>`, even though the value is a `Cat`.
/// let friend = TypedParameter::of::<Arc<dyn Animal>>(Arc::new(Cat));
/// assert!(friend.key().name().contains("Animal"));
/// ```
#[derive(Clone)]
pub struct TypedParameter {
  key: TypeKey,
  value: Arc<dyn Any + Send + Sync>,
}

impl TypedParameter {
  /// Declares the parameter as the static type of `value`.
  pub fn of<T: Any + Send + Sync>(value: T) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      value: Arc::new(value),
    }
  }

  /// Pairs an erased value with an explicit declared type.
  ///
  /// Fails when the value is not of the declared type: erased values carry
  /// their exact type only, so unlike [`TypedParameter::of`] no widening is
  /// possible here.
  pub fn new(key: TypeKey, value: Box<dyn Any + Send + Sync>) -> Result<Self, ConfigError> {
    if (*value).type_id() != key.id() {
      return Err(ConfigError::ParameterType {
        declared: key.name(),
      });
    }
    Ok(Self {
      key,
      value: Arc::from(value),
    })
  }

  /// The declared type of this parameter.
  pub fn key(&self) -> TypeKey {
    self.key
  }

  pub(crate) fn value_as<P: Any>(&self) -> Option<&P> {
    self.value.downcast_ref::<P>()
  }
}

impl fmt::Debug for TypedParameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypedParameter({})", self.key.name())
  }
}
