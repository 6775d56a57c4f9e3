//! Public macros for ergonomic parameter construction.

/// Builds a `Vec<TypedParameter>` positionally.
///
/// Each element is either a plain expression, declaring the parameter as the
/// value's own type, or `value => Type`, declaring it as `Type` explicitly
/// (for example to pass a concrete `Arc<Cat>` as an `Arc<dyn Animal>`
/// parameter).
///
/// # Examples
///
/// ```
/// use autofactory::params;
///
/// let ps = params![10_i32, String::from("fast")];
/// assert_eq!(ps.len(), 2);
/// assert_eq!(ps[0].key().short_name(), "i32");
/// ```
///
/// ```
/// use std::sync::Arc;
/// use autofactory::params;
///
/// trait Animal: Send + Sync {}
/// struct Cat;
/// impl Animal for Cat {}
///
/// let ps = params![Arc::new(Cat) => Arc<dyn Animal>, 10_i32];
/// assert!(ps[0].key().name().contains("Animal"));
/// ```
#[macro_export]
macro_rules! params {
  () => {
    ::std::vec::Vec::<$crate::TypedParameter>::new()
  };
  ($($rest:tt)+) => {{
    let mut params = ::std::vec::Vec::new();
    $crate::__params_push!(params; $($rest)+);
    params
  }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __params_push {
  ($vec:ident; $value:expr => $ty:ty, $($rest:tt)+) => {
    $vec.push($crate::TypedParameter::of::<$ty>($value));
    $crate::__params_push!($vec; $($rest)+);
  };
  ($vec:ident; $value:expr => $ty:ty $(,)?) => {
    $vec.push($crate::TypedParameter::of::<$ty>($value));
  };
  ($vec:ident; $value:expr, $($rest:tt)+) => {
    $vec.push($crate::TypedParameter::of($value));
    $crate::__params_push!($vec; $($rest)+);
  };
  ($vec:ident; $value:expr $(,)?) => {
    $vec.push($crate::TypedParameter::of($value));
  };
}
