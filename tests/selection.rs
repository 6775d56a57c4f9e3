use std::sync::Arc;

use autofactory::{params, Catalog, Factory, ResolveError, TypeKey};

// --- Test Fixtures ---

trait Animal: Send + Sync {
  fn name(&self) -> &'static str;
  fn age(&self) -> i32;
  fn friend(&self) -> Option<Arc<dyn Animal>>;
  // Which constructor overload built this instance.
  fn ctor(&self) -> &'static str;
}

struct Dog {
  age: i32,
  friend: Option<Arc<dyn Animal>>,
  ctor: &'static str,
}

impl Dog {
  fn new() -> Self {
    Self { age: 0, friend: None, ctor: "()" }
  }
  fn with_age(age: i32) -> Self {
    Self { age, friend: None, ctor: "(age)" }
  }
  fn with_friend(friend: Arc<dyn Animal>) -> Self {
    Self { age: 0, friend: Some(friend), ctor: "(friend)" }
  }
  fn with_friend_age(friend: Arc<dyn Animal>, age: i32) -> Self {
    Self { age, friend: Some(friend), ctor: "(friend, age)" }
  }
  fn with_age_friend(age: i32, friend: Arc<dyn Animal>) -> Self {
    Self { age, friend: Some(friend), ctor: "(age, friend)" }
  }
}

impl Animal for Dog {
  fn name(&self) -> &'static str {
    "Dog"
  }
  fn age(&self) -> i32 {
    self.age
  }
  fn friend(&self) -> Option<Arc<dyn Animal>> {
    self.friend.clone()
  }
  fn ctor(&self) -> &'static str {
    self.ctor
  }
}

struct Cat {
  age: i32,
  ctor: &'static str,
}

impl Cat {
  fn new() -> Self {
    Self { age: 0, ctor: "()" }
  }
  fn with_age(age: i32) -> Self {
    Self { age, ctor: "(age)" }
  }
}

impl Animal for Cat {
  fn name(&self) -> &'static str {
    "Cat"
  }
  fn age(&self) -> i32 {
    self.age
  }
  fn friend(&self) -> Option<Arc<dyn Animal>> {
    None
  }
  fn ctor(&self) -> &'static str {
    self.ctor
  }
}

struct Duck {
  age: i32,
  ctor: &'static str,
}

impl Duck {
  fn new() -> Self {
    Self { age: 0, ctor: "()" }
  }
  fn with_age(age: i32) -> Self {
    Self { age, ctor: "(age)" }
  }
}

impl Animal for Duck {
  fn name(&self) -> &'static str {
    "Duck"
  }
  fn age(&self) -> i32 {
    self.age
  }
  fn friend(&self) -> Option<Arc<dyn Animal>> {
    None
  }
  fn ctor(&self) -> &'static str {
    self.ctor
  }
}

fn animal_catalog() -> Catalog<dyn Animal> {
  let catalog = Catalog::<dyn Animal>::new();
  catalog.register::<Dog>(|part| {
    part
      .constructor(|| Arc::new(Dog::new()))
      .constructor1(|age: i32| Arc::new(Dog::with_age(age)))
      .constructor1(|friend: Arc<dyn Animal>| Arc::new(Dog::with_friend(friend)))
      .constructor2(|friend: Arc<dyn Animal>, age: i32| Arc::new(Dog::with_friend_age(friend, age)))
      .constructor2(|age: i32, friend: Arc<dyn Animal>| Arc::new(Dog::with_age_friend(age, friend)));
  });
  catalog.register::<Cat>(|part| {
    part
      .constructor(|| Arc::new(Cat::new()))
      .constructor1(|age: i32| Arc::new(Cat::with_age(age)));
  });
  catalog.register::<Duck>(|part| {
    part
      .constructor(|| Arc::new(Duck::new()))
      .constructor1(|age: i32| Arc::new(Duck::with_age(age)));
  });
  catalog
}

// --- Selection Tests ---

#[test]
fn seek_part_returns_the_unique_match_with_injected_age() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![10_i32]);

  let cat = factory.seek_part(|t| t.short_name() == "Cat").unwrap();
  assert_eq!(cat.name(), "Cat");
  assert_eq!(cat.age(), 10);
  assert_eq!(cat.ctor(), "(age)");
}

#[test]
fn seek_part_fails_on_multiple_matches() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![10_i32]);

  let err = factory.seek_part(|t| t.short_name() != "Cat").err().unwrap();
  assert!(matches!(err, ResolveError::Ambiguous { count: 2, .. }));
}

#[test]
fn seek_part_fails_on_zero_matches() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![]);

  let err = factory.seek_part(|t| t.short_name() == "Goose").err().unwrap();
  assert!(matches!(err, ResolveError::NotFound { .. }));
}

#[test]
fn seek_parts_yields_matches_in_discovery_order() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![]);

  let all: Vec<_> = factory
    .seek_parts(|_| true)
    .collect::<Result<_, _>>()
    .unwrap();
  let names: Vec<_> = all.iter().map(|a| a.name()).collect();
  assert_eq!(names, ["Dog", "Cat", "Duck"]);
  // Parameterless composition picked the parameterless overloads.
  assert!(all.iter().all(|a| a.ctor() == "()" && a.age() == 0));
}

#[test]
fn part_types_is_a_stable_metadata_query() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![10_i32]);

  let first = factory.part_types();
  let second = factory.part_types();
  assert_eq!(first, second);
  assert_eq!(first.len(), 3);
  assert_eq!(first[0], TypeKey::of::<Dog>());
  assert_eq!(first[1].short_name(), "Cat");
}

#[test]
fn parts_without_a_matching_constructor_are_skipped() {
  let catalog = animal_catalog();
  // Only Dog has a (friend) overload; Cat and Duck drop out of discovery.
  let factory = Factory::from_catalog(
    &catalog,
    &params![Arc::new(Cat::with_age(5)) => Arc<dyn Animal>],
  );

  assert_eq!(factory.len(), 1);
  let dog = factory.seek_part(|t| t.short_name() == "Dog").unwrap();
  assert_eq!(dog.ctor(), "(friend)");
  assert_eq!(dog.friend().unwrap().age(), 5);
  assert_eq!(dog.friend().unwrap().name(), "Cat");
}

#[test]
fn constructor_overloads_are_matched_positionally() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(
    &catalog,
    &params![Arc::new(Cat::with_age(2)) => Arc<dyn Animal>, 1_i32],
  );

  let dog = factory.seek_part(|t| t.short_name() == "Dog").unwrap();
  assert_eq!(dog.ctor(), "(friend, age)");
  assert_eq!(dog.age(), 1);
  assert_eq!(dog.friend().unwrap().age(), 2);
}

#[test]
fn reversed_parameter_order_selects_the_other_overload() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(
    &catalog,
    &params![1_i32, Arc::new(Cat::with_age(2)) => Arc<dyn Animal>],
  );

  let dog = factory.seek_part(|t| t.short_name() == "Dog").unwrap();
  assert_eq!(dog.ctor(), "(age, friend)");
  assert_eq!(dog.age(), 1);
  assert_eq!(dog.friend().unwrap().age(), 2);
}

#[test]
fn get_part_resolves_by_exact_concrete_type() {
  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![10_i32]);

  let duck = factory.get_part::<Duck>().unwrap();
  assert_eq!(duck.name(), "Duck");
  assert_eq!(duck.age(), 10);

  // The runtime-key form resolves the same part.
  let again = factory.get_part_by_key(&TypeKey::of::<Duck>()).unwrap();
  assert_eq!(again.name(), "Duck");
}

#[test]
fn get_part_fails_for_an_undiscovered_type() {
  struct Goose;

  let catalog = animal_catalog();
  let factory = Factory::from_catalog(&catalog, &params![]);

  let err = factory.get_part::<Goose>().err().unwrap();
  assert!(matches!(err, ResolveError::UnknownPart { .. }));
  assert!(err.to_string().contains("Goose"));
}
