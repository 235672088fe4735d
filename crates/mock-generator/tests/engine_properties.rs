//! End-to-end properties of the mock engine over YAML schemas.

use mock_core::{BeanSchema, MockValue, TypeDescriptor};
use mock_generator::{mock, mock_bean, mock_type, MockConfig, MockError, MockerRegistry};
use std::sync::Arc;
use std::thread;

const SCHEMA: &str = r#"
version: 1
beans:
  - name: Node
    fields:
      - name: next
        type: Node
      - name: value
        type: int
  - name: Author
    fields:
      - name: name
        type: string
      - name: book
        type: Book
  - name: Book
    fields:
      - name: title
        type: string
      - name: author
        type: Author
  - name: Leaf
    fields:
      - name: count
        type: int
  - name: Person
    fields:
      - name: name
        type: string
      - name: password
        type: string
        ignore: true
      - name: email
        type: string
  - name: Entity
    abstract: true
    fields:
      - name: id
        type: long
      - name: created
        type: date
  - name: Customer
    extends: Entity
    fields:
      - name: tier
        type: Tier
      - name: tags
        type: list<string>
  - name: Pair
    fields:
      - name: left
        type: Leaf
      - name: right
        type: Leaf
  - name: Page
    type_params: [T]
    fields:
      - name: items
        type: list<T>
      - name: total
        type: int
  - name: Tree
    fields:
      - name: children
        type: list<Tree>
  - name: Box
    type_params: [T]
    fields:
      - name: value
        type: T
  - name: Holder
    fields:
      - name: ints
        type: Box<int>
      - name: words
        type: Box<string>
enums:
  - name: Tier
    variants: [FREE, PRO, ENTERPRISE]
"#;

fn schema() -> BeanSchema {
    let schema = BeanSchema::from_yaml(SCHEMA).unwrap();
    schema.validate().unwrap();
    schema
}

fn config() -> MockConfig {
    MockConfig::new().with_schema(schema()).with_seed(42)
}

#[test]
fn test_self_reference_terminates_with_identity() {
    let mut config = config().with_enabled_circle(true);
    let node = mock_bean("Node", &mut config).unwrap();

    let next = node.get_bean("next").unwrap();
    assert!(next.ptr_eq(&node));
    assert!(matches!(node.get("value"), Some(MockValue::Int(_))));
    node.release_graph();
}

#[test]
fn test_mutual_references_close_the_loop() {
    let mut config = config().with_enabled_circle(true);
    let author = mock_bean("Author", &mut config).unwrap();

    let book = author.get_bean("book").unwrap();
    assert_eq!(book.type_name(), "Book");
    assert!(book.get_bean("author").unwrap().ptr_eq(&author));
    assert!(matches!(book.get("title"), Some(MockValue::String(_))));
    author.release_graph();
}

#[test]
fn test_cycle_through_container() {
    let mut config = config().with_enabled_circle(true).with_size_range(1, 3);
    let tree = mock_bean("Tree", &mut config).unwrap();

    let children = tree.get("children").unwrap();
    let children = children.as_elements().unwrap();
    assert!(!children.is_empty());
    for child in children {
        assert!(child.as_bean().unwrap().ptr_eq(&tree));
    }
    tree.release_graph();
}

#[test]
fn test_single_point_int_range() {
    let mut config = config().with_int_range(1, 1);
    for _ in 0..10 {
        let leaf = mock_bean("Leaf", &mut config).unwrap();
        assert_eq!(leaf.get("count"), Some(MockValue::Int(1)));
    }
}

#[test]
fn test_excluded_field_stays_null() {
    let mut config = config();
    for _ in 0..100 {
        let person = mock_bean("Person", &mut config).unwrap();
        assert_eq!(person.get("password"), Some(MockValue::Null));
        assert!(!person.get("name").unwrap().is_null());
        assert!(!person.get("email").unwrap().is_null());
    }
}

#[test]
fn test_inherited_fields_are_populated() {
    let mut config = config();
    let customer = mock_bean("Customer", &mut config).unwrap();

    assert!(matches!(customer.get("id"), Some(MockValue::Long(_))));
    assert!(matches!(customer.get("created"), Some(MockValue::Date(_))));
    assert!(matches!(
        customer.get("tier").as_ref().and_then(MockValue::as_str),
        Some("FREE" | "PRO" | "ENTERPRISE")
    ));
    assert!(matches!(customer.get("tags"), Some(MockValue::List(_))));
}

#[test]
fn test_same_type_fields_alias_under_protection() {
    // The cache is keyed by type name, so two unrelated Leaf fields of one
    // Pair end up as the same instance while protection is on.
    let mut config = config().with_enabled_circle(true);
    let pair = mock_bean("Pair", &mut config).unwrap();
    let left = pair.get_bean("left").unwrap();
    let right = pair.get_bean("right").unwrap();
    assert!(left.ptr_eq(&right));

    let mut config = config.with_enabled_circle(false);
    let pair = mock_bean("Pair", &mut config).unwrap();
    let left = pair.get_bean("left").unwrap();
    let right = pair.get_bean("right").unwrap();
    assert!(!left.ptr_eq(&right));
}

#[test]
fn test_generic_instances_alias_across_arguments() {
    // The cache key is the raw bean name, so Box<int> and Box<string> share
    // one instance under protection and `words` carries the int payload.
    let mut config = config().with_enabled_circle(true);
    let holder = mock_bean("Holder", &mut config).unwrap();
    let ints = holder.get_bean("ints").unwrap();
    let words = holder.get_bean("words").unwrap();
    assert!(ints.ptr_eq(&words));
    assert!(matches!(words.get("value"), Some(MockValue::Int(_))));

    let mut config = config.with_enabled_circle(false);
    let holder = mock_bean("Holder", &mut config).unwrap();
    let ints = holder.get_bean("ints").unwrap();
    let words = holder.get_bean("words").unwrap();
    assert!(!ints.ptr_eq(&words));
    assert!(matches!(ints.get("value"), Some(MockValue::Int(_))));
    assert!(matches!(words.get("value"), Some(MockValue::String(_))));
}

#[test]
fn test_generic_bean_with_argument() {
    let mut config = config().with_size_range(2, 2);
    let page = mock_type(&"Page<Leaf>".parse().unwrap(), &mut config).unwrap();
    let page = page.as_bean().unwrap();

    let items = page.get("items").unwrap();
    let items = items.as_elements().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .all(|item| item.as_bean().is_some_and(|b| b.type_name() == "Leaf")));
}

#[test]
fn test_unregistered_container_left_at_default() {
    let mut config = config().with_registry(MockerRegistry::empty());
    let customer = mock_bean("Customer", &mut config).unwrap();

    assert_eq!(customer.get("tags"), Some(MockValue::Null));
    assert!(matches!(customer.get("id"), Some(MockValue::Long(_))));
}

#[test]
fn test_errors_abort_the_call() {
    let mut config = config();
    assert!(matches!(
        mock_bean("Entity", &mut config),
        Err(MockError::Construction { .. })
    ));
    assert!(matches!(
        mock_type(&TypeDescriptor::named("Ghost"), &mut config),
        Err(MockError::UnsupportedType(_))
    ));
    assert!(matches!(
        mock_type(&"Page<int, int>".parse().unwrap(), &mut config),
        Err(MockError::Construction { ref type_name, .. }) if type_name == "Page"
    ));

    let mut config = config.with_string_seed(Vec::<String>::new());
    let err = mock_bean("Person", &mut config).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_same_seed_same_output() {
    let mut first = config().with_seed(7);
    let mut second = config().with_seed(7);
    let a: Vec<String> = mock(&mut first).unwrap();
    let b: Vec<String> = mock(&mut second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = Arc::new(schema());
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut config = MockConfig::new()
                    .with_schema(schema)
                    .with_seed(seed)
                    .with_enabled_circle(true);
                let node = mock_bean("Node", &mut config).unwrap();
                let closed = node.get_bean("next").unwrap().ptr_eq(&node);
                node.release_graph();
                closed
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
