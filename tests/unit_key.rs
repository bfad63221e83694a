/// Unit tests for Key identity semantics

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use wiring::{key_of_type, Key};

trait Plugin: Send + Sync {}

#[test]
fn test_key_display_name_type() {
    let key = Key::Type(TypeId::of::<String>(), "alloc::string::String");
    assert_eq!(key.display_name(), "alloc::string::String");
    assert_eq!(key.type_id(), Some(TypeId::of::<String>()));
}

#[test]
fn test_key_display_name_token() {
    let key = Key::Token("database_port".to_string());
    assert_eq!(key.display_name(), "database_port");
    assert_eq!(key.type_id(), None);
}

#[test]
fn test_type_key_equality_ignores_name() {
    let a = Key::Type(TypeId::of::<u32>(), "u32");
    let b = Key::Type(TypeId::of::<u32>(), "renamed");
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_key_of_type_is_canonical() {
    assert_eq!(key_of_type::<Arc<dyn Plugin>>(), key_of_type::<Arc<dyn Plugin>>());
    assert_ne!(key_of_type::<u32>(), key_of_type::<u64>());
    assert_ne!(key_of_type::<Arc<dyn Plugin>>(), key_of_type::<Box<dyn Plugin>>());
    // unsized types have identities too
    assert_eq!(key_of_type::<dyn Plugin>().type_id(), Some(TypeId::of::<dyn Plugin>()));
}

#[test]
fn test_token_and_type_spaces_never_collide() {
    let by_type = key_of_type::<String>();
    let by_token = Key::Token(by_type.display_name().to_string());
    assert_ne!(by_type, by_token);

    let set: HashSet<Key> = [by_type, by_token].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_tokens_compare_by_text() {
    assert_eq!(Key::Token("a".into()), Key::Token("a".into()));
    assert_ne!(Key::Token("a".into()), Key::Token("A".into()));
}
