/// Registration-time validation of constructors

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wiring::{
    BoxError, Container, ContainerExt, DiError, Instance, Lifecycle, RawConstructor, ReturnSlot, Signature,
    WireContainer,
};

fn raw(signature: Signature) -> RawConstructor {
    RawConstructor::function(signature, |_| Ok(Some(Instance::new(0u8))))
}

#[test]
fn value_is_not_a_recipe() {
    let container = WireContainer::new();
    let err = container
        .register_type(Lifecycle::Singleton, RawConstructor::value("ready".to_string()))
        .unwrap_err();
    assert!(matches!(err, DiError::InvalidRecipeKind("alloc::string::String")));

    let err = container
        .register_token("t", Lifecycle::Transient, RawConstructor::value(1u8))
        .unwrap_err();
    assert!(matches!(err, DiError::InvalidRecipeKind("u8")));
    assert!(!container.has_token("t"));
}

#[test]
fn return_arity_must_be_one_or_two() {
    let container = WireContainer::new();
    let err = container
        .register_type(Lifecycle::Singleton, raw(Signature::new()))
        .unwrap_err();
    assert!(matches!(err, DiError::InvalidReturnArity(0)));

    let three = Signature::new()
        .returns(ReturnSlot::value::<u8>())
        .returns(ReturnSlot::error::<BoxError>())
        .returns(ReturnSlot::value::<u16>());
    let err = container.register_type(Lifecycle::Transient, raw(three)).unwrap_err();
    assert!(matches!(err, DiError::InvalidReturnArity(3)));
    assert!(!container.has::<u8>());
}

#[test]
fn error_cannot_be_primary() {
    let container = WireContainer::new();
    for slot in [
        ReturnSlot::value::<DiError>(),
        ReturnSlot::value::<io::Error>(),
        ReturnSlot::value::<BoxError>(),
        ReturnSlot::value::<Arc<dyn std::error::Error + Send + Sync>>(),
        ReturnSlot::error::<String>(),
    ] {
        let err = container
            .register_type(Lifecycle::Singleton, raw(Signature::new().returns(slot)))
            .unwrap_err();
        assert!(matches!(err, DiError::ErrorAsPrimaryReturn(_)), "{err}");
    }
}

#[test]
fn second_return_must_be_error() {
    let container = WireContainer::new();
    let signature = Signature::new()
        .returns(ReturnSlot::value::<u8>())
        .returns(ReturnSlot::value::<String>());
    let err = container
        .register_token("t", Lifecycle::Singleton, raw(signature))
        .unwrap_err();
    assert!(matches!(err, DiError::SecondReturnNotError("alloc::string::String")));

    let signature = Signature::new()
        .returns(ReturnSlot::value::<u8>())
        .returns(ReturnSlot::value::<io::Error>());
    container.register_token("t", Lifecycle::Singleton, raw(signature)).unwrap();
    assert_eq!(container.get_token::<u8>("t").unwrap(), 0);
}

#[test]
fn rejected_registration_keeps_previous_recipe() {
    let container = WireContainer::new();
    container.singleton(|| 7u8).unwrap();

    let bad = Signature::new()
        .returns(ReturnSlot::value::<u8>())
        .returns(ReturnSlot::value::<u8>());
    assert!(container.register_type(Lifecycle::Transient, raw(bad)).is_err());
    assert_eq!(container.get::<u8>().unwrap(), 7);
}

#[test]
fn registration_never_runs_constructor() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();
    let container = WireContainer::new();
    container
        .singleton(move |_missing: Arc<String>| {
            flag.store(true, Ordering::SeqCst);
            1i32
        })
        .unwrap();

    // the missing argument is only noticed on resolution
    assert!(!ran.load(Ordering::SeqCst));
    assert!(matches!(container.get::<i32>(), Err(DiError::ResolverNotSet(_))));
    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn raw_function_arguments_resolve_in_order() {
    let container = WireContainer::new();
    container.singleton(|| 2u8).unwrap();
    container.singleton(|| "x".to_string()).unwrap();

    let signature = Signature::new()
        .param::<String>()
        .param::<u8>()
        .returns(ReturnSlot::value::<String>());
    let ctor = RawConstructor::function(signature, |args| {
        let text = args[0].downcast::<String>().unwrap_or_default();
        let times = args[1].downcast::<u8>().unwrap_or_default();
        Ok(Some(Instance::new(text.repeat(times as usize))))
    });
    container.register_token("repeated", Lifecycle::Transient, ctor).unwrap();

    assert_eq!(container.get_token::<String>("repeated").unwrap(), "xx");
}
