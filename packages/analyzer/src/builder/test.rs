use super::*;
use host::{Type, TypeTable};

#[test]
fn test_is_module_for_module_class() {
    let mut types = TypeTable::new();
    let module = types.add_class("Module", None);
    assert!(is_module(&types, Some(&Type::interface(module)), "Module"));
}

#[test]
fn test_is_module_for_transitive_subclass() {
    let mut types = TypeTable::new();
    let module = types.add_class("Module", None);
    let base = types.add_class("BaseModule", None);
    let mine = types.add_class("MyModule", None);
    types.set_supertype(base, Type::interface(module));
    types.set_supertype(mine, Type::interface(base));
    assert!(is_module(&types, Some(&Type::interface(mine)), "Module"));
}

#[test]
fn test_is_module_rejects_other_types() {
    let mut types = TypeTable::new();
    types.add_class("Module", None);
    let other = types.add_class("Other", None);
    assert!(!is_module(&types, Some(&Type::interface(other)), "Module"));
    assert!(!is_module(&types, Some(&Type::Dynamic), "Module"));
    assert!(!is_module(&types, None, "Module"));
}

#[test]
fn test_is_module_terminates_on_supertype_cycle() {
    let mut types = TypeTable::new();
    types.add_class("Module", None);
    let mine = types.add_class("MyModule", None);
    types.set_supertype(mine, Type::interface(mine));
    assert!(!is_module(&types, Some(&Type::interface(mine)), "Module"));

    let a = types.add_class("A", None);
    let b = types.add_class("B", None);
    types.set_supertype(a, Type::interface(b));
    types.set_supertype(b, Type::interface(a));
    assert!(!is_module(&types, Some(&Type::interface(a)), "Module"));
}

#[test]
fn test_is_module_honors_configured_name() {
    let mut types = TypeTable::new();
    let injector = types.add_class("DiModule", None);
    assert!(is_module(&types, Some(&Type::interface(injector)), "DiModule"));
    assert!(!is_module(&types, Some(&Type::interface(injector)), "Module"));
}
