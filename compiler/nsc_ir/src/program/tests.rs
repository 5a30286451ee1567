use super::*;
use crate::{ComponentKind, DeclKind, TagKind};
use pretty_assertions::assert_eq;

fn component(program: &mut Program, name: &str, is_abstract: bool) -> ComponentId {
    let scope = program.new_scope(Some(Program::GLOBAL_SCOPE));
    let name_id = program.name(name);
    program.push_component(Component::new(
        name_id,
        name,
        ComponentKind::Module,
        is_abstract,
        scope,
    ))
}

#[test]
fn test_lookup_walks_parent_scopes() {
    let mut program = Program::new();
    let x = program.name("x");
    let outer = program.declare(
        Program::GLOBAL_SCOPE,
        Declaration::new(x, DeclKind::Variable, TypePool::I32),
    );
    let inner_scope = program.new_scope(Some(Program::GLOBAL_SCOPE));
    assert_eq!(program.lookup(inner_scope, x), Some(outer));

    let inner = program.declare(
        inner_scope,
        Declaration::new(x, DeclKind::Variable, TypePool::U8),
    );
    assert_eq!(program.lookup(inner_scope, x), Some(inner));
    assert_eq!(program.lookup(Program::GLOBAL_SCOPE, x), Some(outer));

    let y = program.name("y");
    assert_eq!(program.lookup(inner_scope, y), None);
}

#[test]
fn test_declare_copy_resets_uses() {
    let mut program = Program::new();
    let f = program.name("f");
    let mut decl = Declaration::new(f, DeclKind::Function, TypePool::VOID);
    decl.uses.push(NodeId::new(3));
    decl.fn_uses.push(DeclId::new(9));
    let original = program.declare(Program::GLOBAL_SCOPE, decl);

    let scope = program.new_scope(None);
    let copy = program.declare_copy(scope, original);

    assert_ne!(copy, original);
    assert_eq!(program.decl(copy).shadowed, Some(original));
    assert!(program.decl(copy).uses.is_empty());
    assert!(program.decl(copy).fn_uses.is_empty());
    assert_eq!(program.decl(copy).kind, DeclKind::Function);
    assert_eq!(program.lookup(scope, f), Some(copy));
}

#[test]
fn test_tag_copy_is_empty_and_shadowed() {
    let mut program = Program::new();
    let s = program.name("S");
    let original = program.declare_tag(
        Program::GLOBAL_SCOPE,
        TagDecl::new(Some(s), TagKind::Struct),
    );
    let field_name = program.name("len");
    program.add_field(
        original,
        FieldDecl {
            name: Some(field_name),
            ty: TypePool::U8,
            ast: None,
            shadowed: None,
        },
    );
    program.tag_mut(original).defined = true;

    let scope = program.new_scope(None);
    let copy = program.declare_tag_copy(scope, original);
    assert_eq!(program.tag(copy).shadowed, Some(original));
    assert!(program.tag(copy).fields.is_empty());
    assert!(!program.tag(copy).defined);
    assert_eq!(program.lookup_tag(scope, s), Some(copy));
    assert_eq!(program.tag(original).field_index.len(), 1);
}

#[test]
fn test_original_component_and_depth() {
    let mut program = Program::new();
    let template = component(&mut program, "Queue", true);
    let mid = component(&mut program, "q", true);
    let leaf = component(&mut program, "q", false);
    program.component_mut(mid).original = Some(template);
    program.component_mut(leaf).original = Some(mid);

    assert_eq!(program.original_component(leaf), template);
    assert_eq!(program.original_component(template), template);
    assert_eq!(program.template_depth(leaf), 2);
    assert_eq!(program.template_depth(template), 0);
}

#[test]
fn test_shadow_origin_is_bounded() {
    let mut program = Program::new();
    let template = component(&mut program, "Queue", true);
    let copy = component(&mut program, "q", false);
    program.component_mut(copy).original = Some(template);

    let iface = program.name("Get");
    let orig = program.push_decl(
        Declaration::new(iface, DeclKind::InterfaceRef, TypePool::VOID).in_container(template),
    );
    let scope = program.component(copy).scope;
    let copied = program.declare_copy(scope, orig);
    program.decl_mut(copied).container = Some(copy);

    assert_eq!(program.shadow_origin(copied, template, 1), Some(orig));
    assert_eq!(program.shadow_origin(orig, template, 0), Some(orig));
    // Not enough steps to reach the template.
    assert_eq!(program.shadow_origin(copied, template, 0), None);
}

#[test]
fn test_spec_decls_flattens_interfaces() {
    let mut program = Program::new();
    let comp = component(&mut program, "Timer", false);
    let iface = program.name("Timer");
    let fired = program.name("fired");
    let start = program.name("start");
    let iref = program.push_decl(Declaration::new(iface, DeclKind::InterfaceRef, TypePool::VOID));
    let ev = program.push_decl(Declaration::new(fired, DeclKind::Event, TypePool::VOID));
    let cmd = program.push_decl(Declaration::new(start, DeclKind::Command, TypePool::VOID));
    program.decl_mut(iref).functions = vec![ev, cmd];
    program.component_mut(comp).specification = vec![iref];

    assert_eq!(program.spec_decls(comp), vec![iref, ev, cmd]);
}
