//! Services the instantiation core consumes.
//!
//! Type substitution and generic-argument checking sit behind traits so a
//! surrounding compiler can supply its own. [`BindingSubst`] and
//! [`ConstantArgChecker`] are the implementations used by default.

use nsc_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use nsc_ir::{NodeId, NodeKind, Program, TypeBinding, TypeId, TypeKind, TypePool};

use crate::map::InstantiationMap;
use crate::report;

/// What a type substitution may consult.
pub struct SubstEnv<'a> {
    pub types: &'a mut TypePool,
    /// Template type parameters bound by the component being instantiated.
    pub bindings: &'a [TypeBinding],
    /// Links made so far by the current instantiation (forwarded tags).
    pub map: &'a InstantiationMap,
}

pub trait TypeSubst {
    fn instantiate_type(&self, env: &mut SubstEnv<'_>, ty: TypeId) -> TypeId;

    fn instantiate_type_list(&self, env: &mut SubstEnv<'_>, tys: &[TypeId]) -> Vec<TypeId> {
        tys.iter().map(|&ty| self.instantiate_type(env, ty)).collect()
    }
}

/// Replaces bound template parameters and forwarded tags, structurally.
#[derive(Copy, Clone, Debug, Default)]
pub struct BindingSubst;

impl TypeSubst for BindingSubst {
    fn instantiate_type(&self, env: &mut SubstEnv<'_>, ty: TypeId) -> TypeId {
        match env.types.kind(ty).clone() {
            TypeKind::Void | TypeKind::Int { .. } | TypeKind::Float { .. } => ty,
            TypeKind::Param { .. } => env
                .bindings
                .iter()
                .find(|binding| binding.param == ty)
                .map_or(ty, |binding| binding.arg),
            TypeKind::Tag(tag) => match env.map.tag(tag) {
                Some(copy) => env.types.tag(copy),
                None => ty,
            },
            TypeKind::Pointer(pointee) => {
                let pointee = self.instantiate_type(env, pointee);
                env.types.pointer(pointee)
            }
            TypeKind::Array { elem, len } => {
                let elem = self.instantiate_type(env, elem);
                env.types.array(elem, len)
            }
            TypeKind::Function { ret, params } => {
                let ret = self.instantiate_type(env, ret);
                let params = self.instantiate_type_list(env, &params);
                env.types.function(ret, params)
            }
        }
    }
}

pub trait GenericArgChecker {
    /// Check the arguments written at a wiring endpoint (`endpoint`, an
    /// `EndpointRef` node) against the generic parameter types `params`.
    fn check_generic_arguments(
        &self,
        program: &Program,
        endpoint: NodeId,
        params: &[TypeId],
        queue: &mut DiagnosticQueue,
    );
}

/// Requires one integral constant per parameter, in range of its type.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConstantArgChecker;

impl GenericArgChecker for ConstantArgChecker {
    fn check_generic_arguments(
        &self,
        program: &Program,
        endpoint: NodeId,
        params: &[TypeId],
        queue: &mut DiagnosticQueue,
    ) {
        let args: &[NodeId] = match &program.node(endpoint).kind {
            NodeKind::EndpointRef { args, .. } => args,
            _ => &[],
        };

        if args.len() != params.len() {
            queue.add(report::at_node(
                program,
                endpoint,
                format!("expected {} argument(s), found {}", params.len(), args.len()),
                Diagnostic::error(ErrorCode::E4004)
                    .with_message("wrong number of generic arguments"),
            ));
            return;
        }

        for (&arg, &param) in args.iter().zip(params) {
            match program.node(arg).cst {
                Some(value) if value.is_integral() => {
                    if program.types.is_integral(param) && !program.types.in_range(value, param) {
                        queue.add(report::at_node(
                            program,
                            arg,
                            format!("`{value}` does not fit the interface parameter"),
                            Diagnostic::error(ErrorCode::E4006)
                                .with_message("generic argument out of range"),
                        ));
                    }
                }
                _ => {
                    queue.add(report::at_node(
                        program,
                        arg,
                        "not an integral constant",
                        Diagnostic::error(ErrorCode::E4005)
                            .with_message("generic argument must be an integral constant"),
                    ));
                }
            }
        }
    }
}
