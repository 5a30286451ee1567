//! Stack of components being elaborated.
//!
//! Pushing an instance names it after the frame below it, and
//! [`InstanceStack::recursion_check`] detects a template that ends up
//! instantiating itself through the current chain of instances.

use nsc_ir::{ComponentId, Program};

use crate::report::ice;

#[derive(Clone, Debug, Default)]
pub struct InstanceStack {
    frames: Vec<ComponentId>,
}

impl InstanceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `component`, naming it `<parent>.<local>` if it is an instance.
    ///
    /// An instance needs a parent frame and abstract components are never
    /// pushed; both are internal compiler errors.
    pub fn push(&mut self, program: &mut Program, component: ComponentId) {
        let comp = program.component(component);
        if comp.is_abstract {
            ice(format_args!(
                "abstract component `{}` pushed on the instance stack",
                comp.instance_name
            ));
        }
        if comp.is_instance() {
            let Some(&parent) = self.frames.last() else {
                ice(format_args!(
                    "instance `{}` pushed without an enclosing component",
                    comp.instance_name
                ));
            };
            let name = format!(
                "{}.{}",
                program.component(parent).instance_name,
                comp.instance_name
            );
            program.component_mut(component).instance_name = name;
        }
        self.frames.push(component);
    }

    /// Pop the top frame; the frame below becomes current.
    pub fn pop(&mut self) -> Option<ComponentId> {
        debug_assert!(!self.frames.is_empty(), "pop from an empty instance stack");
        self.frames.pop()
    }

    /// The component currently being elaborated.
    pub fn current(&self) -> Option<ComponentId> {
        self.frames.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The enclosing instance derived from the same template as the top
    /// frame, if any.
    ///
    /// The walk stops at the first frame that is not an instance: a chain
    /// of instances always starts from a written component, so nothing
    /// below it can belong to this chain.
    pub fn recursion_check(&self, program: &Program) -> Option<ComponentId> {
        let (&top, below) = self.frames.split_last()?;
        let template = program.original_component(top);
        for &frame in below.iter().rev() {
            if !program.component(frame).is_instance() {
                return None;
            }
            if program.original_component(frame) == template {
                return Some(frame);
            }
        }
        None
    }
}
