//! Random program builders for property tests
//!
//! Programs share a fixed class skeleton and differ only in the body of
//! `main`, which is a list of generated `Op`s over a small pool of variables:
//!
//! ```text
//! class C0        { Object f; static Object g;
//!                   Object m(Object p) { this.f = p; r = this.f; return r; }
//!                   static Object id(Object p) { C0.g = p; return p; } }
//! class C1 : C0   { }
//! class C2 : C1   { Object m(Object p) { return p; } }
//! ```

use codegraph_pta::shared::models::{ClassId, Program, ProgramBuilder, TypeRef, VarId};
use proptest::prelude::*;

/// Variables available in `main`
pub const VAR_POOL: usize = 6;

/// Statement of a generated `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    New { lhs: usize, class: usize },
    NewArray { lhs: usize },
    Copy { lhs: usize, rhs: usize },
    Store { base: usize, rhs: usize },
    Load { lhs: usize, base: usize },
    StoreStatic { rhs: usize },
    LoadStatic { lhs: usize },
    StoreArray { base: usize, rhs: usize },
    LoadArray { lhs: usize, base: usize },
    Call { recv: usize, arg: usize, result: usize },
    StaticCall { arg: usize, result: usize },
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    let v = || 0..VAR_POOL;
    prop_oneof![
        3 => (v(), 0..3usize).prop_map(|(lhs, class)| Op::New { lhs, class }),
        1 => v().prop_map(|lhs| Op::NewArray { lhs }),
        3 => (v(), v()).prop_map(|(lhs, rhs)| Op::Copy { lhs, rhs }),
        2 => (v(), v()).prop_map(|(base, rhs)| Op::Store { base, rhs }),
        2 => (v(), v()).prop_map(|(lhs, base)| Op::Load { lhs, base }),
        1 => v().prop_map(|rhs| Op::StoreStatic { rhs }),
        1 => v().prop_map(|lhs| Op::LoadStatic { lhs }),
        1 => (v(), v()).prop_map(|(base, rhs)| Op::StoreArray { base, rhs }),
        1 => (v(), v()).prop_map(|(lhs, base)| Op::LoadArray { lhs, base }),
        3 => (v(), v(), v()).prop_map(|(recv, arg, result)| Op::Call { recv, arg, result }),
        1 => (v(), v()).prop_map(|(arg, result)| Op::StaticCall { arg, result }),
    ]
}

pub fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arb_op(), 1..40)
}

/// Build the program whose `main` executes `ops`
pub fn build_program(ops: &[Op]) -> Program {
    let mut p = ProgramBuilder::new();
    let c0 = p.class("C0");
    let c1 = p.subclass("C1", c0);
    let c2 = p.subclass("C2", c1);
    let classes: [ClassId; 3] = [c0, c1, c2];
    let f = p.field(c0, "f");
    let g = p.static_field(c0, "g");

    p.method(c0, "Object m(Object)", |m, this| {
        let param = m.param("p");
        let r = m.var("r");
        m.store_field(this, f, param);
        m.load_field(r, this, f);
        m.ret(r);
    });
    p.method(c2, "Object m(Object)", |m, _| {
        let param = m.param("p");
        m.ret(param);
    });
    p.static_method(c0, "Object id(Object)", |m| {
        let param = m.param("p");
        m.store_static(g, param);
        m.ret(param);
    });

    let main = p.static_method(c0, "void main()", |m| {
        let vars: Vec<VarId> = (0..VAR_POOL).map(|i| m.var(&format!("v{}", i))).collect();
        for op in ops {
            match *op {
                Op::New { lhs, class } => {
                    m.new_obj(vars[lhs], classes[class]);
                }
                Op::NewArray { lhs } => {
                    m.new_array(vars[lhs], TypeRef::Class(c0));
                }
                Op::Copy { lhs, rhs } => {
                    m.assign(vars[lhs], vars[rhs]);
                }
                Op::Store { base, rhs } => {
                    m.store_field(vars[base], f, vars[rhs]);
                }
                Op::Load { lhs, base } => {
                    m.load_field(vars[lhs], vars[base], f);
                }
                Op::StoreStatic { rhs } => {
                    m.store_static(g, vars[rhs]);
                }
                Op::LoadStatic { lhs } => {
                    m.load_static(vars[lhs], g);
                }
                Op::StoreArray { base, rhs } => {
                    m.store_array(vars[base], vars[rhs]);
                }
                Op::LoadArray { lhs, base } => {
                    m.load_array(vars[lhs], vars[base]);
                }
                Op::Call { recv, arg, result } => {
                    m.call_virtual(vars[recv], c0, "Object m(Object)", &[vars[arg]], Some(vars[result]));
                }
                Op::StaticCall { arg, result } => {
                    m.call_static(c0, "Object id(Object)", &[vars[arg]], Some(vars[result]));
                }
            }
        }
    });
    p.entry(main);
    p.build().expect("generated programs are well-formed")
}
