//! Hand-written scenario programs
//!
//! Each fixture returns the program plus the ids a test needs to query it.

use codegraph_pta::shared::models::{
    ClassId, FieldId, MethodId, Program, ProgramBuilder, StmtRef, TypeRef, VarId,
};

/// `a = new A(); b = a; b.m();`
pub struct Soundness {
    pub program: Program,
    pub main: MethodId,
    pub a_m: MethodId,
    pub a: VarId,
    pub b: VarId,
    pub this_of_m: VarId,
    pub call: StmtRef,
}

pub fn soundness() -> Soundness {
    let mut p = ProgramBuilder::new();
    let class_a = p.class("A");
    let mut this_of_m = 0;
    let a_m = p.method(class_a, "void m()", |_, this| this_of_m = this);
    let (mut a, mut b, mut call) = (0, 0, StmtRef::new(0, 0));
    let main = p.static_method(class_a, "void main()", |m| {
        a = m.var("a");
        b = m.var("b");
        m.new_obj(a, class_a);
        m.assign(b, a);
        call = m.call_virtual(b, class_a, "void m()", &[], None);
    });
    p.entry(main);
    Soundness {
        program: p.build().unwrap(),
        main,
        a_m,
        a,
        b,
        this_of_m,
        call,
    }
}

/// Two `A`s, each storing a different `B` into `f`, read back into x / y
pub struct FieldSensitivity {
    pub program: Program,
    pub f: FieldId,
    pub a1: VarId,
    pub a2: VarId,
    pub b1: VarId,
    pub b2: VarId,
    pub x: VarId,
    pub y: VarId,
}

pub fn field_sensitivity() -> FieldSensitivity {
    let mut p = ProgramBuilder::new();
    let class_a = p.class("A");
    let class_b = p.class("B");
    let f = p.field(class_a, "f");
    let mut vars = [0; 6];
    let main = p.static_method(class_a, "void main()", |m| {
        for (i, name) in ["a1", "a2", "b1", "b2", "x", "y"].iter().enumerate() {
            vars[i] = m.var(name);
        }
        let [a1, a2, b1, b2, x, y] = vars;
        m.new_obj(a1, class_a);
        m.new_obj(a2, class_a);
        m.new_obj(b1, class_b);
        m.new_obj(b2, class_b);
        m.store_field(a1, f, b1);
        m.store_field(a2, f, b2);
        m.load_field(x, a1, f);
        m.load_field(y, a2, f);
    });
    p.entry(main);
    let [a1, a2, b1, b2, x, y] = vars;
    FieldSensitivity {
        program: p.build().unwrap(),
        f,
        a1,
        a2,
        b1,
        b2,
        x,
        y,
    }
}

/// `A.foo`, `B extends A` overrides, `C extends B` overrides;
/// `x = new B(); x.foo();` through a reference typed `A`
pub struct DispatchHierarchy {
    pub program: Program,
    pub a_foo: MethodId,
    pub b_foo: MethodId,
    pub c_foo: MethodId,
    pub call: StmtRef,
}

pub fn dispatch_hierarchy() -> DispatchHierarchy {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let b = p.subclass("B", a);
    let c = p.subclass("C", b);
    let a_foo = p.method(a, "void foo()", |_, _| {});
    let b_foo = p.method(b, "void foo()", |_, _| {});
    let c_foo = p.method(c, "void foo()", |_, _| {});
    let mut call = StmtRef::new(0, 0);
    let main = p.static_method(a, "void main()", |m| {
        let x = m.var("x");
        m.new_obj(x, b);
        call = m.call_virtual(x, a, "void foo()", &[], None);
    });
    p.entry(main);
    DispatchHierarchy {
        program: p.build().unwrap(),
        a_foo,
        b_foo,
        c_foo,
        call,
    }
}

/// `r1 = id(o1); r2 = id(o2);` with a static identity method
pub struct TwoCallers {
    pub program: Program,
    pub id: MethodId,
    pub o1: VarId,
    pub o2: VarId,
    pub r1: VarId,
    pub r2: VarId,
}

pub fn two_callers() -> TwoCallers {
    let mut p = ProgramBuilder::new();
    let object = p.class("Object");
    let a = p.subclass("A", object);
    let b = p.subclass("B", object);
    let id = p.static_method(object, "Object id(Object)", |m| {
        let param = m.param("p");
        m.ret(param);
    });
    let mut vars = [0; 4];
    let main = p.static_method(object, "void main()", |m| {
        for (i, name) in ["o1", "o2", "r1", "r2"].iter().enumerate() {
            vars[i] = m.var(name);
        }
        let [o1, o2, r1, r2] = vars;
        m.new_obj(o1, a);
        m.new_obj(o2, b);
        m.call_static(object, "Object id(Object)", &[o1], Some(r1));
        m.call_static(object, "Object id(Object)", &[o2], Some(r2));
    });
    p.entry(main);
    let [o1, o2, r1, r2] = vars;
    TwoCallers {
        program: p.build().unwrap(),
        id,
        o1,
        o2,
        r1,
        r2,
    }
}

/// Container class with `set`/`get` over field `f`:
///
/// ```text
/// b1 = new Box(); b2 = new Box();
/// o1 = new A();   o2 = new A();
/// b1.set(o1);     b2.set(o2);
/// r1 = b1.get();  r2 = b2.get();
/// ```
pub struct Containers {
    pub program: Program,
    pub box_class: ClassId,
    pub f: FieldId,
    pub o1: VarId,
    pub o2: VarId,
    pub r1: VarId,
    pub r2: VarId,
}

fn declare_box(p: &mut ProgramBuilder) -> (ClassId, FieldId) {
    let box_class = p.class("Box");
    let f = p.field(box_class, "f");
    p.method(box_class, "void set(Object)", |m, this| {
        let v = m.param("v");
        m.store_field(this, f, v);
    });
    p.method(box_class, "Object get()", |m, this| {
        let r = m.var("r");
        m.load_field(r, this, f);
        m.ret(r);
    });
    (box_class, f)
}

pub fn containers() -> Containers {
    let mut p = ProgramBuilder::new();
    let (box_class, f) = declare_box(&mut p);
    let a = p.class("A");
    let mut vars = [0; 6];
    let main = p.static_method(a, "void main()", |m| {
        for (i, name) in ["b1", "b2", "o1", "o2", "r1", "r2"].iter().enumerate() {
            vars[i] = m.var(name);
        }
        let [b1, b2, o1, o2, r1, r2] = vars;
        m.new_obj(b1, box_class);
        m.new_obj(b2, box_class);
        m.new_obj(o1, a);
        m.new_obj(o2, a);
        m.call_virtual(b1, box_class, "void set(Object)", &[o1], None);
        m.call_virtual(b2, box_class, "void set(Object)", &[o2], None);
        m.call_virtual(b1, box_class, "Object get()", &[], Some(r1));
        m.call_virtual(b2, box_class, "Object get()", &[], Some(r2));
    });
    p.entry(main);
    let [_, _, o1, o2, r1, r2] = vars;
    Containers {
        program: p.build().unwrap(),
        box_class,
        f,
        o1,
        o2,
        r1,
        r2,
    }
}

/// Boxes created inside a factory method; only heap contexts can tell
/// `f1.make()` from `f2.make()`:
///
/// ```text
/// f1 = new Factory(); f2 = new Factory();
/// b1 = f1.make();     b2 = f2.make();
/// o1 = new A();       o2 = new A();
/// b1.set(o1);         b2.set(o2);
/// r1 = b1.get();      r2 = b2.get();
/// ```
pub fn factory_containers() -> Containers {
    let mut p = ProgramBuilder::new();
    let (box_class, f) = declare_box(&mut p);
    let factory = p.class("Factory");
    p.method(factory, "Box make()", |m, _| {
        let b = m.var("b");
        m.new_obj(b, box_class);
        m.ret(b);
    });
    let a = p.class("A");
    let mut vars = [0; 8];
    let main = p.static_method(a, "void main()", |m| {
        for (i, name) in ["f1", "f2", "b1", "b2", "o1", "o2", "r1", "r2"]
            .iter()
            .enumerate()
        {
            vars[i] = m.var(name);
        }
        let [f1, f2, b1, b2, o1, o2, r1, r2] = vars;
        m.new_obj(f1, factory);
        m.new_obj(f2, factory);
        m.call_virtual(f1, factory, "Box make()", &[], Some(b1));
        m.call_virtual(f2, factory, "Box make()", &[], Some(b2));
        m.new_obj(o1, a);
        m.new_obj(o2, a);
        m.call_virtual(b1, box_class, "void set(Object)", &[o1], None);
        m.call_virtual(b2, box_class, "void set(Object)", &[o2], None);
        m.call_virtual(b1, box_class, "Object get()", &[], Some(r1));
        m.call_virtual(b2, box_class, "Object get()", &[], Some(r2));
    });
    p.entry(main);
    let [_, _, _, _, o1, o2, r1, r2] = vars;
    Containers {
        program: p.build().unwrap(),
        box_class,
        f,
        o1,
        o2,
        r1,
        r2,
    }
}

/// `arr = new A[]; o = new A(); arr[i] = o; x = arr[j]; h = arr.hashCode();`
/// with `Object` as root class
pub struct Arrays {
    pub program: Program,
    pub hash_code: MethodId,
    pub o: VarId,
    pub x: VarId,
    pub h: VarId,
}

pub fn arrays() -> Arrays {
    let mut p = ProgramBuilder::new();
    let object = p.class("Object");
    p.root_class(object);
    let a = p.subclass("A", object);
    let hash_code = p.method(object, "Object hashCode()", |m, this| {
        m.ret(this);
    });
    let mut vars = [0; 4];
    let main = p.static_method(a, "void main()", |m| {
        for (i, name) in ["arr", "o", "x", "h"].iter().enumerate() {
            vars[i] = m.var(name);
        }
        let [arr, o, x, h] = vars;
        m.new_array(arr, TypeRef::Class(a));
        m.new_obj(o, a);
        m.store_array(arr, o);
        m.load_array(x, arr);
        m.call_virtual(arr, object, "Object hashCode()", &[], Some(h));
    });
    p.entry(main);
    let [_, o, x, h] = vars;
    Arrays {
        program: p.build().unwrap(),
        hash_code,
        o,
        x,
        h,
    }
}
