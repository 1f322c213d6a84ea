//! Solver benchmarks
//!
//! Synthetic container-heavy programs: `n` boxes, each filled through a
//! setter and drained through a getter, with a static helper in between so
//! that call-site and object contexts both have something to separate.

use codegraph_pta::config::{PTAConfig, Preset, WorklistOrder};
use codegraph_pta::features::call_graph::ChaBuilder;
use codegraph_pta::features::points_to::PointerAnalysis;
use codegraph_pta::shared::models::{Program, ProgramBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn container_program(n: usize) -> Program {
    let mut p = ProgramBuilder::new();
    let object = p.class("Object");
    p.root_class(object);
    let item = p.subclass("Item", object);
    let boxed = p.subclass("Box", object);
    let f = p.field(boxed, "f");

    p.method(boxed, "void set(Object)", |m, this| {
        let v = m.param("v");
        m.store_field(this, f, v);
    });
    p.method(boxed, "Object get()", |m, this| {
        let r = m.var("r");
        m.load_field(r, this, f);
        m.ret(r);
    });
    p.static_method(object, "Object id(Object)", |m| {
        let x = m.param("x");
        m.ret(x);
    });

    let main = p.static_method(object, "void main()", |m| {
        for i in 0..n {
            let b = m.var(&format!("b{}", i));
            let o = m.var(&format!("o{}", i));
            let t = m.var(&format!("t{}", i));
            let r = m.var(&format!("r{}", i));
            m.new_obj(b, boxed);
            m.new_obj(o, item);
            m.call_static(object, "Object id(Object)", &[o], Some(t));
            m.call_virtual(b, boxed, "void set(Object)", &[t], None);
            m.call_virtual(b, boxed, "Object get()", &[], Some(r));
        }
    });
    p.entry(main);
    p.build().expect("benchmark program is well-formed")
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_by_policy");

    for n in [16usize, 64, 256] {
        let program = container_program(n);
        group.throughput(Throughput::Elements(n as u64));

        let configs = [
            ("insensitive", PTAConfig::insensitive()),
            ("1-call-site", PTAConfig::default().policy(codegraph_pta::ContextPolicy::CallSite)),
            ("balanced", PTAConfig::from_preset(Preset::Balanced)),
            ("thorough", PTAConfig::from_preset(Preset::Thorough)),
            ("2-type", PTAConfig::default().policy(codegraph_pta::ContextPolicy::Type).context_depth(2)),
        ];
        for (name, config) in configs {
            let analysis = PointerAnalysis::new(config);
            group.bench_with_input(BenchmarkId::new(name, n), &program, |b, program| {
                b.iter(|| black_box(analysis.analyze(program).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_worklist_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("worklist_order");
    let program = container_program(128);

    for order in [WorklistOrder::Fifo, WorklistOrder::Lifo] {
        let analysis = PointerAnalysis::new(PTAConfig::default().worklist_order(order));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", order)),
            &program,
            |b, program| b.iter(|| black_box(analysis.analyze(program).unwrap())),
        );
    }

    group.finish();
}

fn bench_cha(c: &mut Criterion) {
    let program = container_program(256);
    c.bench_function("cha_256", |b| {
        b.iter(|| black_box(ChaBuilder::new(&program).build().unwrap()))
    });
}

criterion_group!(benches, bench_policies, bench_worklist_order, bench_cha);
criterion_main!(benches);
