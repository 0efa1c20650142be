use criterion::{Criterion, criterion_group, criterion_main};
use machete::{Args, JSObject, JsArena, JsRoot, Value};
use std::hint::black_box;

// Micro-benchmarks for the object model hot paths: prototype-chain lookup, Put on an existing
// property, and loose equality with coercion.

#[ctor::ctor]
fn __init_bench_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).try_init();
}

fn bench_deep_chain_get(c: &mut Criterion) {
    let arena = JsArena::new(|mc| JsRoot::with_defaults(mc));
    for depth in [1usize, 8, 32] {
        c.bench_function(&format!("get_depth_{depth}"), |b| {
            arena.mutate(|mc, root| {
                let cx = root.context(mc);
                let base = cx.new_object();
                base.put(&cx, "target", Value::Number(1.0), true).unwrap();
                let mut leaf = base;
                for _ in 0..depth {
                    leaf = JSObject::new(mc, Some(leaf), "Object");
                }
                b.iter(|| black_box(leaf.get(&cx, black_box("target")).unwrap()));
            })
        });
    }
}

fn bench_put_existing(c: &mut Criterion) {
    let arena = JsArena::new(|mc| JsRoot::with_defaults(mc));
    c.bench_function("put_existing_data_property", |b| {
        arena.mutate(|mc, root| {
            let cx = root.context(mc);
            let obj = cx.new_object();
            obj.put(&cx, "counter", Value::Number(0.0), true).unwrap();
            let mut n = 0.0;
            b.iter(|| {
                n += 1.0;
                obj.put(&cx, "counter", Value::Number(n), true).unwrap();
            });
        })
    });
}

fn bench_loose_equality(c: &mut Criterion) {
    let arena = JsArena::new(|mc| JsRoot::with_defaults(mc));
    c.bench_function("loose_equals_string_number", |b| {
        arena.mutate(|mc, root| {
            let cx = root.context(mc);
            let left = Value::from("12345");
            let right = Value::Number(12345.0);
            b.iter(|| black_box(left.op_equals(&cx, &right).unwrap()));
        })
    });
    c.bench_function("native_call_overhead", |b| {
        arena.mutate(|mc, root| {
            let cx = root.context(mc);
            let to_string = cx.realm().object_prototype().get(&cx, "toString").unwrap();
            let this = Value::Object(cx.new_object());
            b.iter(|| black_box(to_string.op_call(&cx, this.clone(), &Args::default()).unwrap()));
        })
    });
}

criterion_group!(benches, bench_deep_chain_get, bench_put_existing, bench_loose_equality);
criterion_main!(benches);
