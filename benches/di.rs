use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use wiring::*;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = WireContainer::new();
    container.singleton(|| 42u64).unwrap();

    // Prime the singleton
    let _ = container.get::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.get::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = WireContainer::new();
                container
                    .singleton(|| {
                        Arc::new(ExpensiveToCreate {
                            data: (0..1000).collect(),
                        })
                    })
                    .unwrap();
                container
            },
            |container| {
                let v = container.get::<Arc<ExpensiveToCreate>>().unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_singleton_vs_transient(c: &mut Criterion) {
    #[derive(Clone)]
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("singleton_vs_transient");

    let singleton = WireContainer::new();
    singleton.singleton(|| Service { data: [0; 64] }).unwrap();
    group.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = singleton.get::<Service>().unwrap();
            black_box(v.data);
        })
    });

    let transient = WireContainer::new();
    transient.transient(|| Service { data: [0; 64] }).unwrap();
    group.bench_function("transient", |b| {
        b.iter(|| {
            let v = transient.get::<Service>().unwrap();
            black_box(v.data);
        })
    });

    group.finish();
}

fn bench_type_vs_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_vs_token");

    let container = WireContainer::new();
    container.singleton(|| Arc::new(String::from("by type"))).unwrap();
    container
        .singleton_token("by_token", || Arc::new(String::from("by token")))
        .unwrap();

    group.bench_function("resolve_type", |b| {
        let mut dest = Arc::new(String::new());
        b.iter(|| {
            container.resolve(&mut dest).unwrap();
            black_box(&dest);
        })
    });

    group.bench_function("resolve_token", |b| {
        let mut dest = Arc::new(String::new());
        b.iter(|| {
            container.resolve_token("by_token", &mut dest).unwrap();
            black_box(&dest);
        })
    });

    group.finish();
}

fn bench_dependency_depth(c: &mut Criterion) {
    #[derive(Clone)]
    struct L0(u64);
    #[derive(Clone)]
    struct L1(u64);
    #[derive(Clone)]
    struct L2(u64);
    #[derive(Clone)]
    struct L3(u64);

    let container = WireContainer::new();
    container.transient(|| L0(1)).unwrap();
    container.transient(|l: L0| L1(l.0 + 1)).unwrap();
    container.transient(|l: L1| L2(l.0 + 1)).unwrap();
    container.transient(|l: L2| L3(l.0 + 1)).unwrap();

    c.bench_function("transient_chain_depth_4", |b| {
        b.iter(|| {
            let v = container.get::<L3>().unwrap();
            black_box(v.0);
        })
    });
}

fn bench_fill(c: &mut Criterion) {
    #[derive(Default)]
    struct Handler {
        port: u16,
        host: String,
        retries: u8,
        verbose: bool,
    }

    impl Record for Handler {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::public("port", &mut self.port),
                Field::public("host", &mut self.host).tag("host"),
                Field::public("retries", &mut self.retries),
                Field::public("verbose", &mut self.verbose).tag(",ignore"),
            ]
        }
    }

    let container = WireContainer::new();
    container.singleton(|| 8080u16).unwrap();
    container.singleton_token("host", || "localhost".to_string()).unwrap();
    container.singleton(|| 3u8).unwrap();

    c.bench_function("fill_four_fields", |b| {
        b.iter(|| {
            let mut handler = Handler::default();
            container.fill(&mut handler).unwrap();
            black_box((handler.port, handler.host.len(), handler.retries, handler.verbose));
        })
    });
}

fn bench_derived_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived");

    let app = WireContainer::new();
    app.singleton(|| 42u64).unwrap();

    group.bench_function("create_and_drop", |b| {
        b.iter(|| {
            let request = derived(&app);
            request.singleton(|| 7u32).unwrap();
            black_box(request);
        })
    });

    let request = derived(&app);
    group.bench_function("parent_fallback_hit", |b| {
        b.iter(|| {
            let v = request.get::<u64>().unwrap();
            black_box(v);
        })
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    let container = WireContainer::new();
    container.singleton(|| 42u64).unwrap();

    // Prime the singleton
    let _ = container.get::<u64>().unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let container_ref = &container;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = container_ref.get::<u64>().unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_registry");

    for &token_count in &[10, 100, 1000] {
        let container = WireContainer::new();

        // Register a baseline service we'll always resolve
        container.singleton(|| 42u64).unwrap();

        // Fill the token space to simulate a large registry
        for i in 0..token_count {
            let value = i as u32;
            container
                .singleton_token(&format!("service-{}", i), move || value)
                .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("resolve_from_large_registry", token_count),
            &token_count,
            |b, _| {
                b.iter(|| {
                    let v = container.get::<u64>().unwrap();
                    black_box(v);
                    let t = container.get_token::<u32>("service-5").unwrap();
                    black_box(t);
                })
            },
        );
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    // Simulate realistic workload: 70% singleton hits, 20% child hits, 10% transient
    #[derive(Clone)]
    struct SingletonService(u64);
    #[derive(Clone)]
    struct RequestService(u64);
    #[derive(Clone)]
    struct TransientService(u64);

    let app = WireContainer::new();
    app.singleton(|| Arc::new(SingletonService(1))).unwrap();
    app.transient(|| TransientService(3)).unwrap();

    let request = derived(&app);
    request.singleton(|| RequestService(2)).unwrap();

    // Prime services
    let _ = request.get::<Arc<SingletonService>>().unwrap();
    let _ = request.get::<RequestService>().unwrap();

    c.bench_function("mixed_workload_realistic", |b| {
        b.iter(|| {
            // 70% singleton hits
            for _ in 0..7 {
                let v = app.get::<Arc<SingletonService>>().unwrap();
                black_box(v.0);
            }

            // 20% child hits
            for _ in 0..2 {
                let v = request.get::<RequestService>().unwrap();
                black_box(v.0);
            }

            // 10% transient
            let v = app.get::<TransientService>().unwrap();
            black_box(v.0);
        })
    });
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_singleton_vs_transient,
    bench_type_vs_token,
    bench_dependency_depth,
    bench_fill,
    bench_derived_fallback,
    bench_contention
);

criterion_group!(macro_benches, bench_large_registry, bench_mixed_workload);

criterion_main!(micro_benches, macro_benches);
