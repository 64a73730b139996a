use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use frontrouter::handler::{Handler, RouteResult};
use frontrouter::router::Router;
use http::Method;

fn build_router(routes: usize) -> Router {
    let mut router = Router::new();
    for i in 0..routes {
        router.add_route(
            format!("section{i}/([a-z]+)/([0-9]+)"),
            Handler::native(|_, _| RouteResult::producer(|args, _| args.join(":"))),
        );
    }
    router
}

fn bench_dispatch(c: &mut Criterion) {
    for routes in [10usize, 100] {
        let router = build_router(routes);
        let first = "section0/posts/42".to_string();
        let last = format!("section{}/posts/42", routes - 1);

        c.bench_function(&format!("dispatch_first_of_{routes}"), |b| {
            b.iter(|| router.dispatch(black_box(&Method::GET), black_box(&first)))
        });
        c.bench_function(&format!("dispatch_last_of_{routes}"), |b| {
            b.iter(|| router.dispatch(black_box(&Method::GET), black_box(&last)))
        });
        c.bench_function(&format!("no_match_{routes}"), |b| {
            b.iter(|| router.dispatch(black_box(&Method::GET), black_box("missing/route")))
        });
    }
}

fn bench_source_handler(c: &mut Criterion) {
    let mut router = Router::new();
    if let Ok(handler) = Handler::from_source("User {{ args[0] }} / {{ args[1] }}") {
        router.add_route("users/([0-9]+)/([a-z]+)", handler);
    }
    c.bench_function("dispatch_source_handler", |b| {
        b.iter(|| router.dispatch(black_box(&Method::GET), black_box("users/42/profile")))
    });
}

criterion_group!(benches, bench_dispatch, bench_source_handler);
criterion_main!(benches);
