use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::counter::repository::mock::MockCounterRepository;
use service::counter::CounterService;

fn bench_increment(c: &mut Criterion) {
    let repo = Arc::new(MockCounterRepository::default());
    let svc = CounterService::new(repo);
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("counter_increment_mock", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.increment()).unwrap();
        });
    });
}

criterion_group!(benches, bench_increment);
criterion_main!(benches);
