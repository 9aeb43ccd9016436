use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vigil_telemetry::{
    CaptureBuffer, LogLevel, LogSink, Logger, LoggerConfig, PeriodicGate, SamplingGate,
};

fn bench_gates(c: &mut Criterion) {
    let sampling = SamplingGate::new(1_000).unwrap();
    let periodic = PeriodicGate::new(3600.0).unwrap();
    // Compute the threshold before measuring.
    periodic.should_fire();

    let mut group = c.benchmark_group("Gates");

    group.bench_function("SamplingGate::should_fire", |b| {
        b.iter(|| black_box(sampling.should_fire()));
    });

    group.bench_function("PeriodicGate::should_fire (closed window)", |b| {
        b.iter(|| black_box(periodic.should_fire()));
    });

    group.finish();
}

fn bench_logger(c: &mut Criterion) {
    let logger = Logger::new(LoggerConfig::default().with_level(LogLevel::Warn))
        .with_sink(LogSink::writer(std::io::sink()))
        .with_hostname("bench");
    let capture = CaptureBuffer::new();
    let capturing = Logger::new(LoggerConfig::default())
        .with_sink(LogSink::writer(capture.clone()))
        .with_hostname("bench");

    let mut group = c.benchmark_group("Logger");

    group.bench_function("filtered record", |b| {
        b.iter(|| {
            if logger.enabled(LogLevel::Debug) {
                logger.emit(LogLevel::Debug, file!(), line!(), format_args!("{}", 1));
            }
        });
    });

    group.bench_function("emitted record", |b| {
        b.iter(|| {
            logger.emit(LogLevel::Warn, file!(), line!(), format_args!("value {}", black_box(42)));
        });
    });

    group.bench_function("emitted record into memory", |b| {
        b.iter(|| {
            capturing.emit(LogLevel::Info, file!(), line!(), format_args!("value {}", 42));
            capture.clear();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gates, bench_logger);
criterion_main!(benches);
