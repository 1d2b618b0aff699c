use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use spatialdsp_core::core::channels::Stereo;
use spatialdsp_core::{Direction, EngineConfig, FrameProcessor, SpatialEngine, SpatialProcessor};
use std::hint::black_box;

fn test_signal(len: usize) -> Vec<f32> {
    (0..len).map(|n| (n as f32 * 0.05).sin() * 0.5).collect()
}

#[library_benchmark]
fn bench_engine_front() {
    let mut engine = SpatialEngine::new(EngineConfig::new(2, 44100.0, 512)).unwrap();
    let input = test_signal(1024);
    let mut output = vec![0.0; 1024];
    engine
        .process(black_box(&input), black_box(&mut output), Direction::new(0.5, 1.2))
        .unwrap();
}

#[library_benchmark]
fn bench_engine_rear() {
    let mut engine = SpatialEngine::new(EngineConfig::new(2, 44100.0, 512)).unwrap();
    let params = engine.params();
    params.vertical_feedback.set(0.5);
    let input = test_signal(1024);
    let mut output = vec![0.0; 1024];
    engine
        .process(black_box(&input), black_box(&mut output), Direction::new(4.0, 1.2))
        .unwrap();
}

#[library_benchmark]
fn bench_processor_stereo() {
    let mut processor = SpatialProcessor::<Stereo>::new(128, Direction::new(3.5, 0.8)).unwrap();
    let mut buffer = test_signal(1024);
    processor.process(black_box(&mut buffer), 0);
}

library_benchmark_group!(
    name = engine;
    benchmarks = bench_engine_front, bench_engine_rear
);

library_benchmark_group!(
    name = processor;
    benchmarks = bench_processor_stereo
);

main!(library_benchmark_groups = engine, processor);
