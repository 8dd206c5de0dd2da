use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swarm_core::drone::Drone;
use swarm_core::formation::FormationSpec;
use swarm_core::math::Point3;
use swarm_core::sequencer::{SequencerParams, ShowSequencer, StepSpec};

fn make_drones(n: usize) -> Vec<Drone> {
    (0..n as u32)
        .map(|id| {
            let x = id as f64 - n as f64 / 2.0;
            Drone::new(id, Point3::new(x, 0.0, 0.0), 5.0, 5.0).unwrap()
        })
        .collect()
}

fn benchmark_build_show(c: &mut Criterion) {
    let steps = vec![
        StepSpec {
            formation: FormationSpec::Sphere { radius: 10.0, center: [0.0, 0.0, 5.0] },
            transition_duration: 6.0,
            hold_duration: 2.0,
        },
        StepSpec {
            formation: FormationSpec::Grid { spacing: 2.0, center: [0.0, 0.0, 5.0], plane: "xy".into() },
            transition_duration: 6.0,
            hold_duration: 2.0,
        },
    ];

    c.bench_function("build_show_50_drones_2_steps", |b| {
        b.iter(|| {
            let drones = make_drones(50);
            let mut sequencer = ShowSequencer::new(black_box(drones), steps.clone(), SequencerParams::default());
            black_box(sequencer.build_show().unwrap())
        })
    });
}

criterion_group!(benches, benchmark_build_show);
criterion_main!(benches);
