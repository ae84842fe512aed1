use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use taxi_core::{ValueObject, value_object};

#[derive(Debug, Clone)]
struct Vehicle {
    model: Option<String>,
    plate_number: Option<String>,
    color: Option<String>,
}

value_object!(Vehicle { model, plate_number, color });

/// Hand-written comparison, the baseline the descriptor walk competes with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DerivedVehicle {
    model: Option<String>,
    plate_number: Option<String>,
    color: Option<String>,
}

fn vehicle(plate: &str) -> Vehicle {
    Vehicle {
        model: Some("Lada sedan".to_string()),
        plate_number: Some(plate.to_string()),
        color: Some("Baklazhan".to_string()),
    }
}

fn derived(plate: &str) -> DerivedVehicle {
    DerivedVehicle {
        model: Some("Lada sedan".to_string()),
        plate_number: Some(plate.to_string()),
        color: Some("Baklazhan".to_string()),
    }
}

fn bench_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_object_equality");

    let (a, b) = (vehicle("A123BT 66"), vehicle("A123BT 66"));
    group.bench_function("descriptor_equal", |bench| {
        bench.iter(|| black_box(&a) == black_box(&b))
    });

    let (x, y) = (derived("A123BT 66"), derived("A123BT 66"));
    group.bench_function("derived_equal", |bench| {
        bench.iter(|| black_box(&x) == black_box(&y))
    });

    group.finish();
}

fn bench_hash_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_object_hash_code");

    for plate_len in [4usize, 32, 256] {
        let plate = "X".repeat(plate_len);
        let v = vehicle(&plate);
        group.bench_with_input(BenchmarkId::from_parameter(plate_len), &v, |bench, v| {
            bench.iter(|| black_box(v).value_hash())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let v = vehicle("A123BT 66");
    c.bench_function("value_object_render", |bench| {
        bench.iter(|| black_box(&v).to_string())
    });
}

criterion_group!(benches, bench_equality, bench_hash_code, bench_render);
criterion_main!(benches);
