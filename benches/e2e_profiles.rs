use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use someip_e2e::{
    CheckStatus, ClientSideTransformer, E2EProfileConfiguration, End2EndEventProtectionProps,
    Profile, ProfileChecker, ProfileProtector, ServerSideTransformer, StateMachine,
};

fn benchmark_profile04(c: &mut Criterion) {
    let props = End2EndEventProtectionProps {
        data_id: 0x12345678,
        max_delta_counter: 1,
        min_data_length: 96,    // 12 bytes minimum
        max_data_length: 32768, // 4096 bytes maximum
        ..Default::default()
    };

    let mut sender = ProfileProtector::new(Profile::Profile04, &props);
    let mut receiver = ProfileChecker::new(Profile::Profile04, &props);

    let mut group = c.benchmark_group("Profile04");

    for size in &[16, 64, 256, 1024] {
        let mut data = vec![0u8; *size];

        group.bench_with_input(BenchmarkId::new("protect", size), size, |b, &_size| {
            b.iter(|| {
                let mut data_copy = data.clone();
                sender.protect(black_box(&mut data_copy)).unwrap();
            })
        });

        // Prepare protected data for check benchmark
        sender.protect(&mut data).unwrap();

        group.bench_with_input(BenchmarkId::new("check", size), size, |b, &_size| {
            b.iter(|| {
                receiver.check(black_box(&data));
            })
        });
    }

    group.finish();
}

fn benchmark_profile05(c: &mut Criterion) {
    let props = End2EndEventProtectionProps {
        data_length: 8 * 8, // 8 bytes total
        data_id: 0x123,
        max_delta_counter: 1,
        offset: 0,
        ..Default::default()
    };

    let mut sender = ProfileProtector::new(Profile::Profile05, &props);
    let mut receiver = ProfileChecker::new(Profile::Profile05, &props);

    let mut group = c.benchmark_group("Profile05");
    let mut data = vec![0u8; 8];

    group.bench_function("protect", |b| {
        b.iter(|| {
            let mut data_copy = data.clone();
            sender.protect(black_box(&mut data_copy)).unwrap();
        })
    });

    // Prepare protected data for check benchmark
    sender.protect(&mut data).unwrap();

    group.bench_function("check", |b| {
        b.iter(|| {
            receiver.check(black_box(&data));
        })
    });

    group.finish();
}

fn benchmark_profile07(c: &mut Criterion) {
    let props = End2EndEventProtectionProps {
        min_data_length: 160,
        max_data_length: 32768,
        max_delta_counter: 1,
        offset: 0,
        ..Default::default()
    };

    let mut sender = ProfileProtector::new(Profile::Profile07, &props);
    let mut receiver = ProfileChecker::new(Profile::Profile07, &props);

    let mut group = c.benchmark_group("Profile07");

    for size in &[32, 256, 1024, 4096] {
        let mut data = vec![0u8; *size];

        group.bench_with_input(BenchmarkId::new("protect", size), size, |b, &_size| {
            b.iter(|| {
                let mut data_copy = data.clone();
                sender.protect(black_box(&mut data_copy)).unwrap();
            })
        });

        sender.protect(&mut data).unwrap();

        group.bench_with_input(BenchmarkId::new("check", size), size, |b, &_size| {
            b.iter(|| {
                receiver.check(black_box(&data));
            })
        });
    }

    group.finish();
}

fn benchmark_profile22(c: &mut Criterion) {
    let props = End2EndEventProtectionProps {
        data_length: 8 * 8,
        max_delta_counter: 1,
        offset: 0,
        ..Default::default()
    };

    let mut sender = ProfileProtector::new(Profile::Profile22, &props);
    let mut receiver = ProfileChecker::new(Profile::Profile22, &props);

    let mut group = c.benchmark_group("Profile22");
    let mut data = vec![0u8; 8];

    group.bench_function("protect", |b| {
        b.iter(|| {
            let mut data_copy = data.clone();
            sender.protect(black_box(&mut data_copy)).unwrap();
        })
    });

    sender.protect(&mut data).unwrap();

    group.bench_function("check", |b| {
        b.iter(|| {
            receiver.check(black_box(&data));
        })
    });

    group.finish();
}

fn benchmark_state_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("StateMachine");

    group.bench_function("check_ok_stream", |b| {
        let mut sm = StateMachine::new(E2EProfileConfiguration::default());
        b.iter(|| sm.check(black_box(CheckStatus::Ok)))
    });

    group.bench_function("check_mixed_stream", |b| {
        let mut sm = StateMachine::new(E2EProfileConfiguration::default());
        let mut cycle = 0u32;
        b.iter(|| {
            cycle = cycle.wrapping_add(1);
            let status = if cycle % 4 == 0 {
                CheckStatus::Error
            } else {
                CheckStatus::Ok
            };
            sm.check(black_box(status))
        })
    });

    group.finish();
}

fn benchmark_transformer_pair(c: &mut Criterion) {
    let props = End2EndEventProtectionProps {
        data_length: 16 * 8,
        max_delta_counter: 1,
        offset: 0,
        ..Default::default()
    };

    let mut server = ServerSideTransformer::new(Profile::Profile05, &props);
    let mut client = ClientSideTransformer::new(
        Profile::Profile05,
        &props,
        E2EProfileConfiguration::default(),
    );

    let mut group = c.benchmark_group("Transformer");
    let mut data = vec![0u8; 16];

    group.bench_function("protect", |b| {
        b.iter(|| {
            let mut data_copy = data.clone();
            server.protect(black_box(&mut data_copy), 0).unwrap();
        })
    });

    server.protect(&mut data, 0).unwrap();

    group.bench_function("check", |b| {
        b.iter(|| client.check(black_box(&data), 0))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_profile04,
    benchmark_profile05,
    benchmark_profile07,
    benchmark_profile22,
    benchmark_state_machine,
    benchmark_transformer_pair
);
criterion_main!(benches);
