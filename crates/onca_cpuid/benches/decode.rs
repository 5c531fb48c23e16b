use criterion::{criterion_main, criterion_group, Criterion, black_box};

use onca_cpuid::{CpuidReport, CpuidResult, FeatureFlags, RecordedCpuid, VersionInfo};

fn recorded_intel() -> RecordedCpuid {
    RecordedCpuid::new()
        .with_leaf(0, CpuidResult::new(0x16, 0x756E_6547, 0x6C65_746E, 0x4965_6E69))
        .with_leaf(1, CpuidResult::new(0x0009_06EA, 0x0510_0800, 0x7FFA_FBFF, 0xBFEB_FBFF))
}

fn decode_benchmark(c: &mut Criterion) {
    c.bench_function("version info: family + model", |b| b.iter(|| {
        let version = VersionInfo::from_eax(black_box(0x0009_06EA));
        (version.family(), version.model())
    }));

    c.bench_function("feature flags: collect names", |b| b.iter(|| {
        let flags = FeatureFlags::from_registers(black_box(0x7FFA_FBFF), black_box(0xBFEB_FBFF));
        flags.names().count()
    }));

    let cpuid = recorded_intel();
    c.bench_function("report: gather", |b| b.iter(|| {
        CpuidReport::gather(black_box(&cpuid))
    }));

    let report = CpuidReport::gather(&cpuid).unwrap();
    c.bench_function("report: format", |b| b.iter(|| {
        black_box(&report).to_string()
    }));
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
