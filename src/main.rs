#[macro_use]
extern crate scopeguard;

use std::process::ExitCode;

use onca_cpuid::{CpuidReport, NativeCpuid};
use onca_logging::{log_debug, log_info, log_severe, log_verbose, set_logger, LogCategory, LogLevel, Logger};

pub const LOG_CAT : LogCategory = LogCategory::new("Cpuid");

/// Report settings, selected at compile time through cargo features
struct ReportSettings;

impl ReportSettings {
    /// Log the per-feature report after the regular report
    const DETAILED: bool = cfg!(feature = "detailed_report");
    const MAX_LOG_LEVEL: LogLevel = if cfg!(feature = "verbose_logging") { LogLevel::Debug } else { LogLevel::Info };
}

static LOGGER : Logger = Logger::new();

fn main() -> ExitCode {
    set_logger(&LOGGER);
    LOGGER.set_max_level(ReportSettings::MAX_LOG_LEVEL);
    defer!(LOGGER.flush());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_severe!(LOG_CAT, main, "{err}");
            ExitCode::FAILURE
        },
    }
}

fn run() -> onca_cpuid::Result<()> {
    let cpuid = NativeCpuid::new()?;
    let report = CpuidReport::gather(&cpuid)?;

    let manufacturer = report.manufacturer();
    log_info!(LOG_CAT, "Processor manufacturer: {manufacturer}");
    if manufacturer.is_virtual() {
        log_verbose!(LOG_CAT, "Running under a hypervisor, the reported values may be virtualized");
    }
    log_debug!(LOG_CAT, run, "Raw version info: 0x{:08X}", report.version_info.raw());

    print!("{report}");

    if ReportSettings::DETAILED {
        log_info!(LOG_CAT, "{}", report.detailed());
    }
    Ok(())
}
