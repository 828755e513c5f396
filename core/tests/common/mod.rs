use errscan_core::api::{ErrorBlockExtractor, Emission, ScanMode};

pub const CORRELATOR_LOG: &str = include_str!("../fixtures/correlator.log");

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("errscan_core=debug")
        .with_test_writer()
        .try_init();
}

pub fn extract_from_str(mode: ScanMode, input: &str) -> Vec<Emission> {
    ErrorBlockExtractor::new(mode).extract_all(input.split_inclusive('\n'))
}

pub fn messages(emissions: &[Emission]) -> Vec<&str> {
    emissions.iter().map(|e| e.message.as_str()).collect()
}
