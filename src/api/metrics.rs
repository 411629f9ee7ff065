use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Pipeline counters, registered on a caller-owned registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub documents_generated: IntCounterVec,
    pub generation_failures: IntCounterVec,
}

impl Metrics {
    pub fn new(registry: Registry) -> prometheus::Result<Self> {
        let documents_generated = IntCounterVec::new(
            Opts::new(
                "invoice_documents_generated_total",
                "Documents rendered, stored and signed",
            ),
            &["kind"],
        )?;
        let generation_failures = IntCounterVec::new(
            Opts::new(
                "invoice_generation_failures_total",
                "Requests aborted, by failing stage",
            ),
            &["stage"],
        )?;

        registry.register(Box::new(documents_generated.clone()))?;
        registry.register(Box::new(generation_failures.clone()))?;

        Ok(Metrics {
            registry,
            documents_generated,
            generation_failures,
        })
    }

    pub fn encode(&self) -> prometheus::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}
