use shimdns_application::services::RecordStore;
use shimdns_application::use_cases::HandleDnsQueryUseCase;
use shimdns_domain::Config;
use shimdns_infrastructure::dns::{DnsForwarder, DnsServerHandler};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct DnsServices {
    pub store: Arc<RecordStore>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(RecordStore::load(&config.records)?);
        for record in store.iter() {
            debug!(record = %record, "Local record loaded");
        }
        info!(count = store.len(), "Local records loaded");

        let forwarder = Arc::new(DnsForwarder::new(
            config.upstream_addr()?,
            Duration::from_secs(config.upstream.timeout),
        ));

        let use_case = Arc::new(HandleDnsQueryUseCase::new(store.clone(), forwarder));
        let handler = DnsServerHandler::new(use_case);

        Ok(Self { store, handler })
    }
}
