mod builders;

pub use builders::LocalDnsRecordBuilder;
