mod record;
mod service;

pub use record::RecordAuditCommand;
pub use service::AuditCommandService;
