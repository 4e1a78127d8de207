pub mod audit;
pub mod auth;
pub mod pagination;

pub use audit::{ActionTypeCountDto, ActorDto, AuditLogDto, AuditSummaryDto, EntityTypeCountDto};
pub use auth::{AuthenticatedUser, TokenSubject};
pub use pagination::PageDto;
