use uuid::Uuid;

use super::errors::DomainError;
use super::order::{LegacyPo, ListResult, NewLegacyPo, NewPricedPo, PoSide, PricedPo, ReportRow};

/// Storage for purchase orders. Implementations are blocking; async callers
/// run them on a blocking thread.
pub trait PoRepository: Send + Sync + 'static {
    fn insert(&self, po: NewPricedPo) -> Result<PricedPo, DomainError>;
    fn find_by_id(&self, side: PoSide, id: Uuid) -> Result<Option<PricedPo>, DomainError>;
    fn list(&self, side: PoSide, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    fn find_by_status(&self, side: PoSide, status: &str) -> Result<Vec<PricedPo>, DomainError>;
    fn report_rows(&self, side: PoSide) -> Result<Vec<ReportRow>, DomainError>;

    fn insert_legacy(&self, po: NewLegacyPo) -> Result<LegacyPo, DomainError>;
    fn list_legacy(&self) -> Result<Vec<LegacyPo>, DomainError>;
}
