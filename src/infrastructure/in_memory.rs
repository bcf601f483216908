use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    LegacyPo, ListResult, NewLegacyPo, NewPricedPo, PoSide, PricedPo, ReportRow,
};
use crate::domain::ports::PoRepository;

#[derive(Default)]
struct Tables {
    priced: Vec<PricedPo>,
    legacy: Vec<LegacyPo>,
}

/// Process-local store, used when no database is configured and in tests.
/// Rows live in insertion order.
#[derive(Default)]
pub struct InMemoryPoRepository {
    tables: Mutex<Tables>,
}

impl InMemoryPoRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

impl PoRepository for InMemoryPoRepository {
    fn insert(&self, po: NewPricedPo) -> Result<PricedPo, DomainError> {
        let row = PricedPo::from_new(Uuid::new_v4(), Utc::now(), po);
        self.lock()?.priced.push(row.clone());
        Ok(row)
    }

    fn find_by_id(&self, side: PoSide, id: Uuid) -> Result<Option<PricedPo>, DomainError> {
        Ok(self
            .lock()?
            .priced
            .iter()
            .find(|p| p.side == side && p.id == id)
            .cloned())
    }

    fn list(&self, side: PoSide, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let tables = self.lock()?;
        let mut rows: Vec<&PricedPo> = tables.priced.iter().filter(|p| p.side == side).collect();
        // newest first, matching the SQL ordering
        rows.reverse();

        let offset = ((page - 1) * limit).max(0) as usize;
        let items = rows
            .iter()
            .skip(offset)
            .take(limit.max(0) as usize)
            .map(|p| (*p).clone())
            .collect();

        Ok(ListResult {
            items,
            total: rows.len() as i64,
        })
    }

    fn find_by_status(&self, side: PoSide, status: &str) -> Result<Vec<PricedPo>, DomainError> {
        Ok(self
            .lock()?
            .priced
            .iter()
            .filter(|p| p.side == side && p.status == status)
            .cloned()
            .collect())
    }

    fn report_rows(&self, side: PoSide) -> Result<Vec<ReportRow>, DomainError> {
        Ok(self
            .lock()?
            .priced
            .iter()
            .filter(|p| p.side == side)
            .map(|p| ReportRow {
                size: p.size.clone(),
                date: p.date,
                total_weight: p.total_weight,
                total_price: p.total_price,
            })
            .collect())
    }

    fn insert_legacy(&self, po: NewLegacyPo) -> Result<LegacyPo, DomainError> {
        let row = LegacyPo::from_new(Uuid::new_v4(), Utc::now(), po);
        self.lock()?.legacy.push(row.clone());
        Ok(row)
    }

    fn list_legacy(&self) -> Result<Vec<LegacyPo>, DomainError> {
        Ok(self.lock()?.legacy.clone())
    }
}
