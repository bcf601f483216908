use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    LegacyPo, ListResult, NewLegacyPo, NewPricedPo, PoSide, PricedPo, DEFAULT_STATUS,
};
use crate::domain::ports::PoRepository;
use crate::domain::pricing::calculate_po;
use crate::domain::report::{monthly_sales, top_materials, MaterialTotal, MonthlyTotal};

#[derive(Debug, Clone)]
pub struct PendingPos {
    pub customers: Vec<PricedPo>,
    pub suppliers: Vec<PricedPo>,
}

#[derive(Clone)]
pub struct PoService {
    repo: Arc<dyn PoRepository>,
}

impl PoService {
    pub fn new<R: PoRepository>(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    /// Price a raw order and persist it.
    pub fn create_po(&self, side: PoSide, raw: Map<String, Value>) -> Result<PricedPo, DomainError> {
        let priced = calculate_po(raw)?;
        let new = NewPricedPo::from_priced(side, priced)?;
        let po = self.repo.insert(new)?;
        log::info!("{} PO {} stored for size {}", side.label(), po.id, po.size);
        Ok(po)
    }

    pub fn get_po(&self, side: PoSide, id: Uuid) -> Result<PricedPo, DomainError> {
        self.repo
            .find_by_id(side, id)?
            .ok_or(DomainError::NotFound)
    }

    pub fn list_pos(&self, side: PoSide, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.repo.list(side, page, limit)
    }

    /// Customer sizes ranked by delivered weight.
    pub fn top_materials(&self) -> Result<Vec<MaterialTotal>, DomainError> {
        let rows = self.repo.report_rows(PoSide::Customer)?;
        Ok(top_materials(&rows))
    }

    pub fn monthly_sales(&self) -> Result<Vec<MonthlyTotal>, DomainError> {
        let rows = self.repo.report_rows(PoSide::Customer)?;
        Ok(monthly_sales(&rows))
    }

    pub fn pending_pos(&self) -> Result<PendingPos, DomainError> {
        Ok(PendingPos {
            customers: self.repo.find_by_status(PoSide::Customer, DEFAULT_STATUS)?,
            suppliers: self.repo.find_by_status(PoSide::Supplier, DEFAULT_STATUS)?,
        })
    }

    pub fn create_legacy_po(&self, po: NewLegacyPo) -> Result<LegacyPo, DomainError> {
        self.repo.insert_legacy(po)
    }

    pub fn list_legacy_pos(&self) -> Result<Vec<LegacyPo>, DomainError> {
        self.repo.list_legacy()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::infrastructure::in_memory::InMemoryPoRepository;

    fn raw(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("expected an object");
        };
        map
    }

    #[test]
    fn create_po_rejects_missing_size_before_storing() {
        let service = PoService::new(InMemoryPoRepository::default());

        let err = service
            .create_po(PoSide::Customer, raw(json!({ "quantity": 2 })))
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.list_pos(PoSide::Customer, 1, 20).unwrap().total, 0);
    }

    #[test]
    fn get_po_of_unknown_id_is_not_found() {
        let service = PoService::new(InMemoryPoRepository::default());
        let po = service
            .create_po(PoSide::Supplier, raw(json!({ "size": "40x40x2" })))
            .unwrap();

        assert_eq!(service.get_po(PoSide::Supplier, po.id).unwrap().id, po.id);
        assert!(matches!(
            service.get_po(PoSide::Customer, po.id),
            Err(DomainError::NotFound)
        ));
        assert!(matches!(
            service.get_po(PoSide::Supplier, Uuid::new_v4()),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn pending_pos_split_by_side() {
        let service = PoService::new(InMemoryPoRepository::default());
        service
            .create_po(PoSide::Customer, raw(json!({ "size": "40x40x2" })))
            .unwrap();
        service
            .create_po(
                PoSide::Customer,
                raw(json!({ "size": "40x40x2", "status": "Delivered" })),
            )
            .unwrap();
        service
            .create_po(PoSide::Supplier, raw(json!({ "size": "219ODx6" })))
            .unwrap();

        let pending = service.pending_pos().unwrap();

        assert_eq!(pending.customers.len(), 1);
        assert_eq!(pending.suppliers.len(), 1);
        assert_eq!(pending.suppliers[0].size, "219ODx6");
    }

    #[test]
    fn reports_only_read_customer_orders() {
        let service = PoService::new(InMemoryPoRepository::default());
        service
            .create_po(
                PoSide::Customer,
                raw(json!({ "size": "400x400x12mm", "quantity": 5, "rate": 200, "date": "2025-10-03" })),
            )
            .unwrap();
        service
            .create_po(
                PoSide::Supplier,
                raw(json!({ "size": "600x300x12mm", "quantity": 50, "rate": 10, "date": "2025-10-04" })),
            )
            .unwrap();

        let top = service.top_materials().unwrap();
        let monthly = service.monthly_sales().unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].size, "400x400x12mm");
        assert_eq!(top[0].total_weight, 4444.44);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].month, "Oct 2025");
        assert_eq!(monthly[0].total, 1180.0);
    }
}
