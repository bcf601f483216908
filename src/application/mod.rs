pub mod po_service;
