use contracts::enums::ReportType;

/// Logical data sets a report can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EndpointKey {
    SalesSeries,
    TopProducts,
    OrderValues,
    CustomerSegments,
    Cohort,
    Rfm,
    Frequency,
    Inventory,
    Campaigns,
    Vouchers,
    Financial,
}

/// One logical endpoint: the current GET route and the legacy POST route
/// that serves the same data under the old stored-procedure API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub key: EndpointKey,
    pub primary: &'static str,
    pub legacy: &'static str,
}

impl EndpointKey {
    pub fn spec(self) -> EndpointSpec {
        let (primary, legacy) = match self {
            EndpointKey::SalesSeries => ("/api/v2/reports/sales/revenue", "/api/reports/BaoCaoDoanhThu"),
            EndpointKey::TopProducts => ("/api/v2/reports/sales/top-products", "/api/reports/SanPhamBanChay"),
            EndpointKey::OrderValues => ("/api/v2/reports/sales/order-values", "/api/reports/GiaTriDonHang"),
            EndpointKey::CustomerSegments => ("/api/v2/reports/customers/segments", "/api/reports/PhanKhucKhachHang"),
            EndpointKey::Cohort => ("/api/v2/reports/customers/cohorts", "/api/reports/TyLeGiuChan"),
            EndpointKey::Rfm => ("/api/v2/reports/customers/rfm", "/api/reports/PhanTichRFM"),
            EndpointKey::Frequency => ("/api/v2/reports/customers/frequency", "/api/reports/TanSuatMuaHang"),
            EndpointKey::Inventory => ("/api/v2/reports/inventory/alerts", "/api/reports/CanhBaoTonKho"),
            EndpointKey::Campaigns => ("/api/v2/reports/marketing/campaigns", "/api/reports/HieuQuaChienDich"),
            EndpointKey::Vouchers => ("/api/v2/reports/marketing/vouchers", "/api/reports/SuDungVoucher"),
            EndpointKey::Financial => ("/api/v2/reports/financial/summary", "/api/reports/TongHopTaiChinh"),
        };
        EndpointSpec {
            key: self,
            primary,
            legacy,
        }
    }
}

/// Endpoints fetched together for one report type
pub fn catalog(report_type: ReportType) -> Vec<EndpointSpec> {
    let keys: &[EndpointKey] = match report_type {
        ReportType::Sales => &[
            EndpointKey::SalesSeries,
            EndpointKey::TopProducts,
            EndpointKey::OrderValues,
        ],
        ReportType::Customers => &[
            EndpointKey::SalesSeries,
            EndpointKey::CustomerSegments,
            EndpointKey::Cohort,
            EndpointKey::Rfm,
            EndpointKey::Frequency,
        ],
        ReportType::Inventory => &[EndpointKey::Inventory, EndpointKey::TopProducts],
        ReportType::Marketing => &[
            EndpointKey::SalesSeries,
            EndpointKey::Campaigns,
            EndpointKey::Vouchers,
        ],
        ReportType::Financial => &[EndpointKey::SalesSeries, EndpointKey::Financial],
    };
    keys.iter().map(|k| k.spec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_report_has_endpoints() {
        for report_type in ReportType::all() {
            let specs = catalog(report_type);
            assert!(!specs.is_empty());
            let keys: HashSet<EndpointKey> = specs.iter().map(|s| s.key).collect();
            assert_eq!(keys.len(), specs.len(), "duplicate endpoint for {report_type}");
        }
    }

    #[test]
    fn test_primary_and_legacy_differ() {
        for report_type in ReportType::all() {
            for spec in catalog(report_type) {
                assert_ne!(spec.primary, spec.legacy);
                assert!(spec.primary.starts_with("/api/v2/"));
            }
        }
    }
}
