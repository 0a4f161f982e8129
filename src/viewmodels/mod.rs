pub mod login_viewmodel;
pub mod dashboard_viewmodel;
pub mod checklist_viewmodel;
pub mod validation_viewmodel;
pub mod report_viewmodel;
pub mod scanner_viewmodel;

pub use login_viewmodel::LoginViewModel;
pub use dashboard_viewmodel::{DashboardData, DashboardViewModel};
pub use checklist_viewmodel::ChecklistViewModel;
pub use validation_viewmodel::ValidationViewModel;
pub use report_viewmodel::ReportViewModel;
pub use scanner_viewmodel::ScannerViewModel;
