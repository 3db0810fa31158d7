mod errors;
mod report_view;

pub use errors::ViewError;
pub use report_view::ReportView;
