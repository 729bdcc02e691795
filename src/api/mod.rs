pub mod client;
pub mod transport;
pub mod types;

pub use client::BackendClient;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
pub use types::{
    AssignRequest, Assignment, AutoScheduleRequest, AutoScheduleResult, CoverageStat,
    ExportPayload, LoadStat, NewStaff, ShiftRef, StaffMember,
};
