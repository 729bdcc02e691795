use std::path::PathBuf;

use log::{info, warn};

use crate::api::types::default_shift_types;
use crate::api::{Assignment, AutoScheduleRequest, BackendClient, CoverageStat, LoadStat};
use crate::download::DownloadSink;
use crate::form::{validate_assignment, AssignForm};
use crate::period::Period;
use crate::state::ListState;

/// Roster of one period plus its coverage and staff-load sections.
///
/// Manual assigns merge the returned row; auto-schedule reloads the whole
/// roster because the backend may have touched rows it does not report.
pub struct RosterBoard {
    client: BackendClient,
    sink: Box<dyn DownloadSink>,
    period: Period,
    pub roster: ListState<Assignment>,
    pub coverage: ListState<CoverageStat>,
    pub staff_load: ListState<LoadStat>,
    pub form: AssignForm,
    pub shift_types: Vec<String>,
    pub min_per_shift: u32,
    /// Outcome line of the last auto-schedule or export.
    pub notice: Option<String>,
    pub export_error: Option<String>,
}

impl RosterBoard {
    pub fn new(client: BackendClient, sink: Box<dyn DownloadSink>, period: Period) -> Self {
        RosterBoard {
            client,
            sink,
            period,
            roster: ListState::new(),
            coverage: ListState::new(),
            staff_load: ListState::new(),
            form: AssignForm::default(),
            shift_types: default_shift_types(),
            min_per_shift: 1,
            notice: None,
            export_error: None,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Loads roster, coverage and staff load side by side.
    pub async fn mount(&mut self) {
        self.roster.begin_load();
        self.coverage.begin_load();
        self.staff_load.begin_load();

        let (roster, coverage, load) = tokio::join!(
            self.client.roster(&self.period),
            self.client.coverage(&self.period),
            self.client.staff_load(&self.period),
        );

        match roster {
            Ok(rows) => self.roster.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load roster for {}: {}", self.period, e);
                self.roster.finish_err(e.to_string());
            }
        }
        match coverage {
            Ok(rows) => self.coverage.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load coverage stats: {}", e);
                self.coverage.finish_err(e.to_string());
            }
        }
        match load {
            Ok(rows) => self.staff_load.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load staff-load stats: {}", e);
                self.staff_load.finish_err(e.to_string());
            }
        }
    }

    pub async fn set_period(&mut self, period: Period) {
        self.period = period;
        self.mount().await;
    }

    pub async fn load_roster(&mut self) {
        self.roster.begin_load();
        match self.client.roster(&self.period).await {
            Ok(rows) => self.roster.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load roster for {}: {}", self.period, e);
                self.roster.finish_err(e.to_string());
            }
        }
    }

    pub async fn load_coverage(&mut self) {
        self.coverage.begin_load();
        match self.client.coverage(&self.period).await {
            Ok(rows) => self.coverage.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load coverage stats: {}", e);
                self.coverage.finish_err(e.to_string());
            }
        }
    }

    pub async fn load_staff_load(&mut self) {
        self.staff_load.begin_load();
        match self.client.staff_load(&self.period).await {
            Ok(rows) => self.staff_load.finish_ok(rows),
            Err(e) => {
                warn!("Failed to load staff-load stats: {}", e);
                self.staff_load.finish_err(e.to_string());
            }
        }
    }

    pub async fn refresh_stats(&mut self) {
        self.load_coverage().await;
        self.load_staff_load().await;
    }

    /// Submits the assign form and appends the created row as returned.
    pub async fn assign(&mut self) {
        let request = match validate_assignment(&self.form) {
            Ok(request) => request,
            Err(msg) => {
                self.roster.fail_action(msg);
                return;
            }
        };

        match self.client.assign(&request).await {
            Ok(created) => {
                info!(
                    "Assigned staff {} as assignment {}",
                    created.staff_id, created.id
                );
                self.roster.push(created);
                self.form.clear();
            }
            Err(e) => {
                warn!("Failed to assign staff {}: {}", request.staff_id, e);
                self.roster.fail_action(e.to_string());
            }
        }
    }

    pub async fn unassign(&mut self, assignment_id: i64) {
        match self.client.unassign(assignment_id).await {
            Ok(()) => {
                info!("Removed assignment {}", assignment_id);
                self.roster.remove_where(|a| a.id == assignment_id);
            }
            Err(e) => {
                warn!("Failed to remove assignment {}: {}", assignment_id, e);
                self.roster.fail_action(e.to_string());
            }
        }
    }

    pub async fn auto_schedule(&mut self) {
        let request = AutoScheduleRequest {
            period: self.period,
            shift_types: self.shift_types.clone(),
            min_per_shift: self.min_per_shift,
        };

        match self.client.auto_schedule(&request).await {
            Ok(result) => {
                info!(
                    "Auto-schedule for {} created {} assignments: {:?}",
                    self.period,
                    result.created_assignments.len(),
                    result.created_assignments
                );
                self.notice = Some(format!(
                    "Auto-schedule created {} assignments",
                    result.created_assignments.len()
                ));
                self.load_roster().await;
            }
            Err(e) => {
                warn!("Auto-schedule for {} failed: {}", self.period, e);
                self.roster.fail_action(e.to_string());
            }
        }
    }

    /// Fetches the CSV export and hands it to the download sink.
    /// Returns where the file was saved.
    pub async fn export_csv(&mut self) -> Option<PathBuf> {
        self.export_error = None;

        let payload = match self.client.export_roster(&self.period).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Roster export for {} failed: {}", self.period, e);
                self.export_error = Some(e.to_string());
                return None;
            }
        };

        match self.sink.save(&payload) {
            Ok(path) => {
                let rows = match payload.row_count() {
                    Ok(rows) => rows,
                    Err(e) => {
                        warn!("Exported CSV did not parse cleanly: {}", e);
                        0
                    }
                };
                info!(
                    "Saved {} ({}, {} rows) to {}",
                    payload.filename,
                    payload.content_type,
                    rows,
                    path.display()
                );
                self.notice = Some(format!("Exported {} rows to {}", rows, path.display()));
                Some(path)
            }
            Err(e) => {
                warn!("Could not save {}: {}", payload.filename, e);
                self.export_error = Some(e.to_string());
                None
            }
        }
    }
}
