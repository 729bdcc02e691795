use log::{info, warn};

use crate::api::{BackendClient, StaffMember};
use crate::form::{validate_staff, StaffForm};
use crate::state::ListState;

/// Staff list with its create form and per-row delete.
///
/// Every successful mutation is followed by a full reload; the list only
/// ever holds what `GET /staff` returned.
pub struct StaffDirectory {
    client: BackendClient,
    pub staff: ListState<StaffMember>,
    pub form: StaffForm,
}

impl StaffDirectory {
    pub fn new(client: BackendClient) -> Self {
        StaffDirectory {
            client,
            staff: ListState::new(),
            form: StaffForm::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.load_staff().await;
    }

    pub async fn load_staff(&mut self) {
        self.staff.begin_load();
        match self.client.list_staff().await {
            Ok(items) => self.staff.finish_ok(items),
            Err(e) => {
                warn!("Failed to load staff: {}", e);
                self.staff.finish_err(e.to_string());
            }
        }
    }

    /// Submits the form. Invalid input never reaches the backend.
    pub async fn create_staff(&mut self) {
        let new_staff = match validate_staff(&self.form) {
            Ok(staff) => staff,
            Err(msg) => {
                self.staff.fail_action(msg);
                return;
            }
        };

        match self.client.create_staff(&new_staff).await {
            Ok(id) => {
                match id {
                    Some(id) => info!("Created staff member {} ({})", id, new_staff.name),
                    None => info!("Created staff member {}", new_staff.name),
                }
                self.form.clear();
                self.load_staff().await;
            }
            Err(e) => {
                warn!("Failed to create staff member '{}': {}", new_staff.name, e);
                self.staff.fail_action(e.to_string());
            }
        }
    }

    pub async fn delete_staff(&mut self, id: i64) {
        match self.client.delete_staff(id).await {
            Ok(()) => {
                info!("Deleted staff member {}", id);
                self.load_staff().await;
            }
            Err(e) => {
                warn!("Failed to delete staff member {}: {}", id, e);
                self.staff.fail_action(e.to_string());
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&StaffMember> {
        self.staff.data.iter().find(|s| s.id == id)
    }
}
