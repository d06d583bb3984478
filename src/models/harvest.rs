use serde::{Deserialize, Serialize};

/// A user record as returned by the Harvest `/v2/users` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// A single logged time entry within the reporting window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TimeEntry {
    pub hours: f64,
    pub billable: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TimeEntriesResponse {
    pub time_entries: Vec<TimeEntry>,
}

/// Account metadata from `/v2/company`. Informational only, never reported.
#[derive(Serialize, Deserialize, Debug)]
pub struct Company {
    pub name: String,
    pub is_active: Option<bool>,
}
