use serde::{Deserialize, Serialize};

/// A column of the input effort table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    Effort,
    EffortDate,
    EffortTimeCosts,
    BillingRate,
    JobTitle,
    Community,
    TaskType,
    CountryManager,
    Email,
    UserName,
    UserId,
    ProjectName,
    TaskName,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::Effort,
        Column::EffortDate,
        Column::EffortTimeCosts,
        Column::BillingRate,
        Column::JobTitle,
        Column::Community,
        Column::TaskType,
        Column::CountryManager,
        Column::Email,
        Column::UserName,
        Column::UserId,
        Column::ProjectName,
        Column::TaskName,
    ];

    /// Header as it appears in exported effort tables.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Effort => "effortExpense",
            Column::EffortDate => "effortDate",
            Column::EffortTimeCosts => "effortTimeCosts",
            Column::BillingRate => "billingRate_hourlyRate",
            Column::JobTitle => "msg_JobTitle",
            Column::Community => "msg_Community",
            Column::TaskType => "taskType",
            Column::CountryManager => "CountryManagerForProject",
            Column::Email => "Email",
            Column::UserName => "keyEffortUser",
            Column::UserId => "updUserOid",
            Column::ProjectName => "name_P",
            Column::TaskName => "Task Name",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header.trim())
    }

    /// Pass-through columns never become model features.
    pub fn is_pass_through(&self) -> bool {
        matches!(
            self,
            Column::UserName | Column::UserId | Column::ProjectName | Column::TaskName
        )
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}
