use std::collections::BTreeMap;

use rosterbox_core::{Slot, SlotStatus, Volunteer};
use serde::Serialize;

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_volunteers: usize,
    /// Volunteers with at least one booked slot.
    pub booked_volunteers: usize,
    pub non_booked_volunteers: usize,
    pub active_volunteers: usize,
    pub inactive_volunteers: usize,
    pub total_slots: usize,
    pub slots_by_status: BTreeMap<String, usize>,
}

impl DashboardStats {
    pub fn from_records(volunteers: &[Volunteer], slots: &[Slot]) -> Self {
        let booked = volunteers.iter().filter(|v| v.is_booked()).count();
        let active = volunteers.iter().filter(|v| v.is_active).count();
        let mut slots_by_status = BTreeMap::new();
        for slot in slots {
            *slots_by_status
                .entry(status_name(slot.status).to_owned())
                .or_insert(0) += 1;
        }
        Self {
            total_volunteers: volunteers.len(),
            booked_volunteers: booked,
            non_booked_volunteers: volunteers.len() - booked,
            active_volunteers: active,
            inactive_volunteers: volunteers.len() - active,
            total_slots: slots.len(),
            slots_by_status,
        }
    }

    /// Number of slots with the given status.
    pub fn slots_with(&self, status: SlotStatus) -> usize {
        self.slots_by_status
            .get(status_name(status))
            .copied()
            .unwrap_or(0)
    }
}

fn status_name(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Confirmed => "confirmed",
        SlotStatus::Pending => "pending",
        SlotStatus::Cancelled => "cancelled",
        SlotStatus::Unknown => "unknown",
    }
}
