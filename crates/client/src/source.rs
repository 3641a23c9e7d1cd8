use async_trait::async_trait;
use chrono::NaiveDate;
use clinicslots_core::{
    calendar::{week_range, week_view, WeekView},
    errors::SlotResult,
    models::{AvailabilityRule, SlotStatus, TimeSlot},
    session::TokenStorage,
    slots::expand_rules,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ApiClient;

/// Where availability rules and resolved slots come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn availability_rules(&self, clinician_id: Uuid) -> SlotResult<Vec<AvailabilityRule>>;

    async fn time_slots(
        &self,
        clinician_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SlotResult<Vec<TimeSlot>>;
}

#[async_trait]
impl<S: TokenStorage> AvailabilitySource for ApiClient<S> {
    async fn availability_rules(&self, clinician_id: Uuid) -> SlotResult<Vec<AvailabilityRule>> {
        self.fetch_availability_rules(clinician_id).await
    }

    async fn time_slots(
        &self,
        clinician_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SlotResult<Vec<TimeSlot>> {
        self.fetch_time_slots(clinician_id, from, to).await
    }
}

/// Shows the week containing `anchor` as the clinician's rules would lay it out,
/// every slot marked available. Rules that fail validation are skipped.
pub async fn preview_week<A>(
    source: &A,
    clinician_id: Uuid,
    anchor: NaiveDate,
) -> SlotResult<WeekView>
where
    A: AvailabilitySource + ?Sized,
{
    let (from, to) = week_range(anchor)?;
    let rules: Vec<AvailabilityRule> = source
        .availability_rules(clinician_id)
        .await?
        .into_iter()
        .filter(|rule| match rule.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping availability rule {}: {}", rule.id, e);
                false
            }
        })
        .collect();

    let slots: Vec<TimeSlot> = expand_rules(&rules, from, to)?
        .into_iter()
        .map(|descriptor| descriptor.into_slot(SlotStatus::Available))
        .collect();

    debug!(
        "Previewed {} slots from {} rules for week of {}",
        slots.len(),
        rules.len(),
        from
    );

    week_view(anchor, &slots)
}

/// The week containing `anchor` with slot statuses as resolved by the booking system.
pub async fn load_week<A>(
    source: &A,
    clinician_id: Uuid,
    anchor: NaiveDate,
) -> SlotResult<WeekView>
where
    A: AvailabilitySource + ?Sized,
{
    let (from, to) = week_range(anchor)?;
    let slots = source.time_slots(clinician_id, from, to).await?;
    week_view(anchor, &slots)
}
