use harvest_api::prelude::*;
use log::info;

use crate::Harvest;

pub fn process_start_new_week<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
) -> Result<Epoch, HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    check_condition(
        harvest.access.has_capability(Capability::WeekUpdater, signer),
        HarvestError::Unauthorized,
    )?;

    let current_time = harvest.clock.unix_timestamp();
    let epoch = harvest.ledger.advance_week(current_time)?;

    info!("week {} started at {} by {}", epoch, current_time, signer);

    WeekStarted {
        epoch,
        started_at: current_time,
    }.log();

    Ok(epoch)
}
