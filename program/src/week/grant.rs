use harvest_api::prelude::*;
use log::debug;

use crate::Harvest;

pub fn process_grant_week_updater<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
    account: &Account,
) -> Result<(), HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    check_condition(
        harvest.access.has_capability(Capability::Admin, signer),
        HarvestError::Unauthorized,
    )?;

    if !harvest.access.grant(Capability::WeekUpdater, account) {
        debug!("{} already holds the week-updater capability", account);
        return Ok(());
    }

    WeekUpdaterGranted {
        account: account.to_bytes(),
    }.log();

    Ok(())
}
