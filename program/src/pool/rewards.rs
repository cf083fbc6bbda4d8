use harvest_api::prelude::*;
use log::warn;

use crate::Harvest;

/// Split `amount` across the current week's depositors in proportion to what
/// each deposited this week. Floor-division remainders stay in the vault.
pub fn process_add_rewards<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
    amount: Amount,
) -> Result<(), HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    check_condition(
        harvest.access.has_capability(Capability::RewardDistributor, signer),
        HarvestError::Unauthorized,
    )?;

    // The split is computed against the registry as it stands now.
    let plan = harvest.ledger.prepare_rewards(amount)?;
    let vault = harvest.ledger.vault();

    harvest
        .token
        .transfer_from(signer, &vault, amount)
        .inspect_err(|e| warn!("reward injection of {} by {} failed: {}", amount, signer, e))?;

    harvest.ledger.commit_rewards(&plan);

    RewardsAdded {
        epoch: plan.epoch,
        amount,
        distributed: plan.distributed,
        participants: plan.allocations.len() as u64,
    }.log();

    Ok(())
}
