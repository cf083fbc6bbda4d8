use harvest_api::prelude::*;
use log::warn;

use crate::Harvest;

pub fn process_deposit<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
    amount: Amount,
) -> Result<(), HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    // All checks, overflow included, happen before tokens move.
    let entry = harvest.ledger.prepare_deposit(signer, amount)?;
    let vault = harvest.ledger.vault();

    // Pull funds first; nothing is credited unless they arrive.
    harvest
        .token
        .transfer_from(signer, &vault, amount)
        .inspect_err(|e| warn!("deposit of {} by {} failed: {}", amount, signer, e))?;

    harvest.ledger.commit_deposit(signer, entry);

    Deposited {
        account: signer.to_bytes(),
        epoch: entry.epoch,
        amount,
        principal: entry.principal,
    }.log();

    Ok(())
}
