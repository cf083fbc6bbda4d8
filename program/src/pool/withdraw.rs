use harvest_api::prelude::*;
use log::warn;

use crate::Harvest;

/// Pay out principal plus every pending reward. Returns the amount paid.
pub fn process_withdraw<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
) -> Result<Amount, HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    // Balances are zeroed before the outbound transfer is attempted.
    let settlement = harvest.ledger.settle(signer)?;
    let payout = settlement.payout;

    if let Err(e) = harvest.token.transfer(signer, payout) {
        warn!("withdrawal of {} to {} failed, restoring balances: {}", payout, signer, e);
        harvest.ledger.restore(settlement);
        return Err(e.into());
    }

    Withdrawn {
        account: signer.to_bytes(),
        principal: settlement.principal,
        rewards: settlement.reward_total(),
    }.log();

    Ok(payout)
}
