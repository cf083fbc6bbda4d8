pub mod context;
pub mod pool;
pub mod week;

pub use context::*;
use pool::*;
use week::*;

use harvest_api::prelude::*;
use log::debug;

/// Decode `data` and run the matching operation on behalf of `signer`.
pub fn process_instruction<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
    data: &[u8],
) -> Result<(), HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    dispatch(harvest, signer, data)
        .inspect_err(|e| debug!("instruction from {} failed with code {}: {}", signer, e.code(), e))
}

fn dispatch<T, A, C>(
    harvest: &mut Harvest<T, A, C>,
    signer: &Account,
    data: &[u8],
) -> Result<(), HarvestError>
where
    T: TokenGateway,
    A: AccessController,
    C: Clock,
{
    let (ix, data) = parse_instruction(data)?;

    match ix {
        // Pool instructions
        InstructionType::Deposit => {
            let args = Deposit::try_from_bytes(data)?;
            process_deposit(harvest, signer, u64::from_le_bytes(args.amount))?;
        }
        InstructionType::Withdraw => { process_withdraw(harvest, signer)?; }
        InstructionType::AddRewards => {
            let args = AddRewards::try_from_bytes(data)?;
            process_add_rewards(harvest, signer, u64::from_le_bytes(args.amount))?;
        }

        // Week instructions
        InstructionType::StartNewWeek => { process_start_new_week(harvest, signer)?; }
        InstructionType::GrantWeekUpdater => {
            let args = GrantWeekUpdater::try_from_bytes(data)?;
            process_grant_week_updater(harvest, signer, &Pubkey::new_from_array(args.account))?;
        }

        InstructionType::Unknown => { return Err(HarvestError::InvalidInstruction); }
    }

    Ok(())
}
