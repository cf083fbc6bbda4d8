use bytemuck::{Pod, Zeroable};
use num_enum::TryFromPrimitive;

use crate::consts::*;
use crate::error::HarvestError;
use crate::instruction;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum InstructionType {
    Unknown = 0,

    // Pool instructions
    Deposit,
    Withdraw,
    AddRewards,

    // Week instructions
    StartNewWeek,
    GrantWeekUpdater,
}

instruction!(InstructionType, Deposit);
instruction!(InstructionType, Withdraw);
instruction!(InstructionType, AddRewards);

instruction!(InstructionType, StartNewWeek);
instruction!(InstructionType, GrantWeekUpdater);

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Deposit {
    pub amount: [u8; AMOUNT_LEN],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Withdraw {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AddRewards {
    pub amount: [u8; AMOUNT_LEN],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StartNewWeek {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrantWeekUpdater {
    pub account: [u8; ACCOUNT_LEN],
}

/// Split raw instruction data into its type and argument body.
pub fn parse_instruction(data: &[u8]) -> Result<(InstructionType, &[u8]), HarvestError> {
    let (tag, rest) = data
        .split_first()
        .ok_or(HarvestError::InvalidInstruction)?;

    let ix = InstructionType::try_from(*tag)
        .map_err(|_| HarvestError::InvalidInstruction)?;

    Ok((ix, rest))
}
