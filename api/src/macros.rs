#[macro_export]
macro_rules! impl_to_bytes {
    ($struct_name:ident, $discriminator_name:ident) => {
        impl $struct_name {
            pub fn to_bytes(&self) -> Vec<u8> {
                [
                    vec![$discriminator_name::$struct_name as u8],
                    bytemuck::bytes_of(self).to_vec(),
                ]
                .concat()
            }
        }
    };
}

#[macro_export]
macro_rules! impl_try_from_bytes {
    ($struct_name:ident, $discriminator_name:ident) => {
        impl $struct_name {
            /// Parse the body that follows the discriminator byte.
            pub fn try_from_bytes(data: &[u8]) -> Result<&Self, $crate::error::HarvestError> {
                let struct_size = core::mem::size_of::<Self>();
                if data.len() < struct_size {
                    return Err($crate::error::HarvestError::InvalidInstruction);
                }
                bytemuck::try_from_bytes::<Self>(&data[..struct_size])
                    .map_err(|_| $crate::error::HarvestError::InvalidInstruction)
            }
        }
    };
}

#[macro_export]
macro_rules! instruction {
    ($discriminator_name:ident, $struct_name:ident) => {
        $crate::impl_to_bytes!($struct_name, $discriminator_name);
        $crate::impl_try_from_bytes!($struct_name, $discriminator_name);
    };
}

#[macro_export]
macro_rules! event {
    ($discriminator_name:ident, $struct_name:ident) => {
        $crate::impl_to_bytes!($struct_name, $discriminator_name);

        impl $struct_name {
            const DISCRIMINATOR_SIZE: usize = 1;

            /// Decode a full event record, discriminator included.
            pub fn try_read(data: &[u8]) -> Result<Self, $crate::error::HarvestError> {
                let (tag, body) = data
                    .split_first()
                    .ok_or($crate::error::HarvestError::InvalidInstruction)?;
                if *tag != $discriminator_name::$struct_name as u8 {
                    return Err($crate::error::HarvestError::InvalidInstruction);
                }
                bytemuck::try_pod_read_unaligned::<Self>(body)
                    .map_err(|_| $crate::error::HarvestError::InvalidInstruction)
            }

            pub fn size_of() -> usize {
                core::mem::size_of::<Self>() + Self::DISCRIMINATOR_SIZE
            }

            /// Publish the encoded event the way on-chain programs emit "Program data".
            pub fn log(&self) {
                log::info!(
                    target: "harvest::event",
                    "Program data: {}",
                    base64::encode(self.to_bytes())
                );
            }
        }
    };
}
