use harvest_api::prelude::*;
use log::debug;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, IteratorMode, Options, WriteBatch, DB};
use std::env;
use std::path::Path;
use thiserror::Error;

const COLUMN_FAMILIES: [&str; 8] = [
    CF_GLOBAL,
    CF_PRINCIPAL,
    CF_EPOCH_DEPOSITS,
    CF_EPOCH_TOTALS,
    CF_PARTICIPANTS,
    CF_EPOCH_REWARDS,
    CF_PENDING,
    CF_EPOCH_POOL,
];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("RocksDB error: {0}")]
    RocksDB(#[from] rocksdb::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Column family not found: {0}")]
    CfNotFound(&'static str),
    #[error("Global state not found")]
    GlobalNotFound,
    #[error("Invalid key in column family {0}")]
    InvalidKey(&'static str),
    #[error("Invalid value in column family {0}")]
    InvalidValue(&'static str),
}

/// Persisted ledger: one column family per mapping, keyed by account,
/// by account‖epoch or by epoch. Capability grants live in their own
/// column family, written by [`LedgerStore::save_roles`].
pub struct LedgerStore {
    db: DB,
}

impl LedgerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let mut cf_opts = Options::default();
        cf_opts.create_if_missing(true);
        cf_opts.set_compression_type(DBCompressionType::Lz4);

        let descriptors = COLUMN_FAMILIES
            .iter()
            .chain([CF_ROLES].iter())
            .map(|name| ColumnFamilyDescriptor::new(*name, cf_opts.clone()))
            .collect::<Vec<_>>();

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let db = DB::open_cf_descriptors(&db_opts, path, descriptors)?;

        Ok(Self { db })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily, StoreError> {
        self.db.cf_handle(name).ok_or(StoreError::CfNotFound(name))
    }

    /// Replace everything on disk with `ledger`, atomically.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let mut batch = WriteBatch::default();

        // Clear stale keys first; later puts in the same batch win.
        for name in COLUMN_FAMILIES {
            let cf = self.cf(name)?;
            for item in self.db.iterator_cf(cf, IteratorMode::Start) {
                let (key, _) = item?;
                batch.delete_cf(cf, key);
            }
        }

        let records = ledger.records();
        let count = records.len();

        for record in records {
            let (name, key, value) = encode_record(record);
            batch.put_cf(self.cf(name)?, key, value);
        }

        self.db.write(batch)?;
        debug!("saved {} ledger records", count);

        Ok(())
    }

    /// Rebuild the ledger from disk.
    pub fn load(&self) -> Result<Ledger, StoreError> {
        let mut records = Vec::new();

        for name in COLUMN_FAMILIES {
            let cf = self.cf(name)?;
            for item in self.db.iterator_cf(cf, IteratorMode::Start) {
                let (key, value) = item?;
                records.push(decode_record(name, &key, &value)?);
            }
        }

        debug!("loaded {} ledger records", records.len());
        Ledger::rebuild(records).ok_or(StoreError::GlobalNotFound)
    }

    /// Replace the stored capability sets with `roles`.
    pub fn save_roles(&self, roles: &Roles) -> Result<(), StoreError> {
        let cf = self.cf(CF_ROLES)?;
        let mut batch = WriteBatch::default();

        for capability in Capability::ALL {
            let value: Vec<u8> = roles
                .members(capability)
                .iter()
                .flat_map(|account| account.to_bytes())
                .collect();
            batch.put_cf(cf, [u8::from(capability)], value);
        }

        self.db.write(batch)?;
        Ok(())
    }

    /// Stored capability sets; empty if none were ever saved.
    pub fn load_roles(&self) -> Result<Roles, StoreError> {
        let cf = self.cf(CF_ROLES)?;
        let mut roles = Roles::default();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) = item?;
            let capability = match key.as_ref() {
                [tag] => Capability::try_from(*tag).map_err(|_| StoreError::InvalidKey(CF_ROLES))?,
                _ => return Err(StoreError::InvalidKey(CF_ROLES)),
            };
            for account in decode_accounts(CF_ROLES, &value)? {
                roles.grant(capability, &account);
            }
        }

        Ok(roles)
    }

    pub fn get_global(&self) -> Result<GlobalState, StoreError> {
        let value = self
            .db
            .get_cf(self.cf(CF_GLOBAL)?, GLOBAL_KEY)?
            .ok_or(StoreError::GlobalNotFound)?;

        GlobalState::try_read(&value).ok_or(StoreError::InvalidValue(CF_GLOBAL))
    }

    pub fn get_principal(&self, account: &Account) -> Result<Amount, StoreError> {
        self.get_amount(CF_PRINCIPAL, account.as_ref())
    }

    pub fn get_epoch_deposit(&self, account: &Account, epoch: Epoch) -> Result<Amount, StoreError> {
        self.get_amount(CF_EPOCH_DEPOSITS, &account_epoch_key(account, epoch))
    }

    pub fn get_epoch_total(&self, epoch: Epoch) -> Result<Amount, StoreError> {
        self.get_amount(CF_EPOCH_TOTALS, &epoch.to_be_bytes())
    }

    pub fn get_epoch_reward(&self, account: &Account, epoch: Epoch) -> Result<Amount, StoreError> {
        self.get_amount(CF_EPOCH_REWARDS, &account_epoch_key(account, epoch))
    }

    pub fn get_participants(&self, epoch: Epoch) -> Result<Vec<Account>, StoreError> {
        match self.db.get_cf(self.cf(CF_PARTICIPANTS)?, epoch.to_be_bytes())? {
            Some(value) => decode_accounts(CF_PARTICIPANTS, &value),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_pending(&self, account: &Account) -> Result<Vec<Epoch>, StoreError> {
        match self.db.get_cf(self.cf(CF_PENDING)?, account.as_ref())? {
            Some(value) => decode_epochs(&value),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_pool(&self, epoch: Epoch) -> Result<EpochPool, StoreError> {
        match self.db.get_cf(self.cf(CF_EPOCH_POOL)?, epoch.to_be_bytes())? {
            Some(value) => EpochPool::try_read(&value).ok_or(StoreError::InvalidValue(CF_EPOCH_POOL)),
            None => Ok(EpochPool::default()),
        }
    }

    // Missing keys read as zero, like the in-memory ledger.
    fn get_amount(&self, name: &'static str, key: &[u8]) -> Result<Amount, StoreError> {
        match self.db.get_cf(self.cf(name)?, key)? {
            Some(value) => read_u64(&value).ok_or(StoreError::InvalidValue(name)),
            None => Ok(0),
        }
    }
}

pub fn primary() -> Result<LedgerStore, StoreError> {
    let current_dir = env::current_dir().map_err(StoreError::IoError)?;
    let db_primary = current_dir.join("db_harvest");
    std::fs::create_dir_all(&db_primary).map_err(StoreError::IoError)?;
    LedgerStore::new(&db_primary)
}

fn encode_record(record: Record) -> (&'static str, Vec<u8>, Vec<u8>) {
    match record {
        Record::Global(global) => {
            (CF_GLOBAL, GLOBAL_KEY.to_vec(), global.to_bytes())
        }
        Record::Principal { account, amount } => {
            (CF_PRINCIPAL, account.to_bytes().to_vec(), amount.to_be_bytes().to_vec())
        }
        Record::EpochDeposit { account, epoch, amount } => {
            (CF_EPOCH_DEPOSITS, account_epoch_key(&account, epoch), amount.to_be_bytes().to_vec())
        }
        Record::EpochTotal { epoch, amount } => {
            (CF_EPOCH_TOTALS, epoch.to_be_bytes().to_vec(), amount.to_be_bytes().to_vec())
        }
        Record::Participants { epoch, accounts } => {
            let value = accounts.iter().flat_map(|a| a.to_bytes()).collect();
            (CF_PARTICIPANTS, epoch.to_be_bytes().to_vec(), value)
        }
        Record::EpochReward { account, epoch, amount } => {
            (CF_EPOCH_REWARDS, account_epoch_key(&account, epoch), amount.to_be_bytes().to_vec())
        }
        Record::Pending { account, epochs } => {
            let value = epochs.iter().flat_map(|e| e.to_be_bytes()).collect();
            (CF_PENDING, account.to_bytes().to_vec(), value)
        }
        Record::Pool { epoch, pool } => {
            (CF_EPOCH_POOL, epoch.to_be_bytes().to_vec(), pool.to_bytes())
        }
    }
}

fn decode_record(name: &'static str, key: &[u8], value: &[u8]) -> Result<Record, StoreError> {
    let bad_key = || StoreError::InvalidKey(name);
    let bad_value = || StoreError::InvalidValue(name);

    let record = match name {
        CF_GLOBAL => {
            Record::Global(GlobalState::try_read(value).ok_or_else(bad_value)?)
        }
        CF_PRINCIPAL => Record::Principal {
            account: read_account(key).ok_or_else(bad_key)?,
            amount: read_u64(value).ok_or_else(bad_value)?,
        },
        CF_EPOCH_DEPOSITS => {
            let (account, epoch) = read_account_epoch(key).ok_or_else(bad_key)?;
            Record::EpochDeposit {
                account,
                epoch,
                amount: read_u64(value).ok_or_else(bad_value)?,
            }
        }
        CF_EPOCH_TOTALS => Record::EpochTotal {
            epoch: read_u64(key).ok_or_else(bad_key)?,
            amount: read_u64(value).ok_or_else(bad_value)?,
        },
        CF_PARTICIPANTS => Record::Participants {
            epoch: read_u64(key).ok_or_else(bad_key)?,
            accounts: decode_accounts(CF_PARTICIPANTS, value)?,
        },
        CF_EPOCH_REWARDS => {
            let (account, epoch) = read_account_epoch(key).ok_or_else(bad_key)?;
            Record::EpochReward {
                account,
                epoch,
                amount: read_u64(value).ok_or_else(bad_value)?,
            }
        }
        CF_PENDING => Record::Pending {
            account: read_account(key).ok_or_else(bad_key)?,
            epochs: decode_epochs(value)?,
        },
        CF_EPOCH_POOL => Record::Pool {
            epoch: read_u64(key).ok_or_else(bad_key)?,
            pool: EpochPool::try_read(value).ok_or_else(bad_value)?,
        },
        _ => return Err(StoreError::CfNotFound(name)),
    };

    Ok(record)
}

fn read_u64(bytes: &[u8]) -> Option<u64> {
    bytes.try_into().ok().map(u64::from_be_bytes)
}

fn read_account(bytes: &[u8]) -> Option<Account> {
    let array: [u8; ACCOUNT_LEN] = bytes.try_into().ok()?;
    Some(Pubkey::new_from_array(array))
}

fn read_account_epoch(key: &[u8]) -> Option<(Account, Epoch)> {
    if key.len() != ACCOUNT_LEN + EPOCH_LEN {
        return None;
    }
    let (account, epoch) = key.split_at(ACCOUNT_LEN);
    Some((read_account(account)?, read_u64(epoch)?))
}

fn decode_accounts(name: &'static str, value: &[u8]) -> Result<Vec<Account>, StoreError> {
    if value.len() % ACCOUNT_LEN != 0 {
        return Err(StoreError::InvalidValue(name));
    }
    value
        .chunks_exact(ACCOUNT_LEN)
        .map(|chunk| read_account(chunk).ok_or(StoreError::InvalidValue(name)))
        .collect()
}

fn decode_epochs(value: &[u8]) -> Result<Vec<Epoch>, StoreError> {
    if value.len() % EPOCH_LEN != 0 {
        return Err(StoreError::InvalidValue(CF_PENDING));
    }
    value
        .chunks_exact(EPOCH_LEN)
        .map(|chunk| read_u64(chunk).ok_or(StoreError::InvalidValue(CF_PENDING)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn setup_store() -> Result<(LedgerStore, TempDir), StoreError> {
        let temp_dir = TempDir::new("rocksdb_test").map_err(StoreError::IoError)?;
        let store = LedgerStore::new(temp_dir.path())?;
        Ok((store, temp_dir))
    }

    fn sample_ledger() -> (Ledger, Vec<Account>) {
        let mut ledger = Ledger::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            EpochClock::new(1_000, EPOCH_DURATION),
        );
        let accounts: Vec<Account> = (0..3).map(|_| Pubkey::new_unique()).collect();

        for (i, account) in accounts.iter().enumerate() {
            let entry = ledger.prepare_deposit(account, 100 * (i as u64 + 1)).unwrap();
            ledger.commit_deposit(account, entry);
        }
        let plan = ledger.prepare_rewards(1000).unwrap();
        ledger.commit_rewards(&plan);

        (ledger, accounts)
    }

    #[test]
    fn test_save_and_load() -> Result<(), StoreError> {
        let (store, _temp_dir) = setup_store()?;
        let (ledger, accounts) = sample_ledger();

        store.save(&ledger)?;
        let loaded = store.load()?;

        assert_eq!(loaded, ledger);
        assert_eq!(loaded.participants(1), accounts.as_slice());

        Ok(())
    }

    #[test]
    fn test_point_reads() -> Result<(), StoreError> {
        let (store, _temp_dir) = setup_store()?;
        let (ledger, accounts) = sample_ledger();
        store.save(&ledger)?;

        assert_eq!(store.get_global()?, *ledger.global());
        assert_eq!(store.get_principal(&accounts[1])?, 200);
        assert_eq!(store.get_epoch_deposit(&accounts[2], 1)?, 300);
        assert_eq!(store.get_epoch_total(1)?, 600);
        assert_eq!(store.get_epoch_reward(&accounts[0], 1)?, 166);
        assert_eq!(store.get_participants(1)?, accounts);
        assert_eq!(store.get_pending(&accounts[0])?, vec![1]);
        assert_eq!(store.get_pool(1)?, ledger.pool(1));
        assert_eq!(store.get_pool(1)?.injections, 1);

        // Unknown keys read as empty.
        assert_eq!(store.get_principal(&Pubkey::new_unique())?, 0);
        assert_eq!(store.get_epoch_total(9)?, 0);
        assert!(store.get_participants(9)?.is_empty());

        Ok(())
    }

    #[test]
    fn test_save_drops_stale_keys() -> Result<(), StoreError> {
        let (store, _temp_dir) = setup_store()?;
        let (mut ledger, accounts) = sample_ledger();
        store.save(&ledger)?;

        ledger.settle(&accounts[0]).unwrap();
        store.save(&ledger)?;

        assert_eq!(store.get_principal(&accounts[0])?, 0);
        assert_eq!(store.get_epoch_reward(&accounts[0], 1)?, 0);
        assert_eq!(store.get_epoch_deposit(&accounts[0], 1)?, 0);
        assert_eq!(store.get_participants(1)?, accounts[1..].to_vec());
        assert!(store.get_pending(&accounts[0])?.is_empty());
        assert_eq!(store.load()?, ledger);

        Ok(())
    }

    #[test]
    fn test_empty_store_has_no_ledger() -> Result<(), StoreError> {
        let (store, _temp_dir) = setup_store()?;

        assert!(matches!(store.load(), Err(StoreError::GlobalNotFound)));
        assert!(matches!(store.get_global(), Err(StoreError::GlobalNotFound)));

        Ok(())
    }

    #[test]
    fn test_reopen_keeps_state() -> Result<(), StoreError> {
        let temp_dir = TempDir::new("rocksdb_reopen").map_err(StoreError::IoError)?;
        let (ledger, _) = sample_ledger();

        {
            let store = LedgerStore::new(temp_dir.path())?;
            store.save(&ledger)?;
        }

        let store = LedgerStore::new(temp_dir.path())?;
        assert_eq!(store.load()?, ledger);

        Ok(())
    }

    #[test]
    fn test_roles_survive_reopen() -> Result<(), StoreError> {
        let temp_dir = TempDir::new("rocksdb_roles").map_err(StoreError::IoError)?;
        let admin = Pubkey::new_unique();
        let updater = Pubkey::new_unique();
        let mut roles = Roles::new(&admin);
        roles.grant(Capability::WeekUpdater, &updater);

        {
            let store = LedgerStore::new(temp_dir.path())?;
            assert_eq!(store.load_roles()?, Roles::default());
            store.save_roles(&roles)?;
        }

        let store = LedgerStore::new(temp_dir.path())?;
        let loaded = store.load_roles()?;
        assert!(loaded.has_capability(Capability::WeekUpdater, &updater));
        assert!(!loaded.has_capability(Capability::Admin, &updater));
        for capability in Capability::ALL {
            assert!(loaded.has_capability(capability, &admin));
            assert_eq!(loaded.members(capability), roles.members(capability));
        }

        Ok(())
    }

    #[test]
    fn test_ledger_save_leaves_roles_alone() -> Result<(), StoreError> {
        let (store, _temp_dir) = setup_store()?;
        let admin = Pubkey::new_unique();
        store.save_roles(&Roles::new(&admin))?;

        let (ledger, _) = sample_ledger();
        store.save(&ledger)?;

        assert!(store.load_roles()?.has_capability(Capability::Admin, &admin));
        Ok(())
    }
}
