// Test utilities for the QUP vault client
//
// Two ledger clients:
// - MemoryLedger: in-memory accounts and balances that apply each decoded
//   instruction the way the vault program does. Used for confirmation paths.
// - LiteSvmLedger: a real LiteSVM bank with SPL mints and token accounts. The
//   vault program is not deployed there, so every vault submission is
//   rejected by the runtime.

use std::collections::{HashMap, VecDeque};

use litesvm::LiteSVM;
use litesvm_token::{
    get_spl_account, spl_token::state::Account as TokenAccount, CreateAssociatedTokenAccount,
    CreateMint, MintTo,
};
use qup_client::{
    pda::owner_token_account, Confirmation, LedgerClient, MinorUnitAmount, RejectionReason,
    StakeAccountRecord, VaultAccountRecord, VaultConfig, VaultInstruction,
};
use solana_sdk::{
    clock::Clock,
    instruction::Instruction,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

// Program and mint used by tests that don't need the devnet deployment
pub const TEST_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("BQ71gq1J5oftcqsnQzz1rWgVo4b7PmD8i1x4gy2wDnuu");
pub const TEST_MINT: Pubkey = solana_sdk::pubkey!("DGC9jBJTMQeWATH6ecnRfBUfjncFfoG1b4VyZXmSxNq9");

// Token decimals
pub const DECIMALS: u8 = 9;
pub const ONE_TOKEN: u64 = 1_000_000_000;

// Vault reward rate used by emulated vaults: 10 bps per day
pub const REWARD_RATE_BPS: u64 = 10;

// 2025-01-01T00:00:00Z
pub const GENESIS_TS: i64 = 1_735_689_600;

// Selectors the browser driver shipped as literals (fixtures only)
pub const DRIVER_STAKE_LITERAL: [u8; 8] = [48, 191, 163, 44, 71, 129, 63, 164];
pub const DRIVER_UNSTAKE_LITERAL: [u8; 8] = [90, 95, 107, 42, 205, 124, 50, 225];
pub const DRIVER_CLAIM_LITERAL: [u8; 8] = [62, 198, 214, 193, 213, 159, 108, 210];
// What the manual initializer hard-coded for initialize_vault
pub const MANUAL_INIT_LITERAL: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];

// ======================== CONFIG HELPERS ========================

pub fn test_config(authority: &Pubkey) -> VaultConfig {
    VaultConfig::for_authority(TEST_PROGRAM_ID, TEST_MINT, authority)
        .expect("Vault PDAs should derive")
        .with_decimals(DECIMALS)
}

pub fn tokens(whole: u64) -> MinorUnitAmount {
    MinorUnitAmount::new(whole * ONE_TOKEN)
}

pub fn vault_record(config: &VaultConfig, authority: &Pubkey, total_staked: u64) -> VaultAccountRecord {
    VaultAccountRecord {
        authority: *authority,
        token_mint: *config.token_mint(),
        token_vault: *config.vault_token_account(),
        total_staked,
        reward_rate_bps: REWARD_RATE_BPS,
        last_update_ts: GENESIS_TS,
    }
}

// ======================== MEMORY LEDGER ========================

pub struct MemoryLedger {
    pub accounts: HashMap<Pubkey, Vec<u8>>,
    pub token_balances: HashMap<Pubkey, u64>,
    pub lamports: HashMap<Pubkey, u64>,
    pub now: i64,
    pub submitted: Vec<Instruction>,
    pub rejections: VecDeque<RejectionReason>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            token_balances: HashMap::new(),
            lamports: HashMap::new(),
            now: GENESIS_TS,
            submitted: Vec::new(),
            rejections: VecDeque::new(),
        }
    }

    // Owner with SOL and a funded token account for the config's mint
    pub fn fund_owner(&mut self, config: &VaultConfig, owner: &Pubkey, token_amount: u64, lamports: u64) {
        let ata = owner_token_account(owner, config.token_mint());
        self.token_balances.insert(ata, token_amount);
        self.lamports.insert(*owner, lamports);
    }

    // Existing vault account so position() can read the reward rate
    pub fn seed_vault(&mut self, config: &VaultConfig, authority: &Pubkey) {
        let data = vault_record(config, authority, 0)
            .to_account_data()
            .expect("Vault record should serialize");
        self.accounts.insert(*config.vault(), data);
    }

    // Queue a failure for the next submission
    pub fn reject_next(&mut self, reason: RejectionReason) {
        self.rejections.push_back(reason);
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += days * 86_400;
    }

    // Rewards the program would have credited to the stake, funded in the
    // vault token account so claim and unstake can pay them out
    pub fn accrue_rewards(&mut self, config: &VaultConfig, stake_address: &Pubkey, amount: u64) {
        let mut record = self
            .stake_record(stake_address)
            .expect("Stake record should exist");
        record.rewards = MinorUnitAmount::new(record.rewards.get() + amount);
        self.accounts.insert(
            *stake_address,
            record.to_account_data().expect("Stake record should serialize"),
        );
        self.credit(*config.vault_token_account(), amount);
    }

    pub fn stake_record(&self, address: &Pubkey) -> Option<StakeAccountRecord> {
        self.accounts
            .get(address)
            .map(|data| qup_client::decode(data).expect("Stake record should decode"))
    }

    fn credit(&mut self, token_account: Pubkey, amount: u64) {
        *self.token_balances.entry(token_account).or_insert(0) += amount;
    }

    fn debit(&mut self, token_account: Pubkey, amount: u64) -> Result<(), RejectionReason> {
        let balance = self.token_balances.entry(token_account).or_insert(0);
        if *balance < amount {
            return Err(RejectionReason::with_logs(
                "Transaction simulation failed: Error processing Instruction 0: custom program error: 0x1",
                vec!["Program log: Error: insufficient funds".to_string()],
            ));
        }
        *balance -= amount;
        Ok(())
    }

    // Mirror of what the vault program does with each instruction
    fn apply(&mut self, instruction: &Instruction) -> Result<(), RejectionReason> {
        let decoded = VaultInstruction::decode(&instruction.data)
            .map_err(|e| RejectionReason::new(format!("invalid instruction data: {}", e)))?;
        let key = |index: usize| instruction.accounts[index].pubkey;

        match decoded {
            VaultInstruction::InitializeVault(_) => {
                let record = VaultAccountRecord {
                    authority: key(1),
                    token_mint: key(2),
                    token_vault: key(3),
                    total_staked: 0,
                    reward_rate_bps: REWARD_RATE_BPS,
                    last_update_ts: self.now,
                };
                self.accounts.insert(key(0), record.to_account_data().expect("serialize"));
            }
            VaultInstruction::Stake(args) => {
                if self.accounts.contains_key(&key(3)) {
                    return Err(RejectionReason::new("account already in use"));
                }
                self.debit(key(1), args.amount)?;
                self.credit(key(2), args.amount);
                let record = StakeAccountRecord {
                    amount: MinorUnitAmount::new(args.amount),
                    rewards: MinorUnitAmount::ZERO,
                    start_time: self.now as u32,
                };
                self.accounts.insert(key(3), record.to_account_data().expect("serialize"));
            }
            VaultInstruction::Claim => {
                let mut record = self
                    .stake_record(&key(3))
                    .ok_or_else(|| RejectionReason::new("AccountNotInitialized"))?;
                let payout = record.rewards.get();
                self.debit(key(2), payout)?;
                self.credit(key(1), payout);
                record.rewards = MinorUnitAmount::ZERO;
                self.accounts.insert(key(3), record.to_account_data().expect("serialize"));
            }
            VaultInstruction::Unstake => {
                let record = self
                    .stake_record(&key(3))
                    .ok_or_else(|| RejectionReason::new("AccountNotInitialized"))?;
                let payout = record.amount.get() + record.rewards.get();
                self.debit(key(2), payout)?;
                self.credit(key(1), payout);
                self.accounts.remove(&key(3));
            }
        }
        Ok(())
    }
}

impl LedgerClient for MemoryLedger {
    fn submit_and_confirm(&mut self, instruction: Instruction) -> Result<Confirmation, RejectionReason> {
        self.submitted.push(instruction.clone());
        if let Some(reason) = self.rejections.pop_front() {
            return Err(reason);
        }
        self.apply(&instruction)?;
        Ok(Confirmation {
            signature: Signature::default(),
        })
    }

    fn read_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, RejectionReason> {
        Ok(self.accounts.get(address).cloned())
    }

    fn current_timestamp(&self) -> Result<i64, RejectionReason> {
        Ok(self.now)
    }

    fn token_balance(&self, token_account: &Pubkey) -> Result<Option<u64>, RejectionReason> {
        Ok(self.token_balances.get(token_account).copied())
    }

    fn native_balance(&self, address: &Pubkey) -> Result<u64, RejectionReason> {
        Ok(self.lamports.get(address).copied().unwrap_or(0))
    }
}

// ======================== LITESVM LEDGER ========================

pub struct LiteSvmLedger {
    pub svm: LiteSVM,
    pub payer: Keypair,
}

impl LedgerClient for LiteSvmLedger {
    fn submit_and_confirm(&mut self, instruction: Instruction) -> Result<Confirmation, RejectionReason> {
        let tx = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &[&self.payer],
            self.svm.latest_blockhash(),
        );

        match self.svm.send_transaction(tx) {
            Ok(meta) => Ok(Confirmation {
                signature: meta.signature,
            }),
            Err(failed) => Err(RejectionReason::with_logs(
                format!("{:?}", failed.err),
                failed.meta.logs,
            )),
        }
    }

    fn read_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, RejectionReason> {
        Ok(self.svm.get_account(address).map(|account| account.data))
    }

    fn current_timestamp(&self) -> Result<i64, RejectionReason> {
        let clock: Clock = self.svm.get_sysvar();
        Ok(clock.unix_timestamp)
    }

    fn token_balance(&self, token_account: &Pubkey) -> Result<Option<u64>, RejectionReason> {
        if self.svm.get_account(token_account).is_none() {
            return Ok(None);
        }
        let account: TokenAccount = get_spl_account(&self.svm, token_account)
            .map_err(|e| RejectionReason::new(format!("token account unreadable: {:?}", e)))?;
        Ok(Some(account.amount))
    }

    fn native_balance(&self, address: &Pubkey) -> Result<u64, RejectionReason> {
        Ok(self.svm.get_balance(address).unwrap_or(0))
    }
}

// Create and fund account
pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

// LiteSVM bank with a 9-decimal mint and an owner holding `token_amount`.
// Returns the ledger and a config whose mint is the freshly created one.
pub fn setup_litesvm_ledger(owner_lamports: u64, token_amount: u64) -> (LiteSvmLedger, VaultConfig) {
    setup_litesvm(owner_lamports, Some(token_amount))
}

// Same bank, but the owner never opened a token account for the mint
pub fn setup_litesvm_ledger_without_token_account(owner_lamports: u64) -> (LiteSvmLedger, VaultConfig) {
    setup_litesvm(owner_lamports, None)
}

fn setup_litesvm(owner_lamports: u64, token_amount: Option<u64>) -> (LiteSvmLedger, VaultConfig) {
    let mut svm = LiteSVM::new();

    let mint_authority = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);
    let owner = create_funded_account(&mut svm, owner_lamports);

    let mint = CreateMint::new(&mut svm, &mint_authority)
        .authority(&mint_authority.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Mint creation should succeed");

    if let Some(token_amount) = token_amount {
        let owner_ata = CreateAssociatedTokenAccount::new(&mut svm, &mint_authority, &mint)
            .owner(&owner.pubkey())
            .send()
            .expect("Owner ATA creation should succeed");

        if token_amount > 0 {
            MintTo::new(&mut svm, &mint_authority, &mint, &owner_ata, token_amount)
                .owner(&mint_authority)
                .send()
                .expect("Mint to owner should succeed");
        }
    }

    let config = VaultConfig::for_authority(TEST_PROGRAM_ID, mint, &mint_authority.pubkey())
        .expect("Vault PDAs should derive")
        .with_decimals(DECIMALS);

    (LiteSvmLedger { svm, payer: owner }, config)
}
