// crates/sanad-protocol/src/protocol.rs
//
// The Protocol facade.
//
// Ordering discipline inside every entry point: all fallible checks (role
// gates, balance pre-checks, module validations) run before the first
// mutation that another module would observe. Cross-module flows, such as
// the stake -> reward accrual credit and the guilty verdict -> slash ->
// burn -> deposit settlement chain, complete inside the single call that
// triggered them, so no partial verdict or partial slash is ever visible.
//
// Verdict deposit settlement (from the oracle vault):
//   Guilty    -> 100% refund to the depositor
//   Innocent  -> 90% refund, 10% forfeited to the rewards vault
//   Dismissed -> 50% refund, 50% forfeited to the rewards vault
//
// Slashed principal is burned from the staking vault, never redistributed.

use sanad_core::events::Verdict;
use sanad_core::{
    short_hex, AccessControl, AccountId, AttestationId, Event, EventLog, EventRecord, FlagId,
    ResourceHash, Role, SanadError,
};
use sanad_ledger::{Habba, Ledger, Snd, ORACLE_VAULT, REWARDS_VAULT, STAKING_VAULT};
use sanad_oracle::{ChainEntropy, EntropySource, Flag, FlagStatus, Oracle, VerdictOutcome};
use sanad_registry::{Registry, ResourceKind};
use sanad_rewards::RewardPool;
use sanad_staking::{Attestation, StakingEngine, TrustTier};

/// The protocol: one struct owning all module state, mutated only through
/// atomic entry points.
pub struct Protocol {
    acl: AccessControl,
    events: EventLog,
    ledger: Ledger,
    registry: Registry,
    staking: StakingEngine,
    oracle: Oracle,
    rewards: RewardPool,
    entropy: Box<dyn EntropySource>,
}

impl Protocol {
    /// Create a protocol instance with `admin` holding the Admin role and
    /// the default (weak, chain-derived) entropy source.
    pub fn new(admin: AccountId) -> Self {
        Self::with_entropy(admin, Box::new(ChainEntropy::new()))
    }

    /// Create a protocol instance with an explicit entropy source (e.g. a
    /// VRF-backed one, or a fixed seed in tests).
    pub fn with_entropy(admin: AccountId, entropy: Box<dyn EntropySource>) -> Self {
        let mut acl = AccessControl::new();
        // Genesis grant; subsequent role changes go through grant_role
        // and are event-logged.
        acl.grant_role(admin, Role::Admin);
        Self {
            acl,
            events: EventLog::new(),
            ledger: Ledger::new(),
            registry: Registry::new(),
            staking: StakingEngine::new(),
            oracle: Oracle::new(),
            rewards: RewardPool::new(),
            entropy,
        }
    }

    // --- access control ---

    /// Grant a role. Admin only.
    pub fn grant_role(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        role: Role,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.acl.grant_role(account, role);
        self.events.emit(now, Event::RoleGranted { account, role });
        tracing::info!(account = %short_hex(&account), %role, "role granted");
        Ok(())
    }

    /// Revoke a role. Admin only.
    pub fn revoke_role(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        role: Role,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.acl.revoke_role(&account, role);
        self.events.emit(now, Event::RoleRevoked { account, role });
        tracing::info!(account = %short_hex(&account), %role, "role revoked");
        Ok(())
    }

    /// Whether an account holds a role.
    pub fn has_role(&self, account: &AccountId, role: Role) -> bool {
        self.acl.has_role(account, role)
    }

    // --- ledger ---

    /// Mint tokens. Minter only.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        to: AccountId,
        amount: Habba,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Minter)?;
        self.ledger.mint(to, amount)?;
        self.events.emit(now, Event::Minted { to, amount });
        Ok(())
    }

    /// Burn tokens from an account. Burner only.
    pub fn burn(
        &mut self,
        caller: &AccountId,
        from: AccountId,
        amount: Habba,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Burner)?;
        self.ledger.burn(&from, amount)?;
        self.events.emit(now, Event::Burned { from, amount });
        Ok(())
    }

    /// Move the caller's own tokens.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        to: AccountId,
        amount: Habba,
    ) -> Result<(), SanadError> {
        self.ledger.transfer(caller, to, amount)
    }

    /// Balance of an account in habba.
    pub fn balance_of(&self, account: &AccountId) -> Habba {
        self.ledger.balance_of(account)
    }

    /// Current total supply in habba.
    pub fn total_supply(&self) -> Habba {
        self.ledger.total_supply()
    }

    // --- registry ---

    /// Inscribe a resource under its content hash.
    pub fn inscribe(
        &mut self,
        caller: AccountId,
        resource_hash: ResourceHash,
        kind: ResourceKind,
        uri: String,
        metadata: serde_json::Value,
        now: u64,
    ) -> Result<(), SanadError> {
        self.registry
            .inscribe(caller, resource_hash, kind, uri, metadata, now)?;
        self.events.emit(
            now,
            Event::ResourceInscribed {
                resource_hash,
                inscriber: caller,
                kind: kind.to_string(),
            },
        );
        tracing::info!(resource = %short_hex(&resource_hash), %kind, "resource inscribed");
        Ok(())
    }

    /// Deprecate an inscribed resource in favor of a successor.
    pub fn deprecate(
        &mut self,
        caller: &AccountId,
        resource_hash: ResourceHash,
        successor: ResourceHash,
        now: u64,
    ) -> Result<(), SanadError> {
        self.registry.deprecate(caller, resource_hash, successor)?;
        self.events.emit(
            now,
            Event::ResourceDeprecated {
                resource_hash,
                successor,
            },
        );
        Ok(())
    }

    /// Look up an inscription.
    pub fn get_resource(&self, resource_hash: &ResourceHash) -> Option<&sanad_registry::Inscription> {
        self.registry.get(resource_hash)
    }

    /// Whether a resource hash has been inscribed.
    pub fn resource_exists(&self, resource_hash: &ResourceHash) -> bool {
        self.registry.exists(resource_hash)
    }

    /// Whether an inscribed resource carries a deprecation link.
    pub fn is_deprecated(&self, resource_hash: &ResourceHash) -> bool {
        self.registry.is_deprecated(resource_hash)
    }

    // --- staking ---

    /// Stake against a resource. Locks the principal in the staking vault
    /// and credits the reward accrual in the same transition.
    pub fn stake(
        &mut self,
        caller: AccountId,
        resource_hash: ResourceHash,
        amount: Habba,
        lock_secs: u64,
        now: u64,
    ) -> Result<AttestationId, SanadError> {
        if self.ledger.balance_of(&caller) < amount {
            return Err(SanadError::InsufficientBalance);
        }
        let attestation = self
            .staking
            .stake(caller, resource_hash, amount, lock_secs, now)?;
        // Cannot fail: balance pre-checked and calls are serialized.
        self.ledger.transfer(&caller, STAKING_VAULT, amount)?;

        let reward = self.rewards.accrue(caller, amount, lock_secs);

        self.events.emit(
            now,
            Event::Staked {
                attestation_id: attestation.id,
                auditor: caller,
                resource_hash,
                amount,
                lock_until: attestation.lock_until,
                lock_secs,
            },
        );
        if reward > 0 {
            self.events.emit(
                now,
                Event::RewardAccrued {
                    auditor: caller,
                    amount,
                    reward,
                },
            );
        }
        tracing::info!(
            auditor = %short_hex(&caller),
            resource = %short_hex(&resource_hash),
            amount = %Snd::from_habba(amount),
            lock_secs,
            "stake accepted"
        );
        Ok(attestation.id)
    }

    /// Release a matured attestation and return its principal.
    pub fn unstake(
        &mut self,
        caller: AccountId,
        attestation_id: AttestationId,
        now: u64,
    ) -> Result<Habba, SanadError> {
        let amount = self.staking.unstake(&caller, &attestation_id, now)?;
        self.ledger.transfer(&STAKING_VAULT, caller, amount)?;
        self.events.emit(
            now,
            Event::Unstaked {
                attestation_id,
                auditor: caller,
                amount,
            },
        );
        tracing::info!(
            auditor = %short_hex(&caller),
            amount = %Snd::from_habba(amount),
            "stake released"
        );
        Ok(amount)
    }

    /// Slash a single attestation, burning its principal. Oracle role
    /// only; the jury path goes through vote/finalize instead.
    pub fn slash(
        &mut self,
        caller: &AccountId,
        attestation_id: AttestationId,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Oracle)?;
        let receipt = self.staking.slash(&attestation_id)?;
        if receipt.amount > 0 {
            self.ledger.burn(&STAKING_VAULT, receipt.amount)?;
        }
        self.events.emit(
            now,
            Event::Slashed {
                attestation_id: receipt.attestation_id,
                auditor: receipt.auditor,
                resource_hash: receipt.resource_hash,
                amount: receipt.amount,
            },
        );
        tracing::warn!(
            auditor = %short_hex(&receipt.auditor),
            resource = %short_hex(&receipt.resource_hash),
            amount = %Snd::from_habba(receipt.amount),
            "attestation slashed"
        );
        Ok(())
    }

    /// Pause the stake entry point. Pauser only; at most 7 days.
    pub fn pause(
        &mut self,
        caller: &AccountId,
        now: u64,
        duration: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Pauser)?;
        let until = self.staking.pause(now, duration)?;
        self.events.emit(now, Event::Paused { by: *caller, until });
        tracing::warn!(by = %short_hex(caller), until, "staking paused");
        Ok(())
    }

    /// Clear a pause early. Pauser only.
    pub fn unpause(&mut self, caller: &AccountId, now: u64) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Pauser)?;
        self.staking.unpause();
        self.events.emit(now, Event::Unpaused { by: *caller });
        tracing::info!(by = %short_hex(caller), "staking unpaused");
        Ok(())
    }

    // --- disputes ---

    /// Flag a resource, escrowing the deposit in the oracle vault. Jury
    /// assembly is attempted synchronously.
    pub fn flag_resource(
        &mut self,
        caller: AccountId,
        resource_hash: ResourceHash,
        evidence_hash: [u8; 32],
        deposit: Habba,
        now: u64,
    ) -> Result<FlagId, SanadError> {
        if self.ledger.balance_of(&caller) < deposit {
            return Err(SanadError::InsufficientBalance);
        }
        let flag_id = self.oracle.flag_resource(
            caller,
            resource_hash,
            evidence_hash,
            deposit,
            now,
            &self.staking,
            self.entropy.as_mut(),
        )?;
        self.ledger.transfer(&caller, ORACLE_VAULT, deposit)?;

        self.events.emit(
            now,
            Event::FlagRaised {
                flag_id,
                flagger: caller,
                resource_hash,
                deposit,
            },
        );
        self.emit_jury_if_seated(&flag_id, now);
        tracing::info!(
            flagger = %short_hex(&caller),
            resource = %short_hex(&resource_hash),
            deposit = %Snd::from_habba(deposit),
            "flag raised"
        );
        Ok(flag_id)
    }

    /// Retry jury assembly on a Pending flag (e.g. after the pool grew).
    /// Returns whether a jury was seated in this call.
    pub fn assemble_jury(&mut self, flag_id: FlagId, now: u64) -> Result<bool, SanadError> {
        let seated =
            self.oracle
                .try_assemble(&flag_id, now, &self.staking, self.entropy.as_mut())?;
        if seated {
            self.emit_jury_if_seated(&flag_id, now);
        }
        Ok(seated)
    }

    /// Cast a jury vote. If this is the final vote, the verdict (slash,
    /// burn, and deposit settlement included) executes in this call and
    /// the verdict is returned.
    pub fn vote(
        &mut self,
        caller: AccountId,
        flag_id: FlagId,
        guilty: bool,
        now: u64,
    ) -> Result<Option<Verdict>, SanadError> {
        let outcome = self.oracle.vote(&caller, &flag_id, guilty, now)?;
        self.events.emit(
            now,
            Event::JurorVoted {
                flag_id,
                juror: caller,
                guilty,
            },
        );
        match outcome {
            Some(outcome) => {
                let verdict = outcome.verdict;
                self.settle_verdict(outcome, now)?;
                Ok(Some(verdict))
            }
            None => Ok(None),
        }
    }

    /// Finalize a flag whose voting deadline elapsed, computing the
    /// verdict over cast votes. Callable by anyone (lazy expiry).
    pub fn finalize_flag(&mut self, flag_id: FlagId, now: u64) -> Result<Verdict, SanadError> {
        let outcome = self.oracle.finalize_expired(&flag_id, now)?;
        let verdict = outcome.verdict;
        self.settle_verdict(outcome, now)?;
        Ok(verdict)
    }

    /// Open the one allowed appeal on a terminal flag. The required
    /// deposit is twice the original; it is escrowed like the original.
    pub fn appeal(
        &mut self,
        caller: AccountId,
        flag_id: FlagId,
        now: u64,
    ) -> Result<(), SanadError> {
        let flag = self.oracle.get_flag(&flag_id).ok_or(SanadError::FlagNotFound)?;
        let required = flag.deposit * sanad_oracle::APPEAL_DEPOSIT_FACTOR;
        if self.ledger.balance_of(&caller) < required {
            return Err(SanadError::InsufficientBalance);
        }
        let seated = self.oracle.open_appeal(
            caller,
            &flag_id,
            required,
            now,
            &self.staking,
            self.entropy.as_mut(),
        )?;
        self.ledger.transfer(&caller, ORACLE_VAULT, required)?;

        self.events.emit(
            now,
            Event::AppealOpened {
                flag_id,
                appellant: caller,
                deposit: required,
            },
        );
        if seated {
            self.emit_jury_if_seated(&flag_id, now);
        }
        tracing::info!(
            appellant = %short_hex(&caller),
            flag = %short_hex(&flag_id),
            "appeal opened"
        );
        Ok(())
    }

    /// Add a single juror. Admin only.
    pub fn add_juror(
        &mut self,
        caller: &AccountId,
        account: AccountId,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.oracle.add_to_juror_pool(account)
    }

    /// Add a batch of jurors, skipping duplicates. Admin only. Returns
    /// the number actually added.
    pub fn add_jurors(
        &mut self,
        caller: &AccountId,
        accounts: &[AccountId],
    ) -> Result<usize, SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        Ok(self.oracle.batch_add_to_juror_pool(accounts))
    }

    // --- rewards ---

    /// Claim the caller's full pending reward balance, paid from the
    /// rewards vault.
    pub fn claim_rewards(&mut self, caller: AccountId, now: u64) -> Result<Habba, SanadError> {
        let pending = self.rewards.pending_rewards(&caller);
        if pending > 0 && self.ledger.balance_of(&REWARDS_VAULT) < pending {
            return Err(SanadError::InsufficientBalance);
        }
        let amount = self.rewards.claim(&caller)?;
        self.ledger.transfer(&REWARDS_VAULT, caller, amount)?;
        self.events.emit(
            now,
            Event::RewardClaimed {
                auditor: caller,
                amount,
            },
        );
        tracing::info!(
            auditor = %short_hex(&caller),
            amount = %Snd::from_habba(amount),
            "rewards claimed"
        );
        Ok(amount)
    }

    /// Move the caller's tokens into the rewards vault. Admin only.
    pub fn fund_rewards(
        &mut self,
        caller: &AccountId,
        amount: Habba,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.ledger.transfer(caller, REWARDS_VAULT, amount)?;
        self.events.emit(
            now,
            Event::PoolFunded {
                from: *caller,
                amount,
            },
        );
        Ok(())
    }

    /// Set the per-second reward rate. Admin only.
    pub fn set_reward_rate(
        &mut self,
        caller: &AccountId,
        rate_per_second: u128,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.rewards.set_reward_rate(rate_per_second);
        self.events
            .emit(now, Event::RewardRateChanged { rate_per_second });
        tracing::info!(rate_per_second = %rate_per_second, "reward rate changed");
        Ok(())
    }

    /// Set a reward multiplier table entry. Admin only.
    pub fn set_lock_multiplier(
        &mut self,
        caller: &AccountId,
        lock_secs: u64,
        multiplier_bps: u32,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.rewards.set_lock_multiplier(lock_secs, multiplier_bps);
        self.events.emit(
            now,
            Event::LockMultiplierChanged {
                lock_secs,
                multiplier_bps,
            },
        );
        Ok(())
    }

    /// Drain the rewards vault to an account. Admin only; audit-logged.
    pub fn emergency_withdraw(
        &mut self,
        caller: &AccountId,
        to: AccountId,
        amount: Habba,
        now: u64,
    ) -> Result<(), SanadError> {
        self.acl.require_role(caller, Role::Admin)?;
        self.ledger.transfer(&REWARDS_VAULT, to, amount)?;
        self.events
            .emit(now, Event::EmergencyWithdrawal { to, amount });
        tracing::warn!(
            to = %short_hex(&to),
            amount = %Snd::from_habba(amount),
            "emergency withdrawal from rewards vault"
        );
        Ok(())
    }

    // --- read queries (for the indexer/API/CLI) ---

    pub fn trust_score(&self, resource_hash: &ResourceHash) -> Habba {
        self.staking.trust_score(resource_hash)
    }

    pub fn trust_tier(&self, resource_hash: &ResourceHash) -> TrustTier {
        self.staking.trust_tier(resource_hash)
    }

    pub fn get_attestation(&self, attestation_id: &AttestationId) -> Option<&Attestation> {
        self.staking.get_attestation(attestation_id)
    }

    pub fn resource_attestations(&self, resource_hash: &ResourceHash) -> Vec<&Attestation> {
        self.staking.resource_attestations(resource_hash)
    }

    pub fn auditor_attestations(&self, auditor: &AccountId) -> Vec<&Attestation> {
        self.staking.auditor_attestations(auditor)
    }

    pub fn auditor_total_stake(&self, auditor: &AccountId) -> Habba {
        self.staking.auditor_total_stake(auditor)
    }

    pub fn resource_total_stake(&self, resource_hash: &ResourceHash) -> Habba {
        self.staking.resource_total_stake(resource_hash)
    }

    pub fn total_staked(&self) -> Habba {
        self.staking.total_staked()
    }

    pub fn is_paused(&self, now: u64) -> bool {
        self.staking.is_paused(now)
    }

    pub fn get_flag(&self, flag_id: &FlagId) -> Option<&Flag> {
        self.oracle.get_flag(flag_id)
    }

    pub fn get_jury(&self, flag_id: &FlagId) -> Option<Vec<AccountId>> {
        self.oracle.get_jury(flag_id)
    }

    pub fn is_in_juror_pool(&self, account: &AccountId) -> bool {
        self.oracle.is_in_juror_pool(account)
    }

    pub fn juror_pool_size(&self) -> usize {
        self.oracle.juror_pool_size()
    }

    pub fn pending_rewards(&self, auditor: &AccountId) -> Habba {
        self.rewards.pending_rewards(auditor)
    }

    pub fn claimed_rewards(&self, auditor: &AccountId) -> Habba {
        self.rewards.claimed_rewards(auditor)
    }

    /// Claimable value currently sitting in the rewards vault.
    pub fn rewards_pool_balance(&self) -> Habba {
        self.ledger.balance_of(&REWARDS_VAULT)
    }

    /// The whole event stream, in emission order.
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    /// Event records at or after `seq`; the indexer's resume point.
    pub fn events_from(&self, seq: u64) -> &[EventRecord] {
        self.events.records_from(seq)
    }

    // --- internals ---

    fn emit_jury_if_seated(&mut self, flag_id: &FlagId, now: u64) {
        if let Some(flag) = self.oracle.get_flag(flag_id) {
            if !flag.jury.is_empty() && flag.status == sanad_oracle::FlagStatus::InReview {
                let jury = flag.jurors();
                self.events.emit(
                    now,
                    Event::JuryAssembled {
                        flag_id: *flag_id,
                        jury,
                    },
                );
            }
        }
    }

    /// Execute a verdict's side effects in the same transition as the
    /// vote or finalize call that produced it.
    fn settle_verdict(&mut self, outcome: VerdictOutcome, now: u64) -> Result<(), SanadError> {
        if outcome.verdict == Verdict::Guilty {
            // Slash every live attestation, then burn the forfeited
            // principal from the staking vault.
            let receipts = self.staking.slash_resource(&outcome.resource_hash);
            let mut burned: Habba = 0;
            for receipt in &receipts {
                burned += receipt.amount;
                self.events.emit(
                    now,
                    Event::Slashed {
                        attestation_id: receipt.attestation_id,
                        auditor: receipt.auditor,
                        resource_hash: receipt.resource_hash,
                        amount: receipt.amount,
                    },
                );
            }
            if burned > 0 {
                self.ledger.burn(&STAKING_VAULT, burned)?;
            }
        }

        // Deposit settlement schedule per verdict.
        let refund = match outcome.verdict {
            Verdict::Guilty => outcome.deposit,
            Verdict::Innocent => outcome.deposit * 9_000 / 10_000,
            Verdict::Dismissed => outcome.deposit / 2,
        };
        let forfeit = outcome.deposit - refund;
        if refund > 0 {
            self.ledger
                .transfer(&ORACLE_VAULT, outcome.depositor, refund)?;
        }
        if forfeit > 0 {
            // Forfeited collateral funds the reward pool.
            self.ledger.transfer(&ORACLE_VAULT, REWARDS_VAULT, forfeit)?;
        }

        self.events.emit(
            now,
            Event::VerdictReached {
                flag_id: outcome.flag_id,
                verdict: outcome.verdict,
                appeal: outcome.appeal,
            },
        );
        tracing::info!(
            flag = %short_hex(&outcome.flag_id),
            resource = %short_hex(&outcome.resource_hash),
            verdict = ?outcome.verdict,
            appeal = outcome.appeal,
            "verdict reached"
        );
        Ok(())
    }
}
