// crates/sanad-staking/src/engine.rs
//
// The staking engine: attestation lifecycle and trust aggregation.
//
// State transitions (all atomic, all-or-nothing):
//
//   stake --> [locked] --> unstake (after lock_until, returns principal)
//                     \--> slash   (oracle-triggered, one-way, burns value)
//
// Three running totals are maintained on every transition and must always
// agree: total_staked == sum of resource totals == sum of auditor totals,
// over live attestations.
//
// Concentration cap: a stake is rejected when it would push the caller's
// share of the resource's total strictly above one third, unless no
// other auditor holds live stake on the resource. A first staker holds
// 100% by construction and is explicitly exempt; the cap begins to bind
// only once a second auditor exists. Exactly one third is allowed.
//
// Custody of the staked principal is the ledger's STAKING_VAULT; the
// engine accounts for amounts, the protocol layer moves the tokens.

use std::collections::HashMap;

use sanad_core::{derive_id, AccountId, AttestationId, ResourceHash, SanadError, ZERO_HASH};
use sanad_ledger::{Habba, HABBA_PER_SND};

use crate::attestation::{Attestation, TrustTier, MAX_LOCK_SECS, MIN_LOCK_SECS};

/// Maximum total outstanding stake per auditor across all attestations:
/// 100,000 SND.
pub const MAX_STAKE_PER_AUDITOR: Habba = 100_000 * HABBA_PER_SND;

/// Concentration cap divisor: no auditor's share of a resource may exceed
/// 1/3 of its total stake (once a second auditor exists).
pub const CONCENTRATION_CAP_DIVISOR: u128 = 3;

/// Maximum pause duration for the administrative circuit breaker: 7 days.
pub const MAX_PAUSE_SECS: u64 = 7 * 24 * 3600;

/// Record of a single executed slash, returned so the caller can burn the
/// forfeited principal and emit events in the same transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashReceipt {
    pub attestation_id: AttestationId,
    pub auditor: AccountId,
    pub resource_hash: ResourceHash,
    /// The pre-slash amount in habba.
    pub amount: Habba,
}

/// The staking engine.
pub struct StakingEngine {
    attestations: HashMap<AttestationId, Attestation>,
    /// Attestation ids per resource, in creation order.
    by_resource: HashMap<ResourceHash, Vec<AttestationId>>,
    /// Attestation ids per auditor, in creation order.
    by_auditor: HashMap<AccountId, Vec<AttestationId>>,
    /// Live stake per resource in habba.
    resource_total: HashMap<ResourceHash, Habba>,
    /// Live stake per auditor in habba.
    auditor_total: HashMap<AccountId, Habba>,
    /// Live stake across the whole engine in habba.
    total_staked: Habba,
    /// Stake entry point rejected while now < paused_until.
    paused_until: u64,
    /// Monotonic counter folded into attestation id derivation.
    nonce: u64,
}

impl StakingEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            attestations: HashMap::new(),
            by_resource: HashMap::new(),
            by_auditor: HashMap::new(),
            resource_total: HashMap::new(),
            auditor_total: HashMap::new(),
            total_staked: 0,
            paused_until: 0,
            nonce: 0,
        }
    }

    // --- stake ---

    /// Lock `amount` habba against `resource_hash` for `lock_secs`.
    ///
    /// Returns the created attestation. The caller is responsible for
    /// moving the principal into custody in the same transition.
    ///
    /// # Errors
    /// `Paused`, `InvalidAmount`, `InvalidResourceHash`, `LockTooShort`,
    /// `LockTooLong`, `ExceedsMaxStake`, `ExceedsConcentrationCap`; all
    /// checked before any state change.
    pub fn stake(
        &mut self,
        auditor: AccountId,
        resource_hash: ResourceHash,
        amount: Habba,
        lock_secs: u64,
        now: u64,
    ) -> Result<Attestation, SanadError> {
        if self.is_paused(now) {
            return Err(SanadError::Paused(self.paused_until));
        }
        if amount == 0 {
            return Err(SanadError::InvalidAmount);
        }
        if resource_hash == ZERO_HASH {
            return Err(SanadError::InvalidResourceHash);
        }
        if lock_secs < MIN_LOCK_SECS {
            return Err(SanadError::LockTooShort(lock_secs));
        }
        if lock_secs > MAX_LOCK_SECS {
            return Err(SanadError::LockTooLong(lock_secs));
        }

        let auditor_live = self.auditor_total_stake(&auditor);
        if auditor_live + amount > MAX_STAKE_PER_AUDITOR {
            return Err(SanadError::ExceedsMaxStake);
        }

        self.check_concentration(&auditor, &resource_hash, amount)?;

        let id = derive_id(
            "sanad:attestation",
            &[&auditor, &resource_hash],
            self.nonce,
        );
        self.nonce += 1;

        let attestation = Attestation {
            id,
            auditor,
            resource_hash,
            amount,
            lock_secs,
            lock_until: now + lock_secs,
            created_at: now,
            slashed: false,
            withdrawn: false,
        };

        self.attestations.insert(id, attestation.clone());
        self.by_resource.entry(resource_hash).or_default().push(id);
        self.by_auditor.entry(auditor).or_default().push(id);
        *self.resource_total.entry(resource_hash).or_insert(0) += amount;
        *self.auditor_total.entry(auditor).or_insert(0) += amount;
        self.total_staked += amount;

        Ok(attestation)
    }

    /// Reject the stake if it would push the auditor's share of the
    /// resource strictly above 1/3 of the post-stake total. Skipped while
    /// the auditor is the only live staker on the resource.
    fn check_concentration(
        &self,
        auditor: &AccountId,
        resource_hash: &ResourceHash,
        amount: Habba,
    ) -> Result<(), SanadError> {
        let resource_live = self.resource_total_stake(resource_hash);
        let auditor_on_resource = self.auditor_stake_on_resource(auditor, resource_hash);
        let others = resource_live - auditor_on_resource;
        if others == 0 {
            // First-staker exemption: no second auditor, no cap.
            return Ok(());
        }

        let new_auditor_share = auditor_on_resource + amount;
        let new_total = resource_live + amount;
        // share > 1/3 <=> share * 3 > total; exactly one third passes.
        if new_auditor_share * CONCENTRATION_CAP_DIVISOR > new_total {
            return Err(SanadError::ExceedsConcentrationCap);
        }
        Ok(())
    }

    fn auditor_stake_on_resource(
        &self,
        auditor: &AccountId,
        resource_hash: &ResourceHash,
    ) -> Habba {
        self.by_resource
            .get(resource_hash)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.attestations.get(id))
                    .filter(|a| a.auditor == *auditor && a.is_live())
                    .map(|a| a.amount)
                    .sum()
            })
            .unwrap_or(0)
    }

    // --- unstake ---

    /// Release a matured attestation and return its principal amount.
    ///
    /// The caller moves the principal out of custody in the same
    /// transition. The withdrawal marker is one-way: a second unstake of
    /// the same id fails with `NoStakeFound`.
    ///
    /// # Errors
    /// `NoStakeFound`, `NotOwner`, `AlreadySlashed`, `StillLocked`.
    pub fn unstake(
        &mut self,
        caller: &AccountId,
        attestation_id: &AttestationId,
        now: u64,
    ) -> Result<Habba, SanadError> {
        let attestation = self
            .attestations
            .get_mut(attestation_id)
            .ok_or(SanadError::NoStakeFound)?;
        if attestation.auditor != *caller {
            return Err(SanadError::NotOwner);
        }
        if attestation.slashed {
            return Err(SanadError::AlreadySlashed);
        }
        if attestation.withdrawn {
            return Err(SanadError::NoStakeFound);
        }
        if now < attestation.lock_until {
            return Err(SanadError::StillLocked(attestation.lock_until));
        }

        let resource_hash = attestation.resource_hash;
        let amount = attestation.amount;
        attestation.amount = 0;
        attestation.withdrawn = true;

        self.decrement_totals(&resource_hash, caller, amount);
        Ok(amount)
    }

    // --- slash ---

    /// Slash a single attestation: zero its amount, set the one-way
    /// `slashed` flag, and remove it from all aggregates.
    ///
    /// Returns a receipt carrying the pre-slash amount so the caller can
    /// burn the forfeited principal in the same transition.
    ///
    /// # Errors
    /// `AlreadySlashed` on re-invocation (slashing is strictly one-way);
    /// `NoStakeFound` for an unknown or already-withdrawn id.
    pub fn slash(&mut self, attestation_id: &AttestationId) -> Result<SlashReceipt, SanadError> {
        let attestation = self
            .attestations
            .get_mut(attestation_id)
            .ok_or(SanadError::NoStakeFound)?;
        if attestation.slashed {
            return Err(SanadError::AlreadySlashed);
        }
        if attestation.withdrawn {
            return Err(SanadError::NoStakeFound);
        }

        let receipt = SlashReceipt {
            attestation_id: *attestation_id,
            auditor: attestation.auditor,
            resource_hash: attestation.resource_hash,
            amount: attestation.amount,
        };
        attestation.amount = 0;
        attestation.slashed = true;

        let auditor = receipt.auditor;
        self.decrement_totals(&receipt.resource_hash, &auditor, receipt.amount);
        Ok(receipt)
    }

    /// Slash every live attestation on a resource (guilty-verdict path).
    ///
    /// Returns one receipt per slashed attestation; an empty vec when the
    /// resource has no live stake. Never fails partway: each individual
    /// slash is infallible once the attestation is known to be live.
    pub fn slash_resource(&mut self, resource_hash: &ResourceHash) -> Vec<SlashReceipt> {
        let ids: Vec<AttestationId> = self
            .by_resource
            .get(resource_hash)
            .map(|ids| {
                ids.iter()
                    .filter(|id| {
                        self.attestations
                            .get(*id)
                            .map(|a| a.is_live())
                            .unwrap_or(false)
                    })
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        ids.iter().filter_map(|id| self.slash(id).ok()).collect()
    }

    fn decrement_totals(&mut self, resource_hash: &ResourceHash, auditor: &AccountId, amount: Habba) {
        if let Some(total) = self.resource_total.get_mut(resource_hash) {
            *total -= amount;
        }
        if let Some(total) = self.auditor_total.get_mut(auditor) {
            *total -= amount;
        }
        self.total_staked -= amount;
    }

    // --- pause circuit breaker ---

    /// Pause the stake entry point until `now + duration`.
    ///
    /// # Errors
    /// `PauseTooLong` if the duration exceeds 7 days.
    pub fn pause(&mut self, now: u64, duration: u64) -> Result<u64, SanadError> {
        if duration > MAX_PAUSE_SECS {
            return Err(SanadError::PauseTooLong(duration));
        }
        self.paused_until = now + duration;
        Ok(self.paused_until)
    }

    /// Clear the pause immediately (manual early exit).
    pub fn unpause(&mut self) {
        self.paused_until = 0;
    }

    /// Whether staking is paused at `now`. Pure function of the stored
    /// deadline; the pause self-clears by expiry, no transaction needed.
    pub fn is_paused(&self, now: u64) -> bool {
        now < self.paused_until
    }

    // --- queries ---

    /// Look up an attestation by id (including slashed/withdrawn ones).
    pub fn get_attestation(&self, attestation_id: &AttestationId) -> Option<&Attestation> {
        self.attestations.get(attestation_id)
    }

    /// All attestations ever created for a resource, in creation order.
    pub fn resource_attestations(&self, resource_hash: &ResourceHash) -> Vec<&Attestation> {
        self.by_resource
            .get(resource_hash)
            .map(|ids| ids.iter().filter_map(|id| self.attestations.get(id)).collect())
            .unwrap_or_default()
    }

    /// All attestations ever created by an auditor, in creation order.
    pub fn auditor_attestations(&self, auditor: &AccountId) -> Vec<&Attestation> {
        self.by_auditor
            .get(auditor)
            .map(|ids| ids.iter().filter_map(|id| self.attestations.get(id)).collect())
            .unwrap_or_default()
    }

    /// Whether an auditor holds live stake on a resource. Used by the
    /// oracle's conflict-of-interest exclusion during jury selection.
    pub fn has_stake_on(&self, auditor: &AccountId, resource_hash: &ResourceHash) -> bool {
        self.auditor_stake_on_resource(auditor, resource_hash) > 0
    }

    /// Lock-multiplier-weighted sum of live stake on a resource, in habba.
    pub fn trust_score(&self, resource_hash: &ResourceHash) -> Habba {
        self.by_resource
            .get(resource_hash)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.attestations.get(id))
                    .map(|a| a.score())
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Trust tier derived from the trust score.
    pub fn trust_tier(&self, resource_hash: &ResourceHash) -> TrustTier {
        TrustTier::from_score(self.trust_score(resource_hash))
    }

    /// Live stake held by an auditor across all resources, in habba.
    pub fn auditor_total_stake(&self, auditor: &AccountId) -> Habba {
        self.auditor_total.get(auditor).copied().unwrap_or(0)
    }

    /// Live stake on a resource, in habba.
    pub fn resource_total_stake(&self, resource_hash: &ResourceHash) -> Habba {
        self.resource_total.get(resource_hash).copied().unwrap_or(0)
    }

    /// Live stake across the whole engine, in habba.
    pub fn total_staked(&self) -> Habba {
        self.total_staked
    }
}

impl Default for StakingEngine {
    fn default() -> Self {
        Self::new()
    }
}
