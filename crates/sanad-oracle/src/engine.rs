// crates/sanad-oracle/src/engine.rs
//
// The dispute oracle.
//
// Verdict rule: a side wins with a supermajority of at least 2/3 of CAST
// votes (4-of-5 when the full jury votes). If neither side reaches 2/3,
// including the zero-votes case at the deadline, the flag is Dismissed.
//
// The oracle owns flags and the juror pool; it reads the staking engine
// only to exclude conflicted jurors. Verdict side effects that touch
// other modules (slashing, deposit settlement) are driven by the caller
// from the returned VerdictOutcome, inside the same atomic transition as
// the triggering vote.
//
// At most one active (non-terminal) flag may exist per resource. A
// terminal flag leaves the active slot free; opening an appeal re-claims
// it, and is rejected if a newer flag has taken the slot in the meantime.

use std::collections::HashMap;

use sanad_core::events::Verdict;
use sanad_core::{derive_id, AccountId, FlagId, ResourceHash, SanadError, ZERO_HASH};
use sanad_ledger::Habba;
use sanad_staking::StakingEngine;

use crate::entropy::EntropySource;
use crate::flag::{Flag, FlagStatus, JurySeat};
use crate::jury::{select_jury, JurorPool, JURY_SIZE};
use crate::{APPEAL_DEPOSIT_FACTOR, APPEAL_WINDOW_SECS, MIN_FLAG_DEPOSIT, VOTING_PERIOD_SECS};

/// Everything the caller needs to settle a verdict: which resource to
/// slash (on Guilty), whose deposit to settle, and by which schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictOutcome {
    pub flag_id: FlagId,
    pub resource_hash: ResourceHash,
    pub verdict: Verdict,
    /// The account whose deposit this round settles: the flagger for the
    /// first round, the appellant for the appeal round.
    pub depositor: AccountId,
    /// The deposit being settled, in habba.
    pub deposit: Habba,
    /// Whether this verdict concludes the appeal round (final).
    pub appeal: bool,
}

/// The dispute engine.
pub struct Oracle {
    flags: HashMap<FlagId, Flag>,
    /// The single active (non-terminal) flag per resource.
    active: HashMap<ResourceHash, FlagId>,
    pool: JurorPool,
    /// Monotonic counter folded into flag id derivation.
    nonce: u64,
}

impl Oracle {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            flags: HashMap::new(),
            active: HashMap::new(),
            pool: JurorPool::new(),
            nonce: 0,
        }
    }

    // --- flagging ---

    /// Raise a dispute against a resource, escrowing `deposit`.
    ///
    /// Jury assembly is attempted synchronously; if the eligible pool is
    /// too small the flag stays Pending and `try_assemble` can be called
    /// again once jurors are added.
    ///
    /// # Errors
    /// `InvalidResourceHash`, `InsufficientDeposit`,
    /// `ResourceAlreadyFlagged`.
    pub fn flag_resource(
        &mut self,
        flagger: AccountId,
        resource_hash: ResourceHash,
        evidence_hash: [u8; 32],
        deposit: Habba,
        now: u64,
        staking: &StakingEngine,
        entropy: &mut dyn EntropySource,
    ) -> Result<FlagId, SanadError> {
        if resource_hash == ZERO_HASH {
            return Err(SanadError::InvalidResourceHash);
        }
        if deposit < MIN_FLAG_DEPOSIT {
            return Err(SanadError::InsufficientDeposit);
        }
        if self.active.contains_key(&resource_hash) {
            return Err(SanadError::ResourceAlreadyFlagged);
        }

        let id = derive_id("sanad:flag", &[&resource_hash, &flagger], self.nonce);
        self.nonce += 1;

        let flag = Flag {
            id,
            flagger,
            resource_hash,
            evidence_hash,
            deposit,
            status: FlagStatus::Pending,
            jury: Vec::new(),
            voting_deadline: None,
            verdict_at: None,
            first_verdict: None,
            appealed: false,
            appellant: None,
            appeal_deposit: 0,
            created_at: now,
        };
        self.flags.insert(id, flag);
        self.active.insert(resource_hash, id);

        self.try_assemble(&id, now, staking, entropy)?;
        Ok(id)
    }

    /// Attempt to seat a jury on a Pending (or re-opened Appealed) flag.
    ///
    /// Returns true if a jury was seated in this call, false if the flag
    /// already has one or the eligible pool is still smaller than
    /// `JURY_SIZE`. Jurors holding live stake on the flagged resource and
    /// the flagger are excluded.
    ///
    /// # Errors
    /// `FlagNotFound`.
    pub fn try_assemble(
        &mut self,
        flag_id: &FlagId,
        now: u64,
        staking: &StakingEngine,
        entropy: &mut dyn EntropySource,
    ) -> Result<bool, SanadError> {
        let flag = self.flags.get(flag_id).ok_or(SanadError::FlagNotFound)?;
        if !matches!(flag.status, FlagStatus::Pending | FlagStatus::Appealed) {
            return Ok(false);
        }
        let flagger = flag.flagger;
        let resource_hash = flag.resource_hash;

        let eligible = self
            .pool
            .eligible(|a| *a != flagger && !staking.has_stake_on(a, &resource_hash));
        if eligible.len() < JURY_SIZE {
            return Ok(false);
        }

        let jury = select_jury(&eligible, entropy.seed(now));
        let flag = self.flags.get_mut(flag_id).ok_or(SanadError::FlagNotFound)?;
        flag.jury = jury
            .into_iter()
            .map(|juror| JurySeat { juror, vote: None })
            .collect();
        flag.status = FlagStatus::InReview;
        flag.voting_deadline = Some(now + VOTING_PERIOD_SECS);
        Ok(true)
    }

    // --- voting ---

    /// Record a juror's write-once vote. When the last juror votes, the
    /// verdict is computed in the same call and returned.
    ///
    /// # Errors
    /// `FlagNotFound`, `NotInReview`, `VotingClosed` (deadline elapsed;
    /// finalize instead), `NotJuror`, `AlreadyVoted`.
    pub fn vote(
        &mut self,
        juror: &AccountId,
        flag_id: &FlagId,
        guilty: bool,
        now: u64,
    ) -> Result<Option<VerdictOutcome>, SanadError> {
        let flag = self.flags.get_mut(flag_id).ok_or(SanadError::FlagNotFound)?;
        if flag.status != FlagStatus::InReview {
            return Err(SanadError::NotInReview);
        }
        if let Some(deadline) = flag.voting_deadline {
            if now >= deadline {
                return Err(SanadError::VotingClosed);
            }
        }
        let seat = flag
            .jury
            .iter_mut()
            .find(|s| s.juror == *juror)
            .ok_or(SanadError::NotJuror)?;
        if seat.vote.is_some() {
            return Err(SanadError::AlreadyVoted);
        }
        seat.vote = Some(guilty);

        if flag.votes_cast() == flag.jury.len() {
            let outcome = decide(flag, now);
            self.active.remove(&outcome.resource_hash);
            return Ok(Some(outcome));
        }
        Ok(None)
    }

    /// Compute the verdict over cast votes once the voting deadline has
    /// elapsed. This is the lazy-expiry path; nothing runs in the
    /// background.
    ///
    /// # Errors
    /// `FlagNotFound`, `NotInReview`, `VotingStillOpen`.
    pub fn finalize_expired(
        &mut self,
        flag_id: &FlagId,
        now: u64,
    ) -> Result<VerdictOutcome, SanadError> {
        let flag = self.flags.get_mut(flag_id).ok_or(SanadError::FlagNotFound)?;
        if flag.status != FlagStatus::InReview {
            return Err(SanadError::NotInReview);
        }
        match flag.voting_deadline {
            Some(deadline) if now >= deadline => {}
            _ => return Err(SanadError::VotingStillOpen),
        }

        let outcome = decide(flag, now);
        self.active.remove(&outcome.resource_hash);
        Ok(outcome)
    }

    // --- appeal ---

    /// Re-open a terminal flag for the one allowed appeal round.
    ///
    /// Requires a deposit of `APPEAL_DEPOSIT_FACTOR` times the original
    /// within `APPEAL_WINDOW_SECS` of the verdict. A fresh jury is drawn
    /// with the same conflict-of-interest exclusions; returns whether it
    /// was seated immediately.
    ///
    /// # Errors
    /// `FlagNotFound`, `NotTerminal`, `AlreadyAppealed`,
    /// `AppealWindowClosed`, `InsufficientDeposit`,
    /// `ResourceAlreadyFlagged` (a newer flag claimed the resource).
    pub fn open_appeal(
        &mut self,
        appellant: AccountId,
        flag_id: &FlagId,
        deposit: Habba,
        now: u64,
        staking: &StakingEngine,
        entropy: &mut dyn EntropySource,
    ) -> Result<bool, SanadError> {
        let flag = self.flags.get_mut(flag_id).ok_or(SanadError::FlagNotFound)?;
        if !flag.status.is_terminal() {
            return Err(SanadError::NotTerminal);
        }
        if flag.appealed {
            return Err(SanadError::AlreadyAppealed);
        }
        let verdict_at = flag.verdict_at.ok_or(SanadError::NotTerminal)?;
        if now > verdict_at + APPEAL_WINDOW_SECS {
            return Err(SanadError::AppealWindowClosed);
        }
        if deposit < flag.deposit * APPEAL_DEPOSIT_FACTOR {
            return Err(SanadError::InsufficientDeposit);
        }
        let resource_hash = flag.resource_hash;
        if self.active.contains_key(&resource_hash) {
            return Err(SanadError::ResourceAlreadyFlagged);
        }

        let flag = self.flags.get_mut(flag_id).ok_or(SanadError::FlagNotFound)?;
        flag.first_verdict = flag.status.verdict();
        flag.appealed = true;
        flag.appellant = Some(appellant);
        flag.appeal_deposit = deposit;
        flag.status = FlagStatus::Appealed;
        flag.jury.clear();
        flag.voting_deadline = None;
        self.active.insert(resource_hash, *flag_id);

        self.try_assemble(flag_id, now, staking, entropy)
    }

    // --- juror pool management ---

    /// Add a single account to the juror pool.
    ///
    /// # Errors
    /// `AlreadyInPool` for a duplicate.
    pub fn add_to_juror_pool(&mut self, account: AccountId) -> Result<(), SanadError> {
        self.pool.add(account)
    }

    /// Add a batch of accounts, skipping duplicates per entry. Returns
    /// the number actually added.
    pub fn batch_add_to_juror_pool(&mut self, accounts: &[AccountId]) -> usize {
        self.pool.add_batch(accounts)
    }

    /// Number of pool members.
    pub fn juror_pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Whether an account is in the pool.
    pub fn is_in_juror_pool(&self, account: &AccountId) -> bool {
        self.pool.contains(account)
    }

    // --- queries ---

    /// Look up a flag by id.
    pub fn get_flag(&self, flag_id: &FlagId) -> Option<&Flag> {
        self.flags.get(flag_id)
    }

    /// The seated jurors of a flag, in selection order.
    pub fn get_jury(&self, flag_id: &FlagId) -> Option<Vec<AccountId>> {
        self.flags.get(flag_id).map(|f| f.jurors())
    }

    /// The active (non-terminal) flag id for a resource, if any.
    pub fn active_flag(&self, resource_hash: &ResourceHash) -> Option<FlagId> {
        self.active.get(resource_hash).copied()
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the supermajority rule over cast votes and move the flag to its
/// terminal state.
fn decide(flag: &mut Flag, now: u64) -> VerdictOutcome {
    let (guilty, innocent) = flag.tally();
    let cast = guilty + innocent;

    let verdict = if cast > 0 && guilty * 3 >= cast * 2 {
        Verdict::Guilty
    } else if cast > 0 && innocent * 3 >= cast * 2 {
        Verdict::Innocent
    } else {
        Verdict::Dismissed
    };

    flag.status = match verdict {
        Verdict::Guilty => FlagStatus::Guilty,
        Verdict::Innocent => FlagStatus::Innocent,
        Verdict::Dismissed => FlagStatus::Dismissed,
    };
    flag.verdict_at = Some(now);

    let appeal = flag.appealed;
    let (depositor, deposit) = if appeal {
        (flag.appellant.unwrap_or(flag.flagger), flag.appeal_deposit)
    } else {
        (flag.flagger, flag.deposit)
    };

    VerdictOutcome {
        flag_id: flag.id,
        resource_hash: flag.resource_hash,
        verdict,
        depositor,
        deposit,
        appeal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::FixedEntropy;
    use sanad_ledger::HABBA_PER_SND;

    const DAY: u64 = 24 * 3600;

    fn account(n: u8) -> AccountId {
        [n; 32]
    }

    fn resource(n: u8) -> ResourceHash {
        [n; 32]
    }

    fn deposit() -> Habba {
        MIN_FLAG_DEPOSIT
    }

    /// Oracle with jurors 100..110 in the pool and an empty staking
    /// engine.
    fn setup() -> (Oracle, StakingEngine, FixedEntropy) {
        let mut oracle = Oracle::new();
        for n in 100..110 {
            oracle.add_to_juror_pool(account(n)).unwrap();
        }
        (oracle, StakingEngine::new(), FixedEntropy([42u8; 32]))
    }

    fn raise(
        oracle: &mut Oracle,
        staking: &StakingEngine,
        entropy: &mut FixedEntropy,
        now: u64,
    ) -> FlagId {
        oracle
            .flag_resource(account(1), resource(10), [9u8; 32], deposit(), now, staking, entropy)
            .unwrap()
    }

    /// Cast `guilty_votes` guilty votes then fill the rest innocent,
    /// returning the outcome produced by the last vote.
    fn run_votes(
        oracle: &mut Oracle,
        flag_id: &FlagId,
        guilty_votes: usize,
        now: u64,
    ) -> Option<VerdictOutcome> {
        let jury = oracle.get_jury(flag_id).unwrap();
        let mut last = None;
        for (i, juror) in jury.iter().enumerate() {
            last = oracle.vote(juror, flag_id, i < guilty_votes, now).unwrap();
        }
        last
    }

    #[test]
    fn test_flag_assembles_jury_synchronously() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        let flag = oracle.get_flag(&flag_id).unwrap();
        assert_eq!(flag.status, FlagStatus::InReview);
        assert_eq!(flag.jury.len(), JURY_SIZE);
        assert_eq!(flag.voting_deadline, Some(1_000 + VOTING_PERIOD_SECS));
    }

    #[test]
    fn test_flag_validation() {
        let (mut oracle, staking, mut entropy) = setup();
        assert_eq!(
            oracle.flag_resource(
                account(1), ZERO_HASH, [0u8; 32], deposit(), 0, &staking, &mut entropy
            ),
            Err(SanadError::InvalidResourceHash)
        );
        assert_eq!(
            oracle.flag_resource(
                account(1), resource(10), [0u8; 32], deposit() - 1, 0, &staking, &mut entropy
            ),
            Err(SanadError::InsufficientDeposit)
        );
    }

    #[test]
    fn test_one_active_flag_per_resource() {
        let (mut oracle, staking, mut entropy) = setup();
        raise(&mut oracle, &staking, &mut entropy, 1_000);
        assert_eq!(
            oracle.flag_resource(
                account(2), resource(10), [0u8; 32], deposit(), 1_001, &staking, &mut entropy
            ),
            Err(SanadError::ResourceAlreadyFlagged)
        );
        // A different resource is unaffected.
        assert!(oracle
            .flag_resource(account(2), resource(11), [0u8; 32], deposit(), 1_001, &staking, &mut entropy)
            .is_ok());
    }

    #[test]
    fn test_small_pool_leaves_flag_pending() {
        let mut oracle = Oracle::new();
        for n in 100..104 {
            // Only 4 jurors; one short of a jury.
            oracle.add_to_juror_pool(account(n)).unwrap();
        }
        let staking = StakingEngine::new();
        let mut entropy = FixedEntropy([1u8; 32]);
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        assert_eq!(oracle.get_flag(&flag_id).unwrap().status, FlagStatus::Pending);

        // Adding a fifth juror and retrying seats the jury.
        oracle.add_to_juror_pool(account(104)).unwrap();
        assert!(oracle.try_assemble(&flag_id, 2_000, &staking, &mut entropy).unwrap());
        assert_eq!(oracle.get_flag(&flag_id).unwrap().status, FlagStatus::InReview);
    }

    #[test]
    fn test_jury_excludes_stakers_and_flagger() {
        let mut oracle = Oracle::new();
        // Flagger is in the pool too.
        oracle.add_to_juror_pool(account(1)).unwrap();
        for n in 100..107 {
            oracle.add_to_juror_pool(account(n)).unwrap();
        }
        let mut staking = StakingEngine::new();
        // Jurors 100 and 101 hold stake on the flagged resource.
        staking
            .stake(account(100), resource(10), HABBA_PER_SND, 7 * DAY, 0)
            .unwrap();
        staking
            .stake(account(101), resource(10), HABBA_PER_SND, 7 * DAY, 0)
            .unwrap();

        let mut entropy = FixedEntropy([2u8; 32]);
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        let jury = oracle.get_jury(&flag_id).unwrap();
        assert_eq!(jury.len(), JURY_SIZE);
        assert!(!jury.contains(&account(1)), "flagger must not be seated");
        assert!(!jury.contains(&account(100)), "staker must not be seated");
        assert!(!jury.contains(&account(101)), "staker must not be seated");
    }

    #[test]
    fn test_guilty_supermajority_four_of_five() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        let outcome = run_votes(&mut oracle, &flag_id, 4, 1_100).unwrap();
        assert_eq!(outcome.verdict, Verdict::Guilty);
        assert_eq!(outcome.depositor, account(1));
        assert_eq!(outcome.deposit, deposit());
        assert!(!outcome.appeal);
        assert_eq!(oracle.get_flag(&flag_id).unwrap().status, FlagStatus::Guilty);
        // Terminal flag frees the resource's active slot.
        assert!(oracle.active_flag(&resource(10)).is_none());
    }

    #[test]
    fn test_innocent_supermajority_one_of_five() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        let outcome = run_votes(&mut oracle, &flag_id, 1, 1_100).unwrap();
        assert_eq!(outcome.verdict, Verdict::Innocent);
        assert_eq!(oracle.get_flag(&flag_id).unwrap().status, FlagStatus::Innocent);
    }

    #[test]
    fn test_split_vote_dismisses() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        // 3 guilty / 2 innocent: 60% < 2/3 either way.
        let outcome = run_votes(&mut oracle, &flag_id, 3, 1_100).unwrap();
        assert_eq!(outcome.verdict, Verdict::Dismissed);
        assert_eq!(oracle.get_flag(&flag_id).unwrap().status, FlagStatus::Dismissed);
    }

    #[test]
    fn test_vote_guards() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        let jury = oracle.get_jury(&flag_id).unwrap();

        // Not a juror.
        assert_eq!(
            oracle.vote(&account(99), &flag_id, true, 1_100),
            Err(SanadError::NotJuror)
        );
        // Write-once.
        oracle.vote(&jury[0], &flag_id, true, 1_100).unwrap();
        assert_eq!(
            oracle.vote(&jury[0], &flag_id, false, 1_101),
            Err(SanadError::AlreadyVoted)
        );
        // After the deadline the vote path is closed.
        assert_eq!(
            oracle.vote(&jury[1], &flag_id, true, 1_000 + VOTING_PERIOD_SECS),
            Err(SanadError::VotingClosed)
        );
    }

    #[test]
    fn test_finalize_expired_counts_cast_votes() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        let jury = oracle.get_jury(&flag_id).unwrap();

        // 3 of 5 vote guilty, then the deadline passes: 3/3 cast = 100%.
        for juror in jury.iter().take(3) {
            oracle.vote(juror, &flag_id, true, 1_100).unwrap();
        }
        assert_eq!(
            oracle.finalize_expired(&flag_id, 1_200),
            Err(SanadError::VotingStillOpen)
        );

        let outcome = oracle
            .finalize_expired(&flag_id, 1_000 + VOTING_PERIOD_SECS)
            .unwrap();
        assert_eq!(outcome.verdict, Verdict::Guilty);
    }

    #[test]
    fn test_finalize_with_no_votes_dismisses() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        let outcome = oracle
            .finalize_expired(&flag_id, 1_000 + VOTING_PERIOD_SECS)
            .unwrap();
        assert_eq!(outcome.verdict, Verdict::Dismissed);
    }

    #[test]
    fn test_appeal_reruns_with_fresh_jury() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        run_votes(&mut oracle, &flag_id, 1, 1_100).unwrap();

        let verdict_at = oracle.get_flag(&flag_id).unwrap().verdict_at.unwrap();
        let assembled = oracle
            .open_appeal(
                account(2),
                &flag_id,
                deposit() * APPEAL_DEPOSIT_FACTOR,
                verdict_at + DAY,
                &staking,
                &mut FixedEntropy([77u8; 32]),
            )
            .unwrap();
        assert!(assembled);

        let flag = oracle.get_flag(&flag_id).unwrap();
        assert_eq!(flag.status, FlagStatus::InReview);
        assert_eq!(flag.first_verdict, Some(Verdict::Innocent));
        assert!(flag.appealed);
        assert_eq!(flag.votes_cast(), 0);

        // Appeal verdict settles the appellant's doubled deposit.
        let outcome = run_votes(&mut oracle, &flag_id, 4, verdict_at + 2 * DAY).unwrap();
        assert_eq!(outcome.verdict, Verdict::Guilty);
        assert!(outcome.appeal);
        assert_eq!(outcome.depositor, account(2));
        assert_eq!(outcome.deposit, deposit() * APPEAL_DEPOSIT_FACTOR);
    }

    #[test]
    fn test_appeal_guards() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);

        // Not terminal yet.
        assert_eq!(
            oracle.open_appeal(
                account(2), &flag_id, deposit() * 2, 1_100, &staking, &mut entropy
            ),
            Err(SanadError::NotTerminal)
        );

        run_votes(&mut oracle, &flag_id, 4, 1_100).unwrap();
        let verdict_at = oracle.get_flag(&flag_id).unwrap().verdict_at.unwrap();

        // Deposit must be doubled.
        assert_eq!(
            oracle.open_appeal(
                account(2), &flag_id, deposit() * 2 - 1, verdict_at + 1, &staking, &mut entropy
            ),
            Err(SanadError::InsufficientDeposit)
        );
        // Window closes after APPEAL_WINDOW_SECS.
        assert_eq!(
            oracle.open_appeal(
                account(2),
                &flag_id,
                deposit() * 2,
                verdict_at + APPEAL_WINDOW_SECS + 1,
                &staking,
                &mut entropy
            ),
            Err(SanadError::AppealWindowClosed)
        );
    }

    #[test]
    fn test_only_one_appeal_round() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        run_votes(&mut oracle, &flag_id, 4, 1_100).unwrap();

        let verdict_at = oracle.get_flag(&flag_id).unwrap().verdict_at.unwrap();
        oracle
            .open_appeal(account(2), &flag_id, deposit() * 2, verdict_at + 1, &staking, &mut entropy)
            .unwrap();
        run_votes(&mut oracle, &flag_id, 1, verdict_at + DAY).unwrap();

        // The appeal verdict is final.
        let second_verdict_at = oracle.get_flag(&flag_id).unwrap().verdict_at.unwrap();
        assert_eq!(
            oracle.open_appeal(
                account(3), &flag_id, deposit() * 4, second_verdict_at + 1, &staking, &mut entropy
            ),
            Err(SanadError::AlreadyAppealed)
        );
    }

    #[test]
    fn test_appeal_blocked_by_newer_flag() {
        let (mut oracle, staking, mut entropy) = setup();
        let flag_id = raise(&mut oracle, &staking, &mut entropy, 1_000);
        run_votes(&mut oracle, &flag_id, 4, 1_100).unwrap();
        let verdict_at = oracle.get_flag(&flag_id).unwrap().verdict_at.unwrap();

        // A second flag claims the resource's active slot.
        oracle
            .flag_resource(
                account(3), resource(10), [0u8; 32], deposit(), verdict_at + 1, &staking, &mut entropy
            )
            .unwrap();
        assert_eq!(
            oracle.open_appeal(
                account(2), &flag_id, deposit() * 2, verdict_at + 2, &staking, &mut entropy
            ),
            Err(SanadError::ResourceAlreadyFlagged)
        );
    }
}
