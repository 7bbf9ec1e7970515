//! Reward policy computation and configuration resolution.
//!
//! Reward totals resolve once at run construction with the precedence
//! catalog lookup > caller-supplied override > literal default. The running
//! per-correct increment shown during play is cosmetic; completion overwrites
//! the coin total with the policy value.

use contracts::{GameInfo, RewardOverride, RewardPlan, RewardPolicy};

pub const DEFAULT_TOTAL_COINS: i64 = 10;
pub const DEFAULT_XP: i64 = 10;
pub const DEFAULT_COINS_PER_CORRECT: i64 = 1;

/// Resolve the reward plan for a run.
pub fn resolve_reward_plan(
    policy: RewardPolicy,
    coins_per_correct: i64,
    lookup: Option<&GameInfo>,
    fallback: Option<&RewardOverride>,
) -> RewardPlan {
    let total_coins = lookup
        .map(|info| info.coins)
        .or_else(|| fallback.and_then(|f| f.coins))
        .unwrap_or(DEFAULT_TOTAL_COINS);
    let xp = lookup
        .map(|info| info.xp)
        .or_else(|| fallback.and_then(|f| f.xp))
        .unwrap_or(DEFAULT_XP);

    RewardPlan {
        policy,
        total_coins,
        xp,
        coins_per_correct,
    }
}

/// Coins awarded at completion; overwrites the cosmetic running total.
pub fn completion_coins(plan: &RewardPlan, final_score: usize, total_stages: usize) -> i64 {
    if total_stages == 0 {
        return 0;
    }
    if final_score >= total_stages {
        return plan.total_coins;
    }
    match plan.policy {
        RewardPolicy::ThresholdBinary => 0,
        RewardPolicy::Proportional => plan.total_coins * final_score as i64 / total_stages as i64,
    }
}
