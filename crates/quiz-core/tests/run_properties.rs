use contracts::{
    GameInfo, RewardOverride, RewardPlan, RewardPolicy, RunConfig, RunPhase, Stage, StageOption,
    StageSet, AUTO_FINISH_DELAY_MS, REVEAL_DELAY_MS,
};
use proptest::prelude::*;
use quiz_core::catalog;
use quiz_core::rewards;
use quiz_core::run::QuizRun;

fn option(id: &str, is_correct: bool) -> StageOption {
    StageOption {
        id: id.to_string(),
        label: format!("label {id}"),
        reflection: format!("reflection {id}"),
        is_correct,
    }
}

fn stage(id: &str) -> Stage {
    Stage {
        id: id.to_string(),
        prompt: format!("prompt {id}"),
        options: vec![option("right", true), option("wrong", false)],
        reward: None,
    }
}

fn stage_set(total_stages: usize) -> StageSet {
    StageSet {
        set_id: "set_prop".to_string(),
        stages: (0..total_stages)
            .map(|index| stage(&format!("stage_{index}")))
            .collect(),
    }
}

fn plan(policy: RewardPolicy, total_coins: i64) -> RewardPlan {
    RewardPlan {
        policy,
        total_coins,
        xp: 10,
        coins_per_correct: 1,
    }
}

fn test_run(total_stages: usize, policy: RewardPolicy, total_coins: i64) -> QuizRun {
    let info = GameInfo {
        game_id: "prop-game".to_string(),
        game_type: "quiz".to_string(),
        title: "Property Game".to_string(),
        subtitle: "for invariants".to_string(),
        coins: total_coins,
        xp: 10,
    };
    QuizRun::new(
        RunConfig::default(),
        info,
        stage_set(total_stages),
        plan(policy, total_coins),
    )
    .expect("valid stage set")
}

/// Answer the current stage, wait out the reveal delay, and advance (which
/// completes the run on the last stage).
fn answer_and_advance(run: &mut QuizRun, option_id: &str, now_ms: &mut u64) {
    assert!(run.select_option(option_id, *now_ms));
    *now_ms += REVEAL_DELAY_MS;
    run.poll(*now_ms);
    assert!(run.advance(*now_ms));
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SelectRight,
    SelectWrong,
    Advance,
    Finish,
    Retry,
    Wait(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::SelectRight),
        Just(Op::SelectWrong),
        Just(Op::Advance),
        Just(Op::Finish),
        Just(Op::Retry),
        (0_u64..4_000).prop_map(Op::Wait),
    ]
}

fn apply_op(run: &mut QuizRun, op: Op, now_ms: &mut u64) {
    match op {
        Op::SelectRight => {
            run.select_option("right", *now_ms);
        }
        Op::SelectWrong => {
            run.select_option("wrong", *now_ms);
        }
        Op::Advance => {
            run.advance(*now_ms);
        }
        Op::Finish => {
            run.finish(*now_ms);
        }
        Op::Retry => {
            run.retry(*now_ms);
        }
        Op::Wait(delta_ms) => {
            *now_ms += delta_ms;
            run.poll(*now_ms);
        }
    }
}

#[test]
fn perfect_run_passes_and_awards_the_full_pot() {
    let total_stages = 4;
    let mut run = test_run(total_stages, RewardPolicy::ThresholdBinary, 20);
    let mut now_ms = 0;

    for _ in 0..total_stages {
        answer_and_advance(&mut run, "right", &mut now_ms);
    }

    let outcome = run.outcome().expect("run completed");
    assert!(outcome.passed);
    assert_eq!(outcome.final_score, total_stages);
    assert_eq!(outcome.coins_awarded, 20);
    assert_eq!(run.coins(), 20);
    assert!(run.completion_submitted());
}

#[test]
fn threshold_policy_awards_nothing_below_a_perfect_score() {
    let mut run = test_run(5, RewardPolicy::ThresholdBinary, 20);
    let mut now_ms = 0;

    answer_and_advance(&mut run, "wrong", &mut now_ms);
    for _ in 0..4 {
        answer_and_advance(&mut run, "right", &mut now_ms);
    }

    let outcome = run.outcome().expect("run completed");
    assert!(!outcome.passed);
    assert_eq!(outcome.final_score, 4);
    assert_eq!(outcome.coins_awarded, 0);
    assert_eq!(run.coins(), 0);
}

#[test]
fn proportional_policy_floors_the_partial_pot() {
    let mut run = test_run(5, RewardPolicy::Proportional, 15);
    let mut now_ms = 0;

    // 3 of 5 correct: floor(15 * 3 / 5) = 9.
    answer_and_advance(&mut run, "right", &mut now_ms);
    answer_and_advance(&mut run, "wrong", &mut now_ms);
    answer_and_advance(&mut run, "right", &mut now_ms);
    answer_and_advance(&mut run, "wrong", &mut now_ms);
    answer_and_advance(&mut run, "right", &mut now_ms);

    let outcome = run.outcome().expect("run completed");
    assert_eq!(outcome.final_score, 3);
    assert_eq!(outcome.coins_awarded, 9);
    assert_eq!(run.coins(), 9);
}

#[test]
fn auto_finish_and_explicit_finish_produce_the_same_outcome() {
    let mut by_timer = test_run(2, RewardPolicy::ThresholdBinary, 10);
    let mut now_ms = 0;
    answer_and_advance(&mut by_timer, "right", &mut now_ms);
    assert!(by_timer.select_option("right", now_ms));
    now_ms += AUTO_FINISH_DELAY_MS;
    by_timer.poll(now_ms);

    let mut by_button = test_run(2, RewardPolicy::ThresholdBinary, 10);
    let mut now_ms = 0;
    answer_and_advance(&mut by_button, "right", &mut now_ms);
    assert!(by_button.select_option("right", now_ms));
    now_ms += REVEAL_DELAY_MS;
    by_button.poll(now_ms);
    assert!(by_button.finish(now_ms));

    let timer_outcome = by_timer.outcome().expect("timer path completed");
    let button_outcome = by_button.outcome().expect("button path completed");
    assert_eq!(timer_outcome, button_outcome);
}

#[test]
fn completion_computes_once_even_when_both_paths_race() {
    let mut run = test_run(1, RewardPolicy::ThresholdBinary, 10);
    let mut now_ms = 0;

    assert!(run.select_option("right", now_ms));
    now_ms += REVEAL_DELAY_MS;
    run.poll(now_ms);
    assert!(run.finish(now_ms));
    let completed_events = run
        .events()
        .iter()
        .filter(|event| event.event_type == contracts::EventType::RunCompleted)
        .count();
    assert_eq!(completed_events, 1);

    // The auto-finish timer is still queued; when it fires it must not
    // recompute or double-award.
    now_ms += AUTO_FINISH_DELAY_MS;
    run.poll(now_ms);
    let completed_events = run
        .events()
        .iter()
        .filter(|event| event.event_type == contracts::EventType::RunCompleted)
        .count();
    assert_eq!(completed_events, 1);
    assert_eq!(run.coins(), 10);
}

#[test]
fn retry_resets_every_piece_of_run_state() {
    let mut run = test_run(2, RewardPolicy::ThresholdBinary, 10);
    let mut now_ms = 0;

    answer_and_advance(&mut run, "wrong", &mut now_ms);
    answer_and_advance(&mut run, "right", &mut now_ms);
    assert!(run.outcome().is_some());

    assert!(run.retry(now_ms));
    assert_eq!(run.phase(), RunPhase::Presenting);
    assert_eq!(run.status().current_stage_index, 0);
    assert_eq!(run.coins(), 0);
    assert!(run.attempt_history().is_empty());
    assert!(run.outcome().is_none());
    assert!(run.selected_option_id().is_none());
    assert!(!run.completion_submitted());
}

#[test]
fn catalog_game_plays_end_to_end_with_confetti() {
    let definition = catalog::load_game("credit-basics").expect("catalog game");
    let plan = rewards::resolve_reward_plan(
        definition.policy,
        definition.coins_per_correct,
        Some(&definition.info),
        None,
    );
    let total_stages = definition.stage_set.len();
    let mut run = QuizRun::new(
        RunConfig {
            game_id: definition.info.game_id.clone(),
            ..RunConfig::default()
        },
        definition.info,
        definition.stage_set.clone(),
        plan,
    )
    .expect("catalog sets validate");

    let mut now_ms = 0;
    for stage in &definition.stage_set.stages {
        let correct = stage.correct_option().expect("one correct option");
        answer_and_advance(&mut run, &correct.id.clone(), &mut now_ms);
    }

    let outcome = run.outcome().expect("run completed");
    assert!(outcome.passed);
    assert_eq!(outcome.final_score, total_stages);
    assert_eq!(outcome.coins_awarded, 15);
    assert_eq!(outcome.xp_awarded, 15);
    let shell = run.shell_view();
    assert!(shell.is_game_over);
    assert!(shell.show_confetti);
    assert!(!shell.retry_available);
}

#[test]
fn reward_override_yields_to_catalog_rows() {
    let definition = catalog::load_game("budget-builder").expect("catalog game");
    let fallback = RewardOverride {
        coins: Some(999),
        xp: Some(999),
    };
    let plan = rewards::resolve_reward_plan(
        definition.policy,
        definition.coins_per_correct,
        Some(&definition.info),
        Some(&fallback),
    );
    assert_eq!(plan.total_coins, 20);
    assert_eq!(plan.xp, 15);

    let plan_without_catalog =
        rewards::resolve_reward_plan(definition.policy, 1, None, Some(&fallback));
    assert_eq!(plan_without_catalog.total_coins, 999);
    assert_eq!(plan_without_catalog.xp, 999);
}

#[test]
fn stage_set_round_trips_through_json() {
    let set = stage_set(3);
    let encoded = serde_json::to_string(&set).expect("serialize");
    let decoded: StageSet = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(set, decoded);
}

proptest! {
    #[test]
    fn arbitrary_command_sequences_never_break_core_invariants(
        ops in proptest::collection::vec(op_strategy(), 1..80),
        total_stages in 1_usize..6,
    ) {
        let mut run = test_run(total_stages, RewardPolicy::ThresholdBinary, 10);
        let mut now_ms = 0;
        let mut last_index = 0;
        let mut last_generation = run.generation();

        for op in ops {
            apply_op(&mut run, op, &mut now_ms);
            let status = run.status();

            prop_assert!(status.current_stage_index < total_stages);
            if run.generation() == last_generation {
                prop_assert!(status.current_stage_index >= last_index);
            }
            last_index = status.current_stage_index;
            last_generation = run.generation();

            prop_assert!(run.attempt_history().len() <= total_stages);
            prop_assert!(run.coins() >= 0);

            if let Some(outcome) = run.outcome() {
                prop_assert_eq!(run.phase(), RunPhase::Finished);
                prop_assert_eq!(outcome.total_stages, total_stages);
                prop_assert_eq!(outcome.passed, outcome.final_score == total_stages);
            }
        }
    }

    #[test]
    fn one_attempt_per_stage_no_matter_how_often_select_is_spammed(
        spam in 1_usize..10,
        total_stages in 1_usize..5,
    ) {
        let mut run = test_run(total_stages, RewardPolicy::ThresholdBinary, 10);
        let mut now_ms = 0;

        for stage_index in 0..total_stages {
            for _ in 0..spam {
                run.select_option("right", now_ms);
                run.select_option("wrong", now_ms);
            }
            prop_assert_eq!(run.attempt_history().len(), stage_index + 1);
            now_ms += REVEAL_DELAY_MS;
            run.poll(now_ms);
            run.advance(now_ms);
        }

        let outcome = run.outcome().expect("run completed");
        prop_assert_eq!(outcome.final_score, outcome.total_stages);
        prop_assert!(outcome.passed);
    }

    #[test]
    fn completed_score_matches_the_recorded_attempts(
        answers in proptest::collection::vec(any::<bool>(), 1..6),
    ) {
        let total_stages = answers.len();
        let mut run = test_run(total_stages, RewardPolicy::Proportional, 12);
        let mut now_ms = 0;

        for correct in &answers {
            let option_id = if *correct { "right" } else { "wrong" };
            answer_and_advance(&mut run, option_id, &mut now_ms);
        }

        let expected_score = answers.iter().filter(|correct| **correct).count();
        let outcome = run.outcome().expect("run completed");
        prop_assert_eq!(run.attempt_history().len(), total_stages);
        prop_assert_eq!(outcome.final_score, expected_score);
        prop_assert_eq!(
            outcome.coins_awarded,
            rewards::completion_coins(run.plan(), expected_score, total_stages)
        );
    }

    #[test]
    fn timers_scheduled_before_a_retry_never_touch_the_new_run(
        stale_delay in 0_u64..10_000,
    ) {
        let mut run = test_run(1, RewardPolicy::ThresholdBinary, 10);
        let mut now_ms = 0;

        // Fail the single stage so retry is available, leaving the
        // auto-finish timer queued.
        run.select_option("wrong", now_ms);
        now_ms += REVEAL_DELAY_MS;
        run.poll(now_ms);
        run.finish(now_ms);
        prop_assert!(run.retry(now_ms));

        now_ms += stale_delay;
        run.poll(now_ms);
        prop_assert_eq!(run.phase(), RunPhase::Presenting);
        prop_assert!(run.outcome().is_none());
        prop_assert!(run.attempt_history().is_empty());
    }
}
