//! Built-in game catalog: financial/life-skills stage sets plus the reward
//! rows the configuration resolver looks up by game id.

use contracts::{GameInfo, RewardPolicy, Stage, StageOption, StageSet};

/// Everything needed to start a run of one game.
#[derive(Debug, Clone)]
pub struct GameDefinition {
    pub info: GameInfo,
    pub policy: RewardPolicy,
    pub coins_per_correct: i64,
    pub stage_set: StageSet,
}

pub const GAME_IDS: [&str; 6] = [
    "budget-builder",
    "needs-vs-wants",
    "savings-streak",
    "scam-spotter",
    "credit-basics",
    "piggy-bank-goals",
];

pub fn load_game(game_id: &str) -> Option<GameDefinition> {
    match game_id {
        "budget-builder" => Some(budget_builder()),
        "needs-vs-wants" => Some(needs_vs_wants()),
        "savings-streak" => Some(savings_streak()),
        "scam-spotter" => Some(scam_spotter()),
        "credit-basics" => Some(credit_basics()),
        "piggy-bank-goals" => Some(piggy_bank_goals()),
        _ => None,
    }
}

pub fn game_info(game_id: &str) -> Option<GameInfo> {
    load_game(game_id).map(|definition| definition.info)
}

pub fn list_games() -> Vec<GameInfo> {
    GAME_IDS
        .iter()
        .filter_map(|game_id| game_info(game_id))
        .collect()
}

fn info(game_id: &str, title: &str, subtitle: &str, coins: i64, xp: i64) -> GameInfo {
    GameInfo {
        game_id: game_id.to_string(),
        game_type: "quiz".to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        coins,
        xp,
    }
}

fn option(id: &str, label: &str, reflection: &str, is_correct: bool) -> StageOption {
    StageOption {
        id: id.to_string(),
        label: label.to_string(),
        reflection: reflection.to_string(),
        is_correct,
    }
}

fn stage(id: &str, prompt: &str, options: Vec<StageOption>) -> Stage {
    Stage {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options,
        reward: None,
    }
}

fn budget_builder() -> GameDefinition {
    GameDefinition {
        info: info(
            "budget-builder",
            "Budget Builder",
            "Split your allowance before it splits you",
            20,
            15,
        ),
        policy: RewardPolicy::ThresholdBinary,
        coins_per_correct: 1,
        stage_set: StageSet {
            set_id: "budget-builder".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "You get $20 allowance this week. What do you do first?",
                    vec![
                        option(
                            "a",
                            "Spend it at the arcade before it burns a hole in your pocket",
                            "Spending everything first leaves nothing for the things you actually planned for.",
                            false,
                        ),
                        option(
                            "b",
                            "Write down what you need, what you want, and what you can save",
                            "A plan made before you spend is the whole trick. Money with a job assigned rarely disappears.",
                            true,
                        ),
                        option(
                            "c",
                            "Hide it under your mattress and decide later",
                            "Hiding money is not a plan. Later usually means an impulse buy decides for you.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "Your plan says $5 for snacks, but a new game costs $15. You have $12 unplanned. What now?",
                    vec![
                        option(
                            "a",
                            "Borrow $3 from next week's allowance",
                            "Borrowing from next week means next week starts already behind.",
                            false,
                        ),
                        option(
                            "b",
                            "Take the $3 from your savings jar, it's barely anything",
                            "Small raids on savings become a habit, and the jar never fills.",
                            false,
                        ),
                        option(
                            "c",
                            "Wait and save $3 from this week toward it",
                            "Waiting one week costs nothing. The game will still be there, and your plan stays whole.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "At the end of the week you have $4 left over. Where does it go?",
                    vec![
                        option(
                            "a",
                            "Into savings, leftover money is a head start",
                            "Leftovers moved to savings are the easiest dollars you will ever save.",
                            true,
                        ),
                        option(
                            "b",
                            "Spend it, leftover money is free money",
                            "Leftover money was never free, it was just unassigned. Spending it by default wastes the win.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_4",
                    "A friend asks how you always have money. What's the honest answer?",
                    vec![
                        option(
                            "a",
                            "I'm just lucky with money",
                            "It isn't luck. People who seem lucky with money almost always have a quiet plan.",
                            false,
                        ),
                        option(
                            "b",
                            "I decide where every dollar goes before I spend any of it",
                            "Exactly. A budget is deciding on purpose instead of finding out by accident.",
                            true,
                        ),
                        option(
                            "c",
                            "I never spend money on anything fun",
                            "A good budget includes fun on purpose. Never spending isn't a plan people can keep.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}

fn needs_vs_wants() -> GameDefinition {
    GameDefinition {
        info: info(
            "needs-vs-wants",
            "Needs vs. Wants",
            "Sort the must-haves from the nice-to-haves",
            10,
            10,
        ),
        policy: RewardPolicy::ThresholdBinary,
        coins_per_correct: 1,
        stage_set: StageSet {
            set_id: "needs-vs-wants".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "Your sneakers fit fine, but a new limited-edition pair just dropped. Buying them is a...",
                    vec![
                        option(
                            "a",
                            "Need, everyone at school has them",
                            "What everyone else has doesn't change the category. Working shoes mean new ones are a want.",
                            false,
                        ),
                        option(
                            "b",
                            "Want, your current pair still does the job",
                            "Right. Wants aren't bad, they just wait their turn behind needs.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "Which of these belongs in the needs column?",
                    vec![
                        option(
                            "a",
                            "A bus pass to get to school",
                            "Getting to school isn't optional, so the bus pass is a true need.",
                            true,
                        ),
                        option(
                            "b",
                            "A streaming subscription",
                            "Entertainment feels essential some days, but life continues without it. That's a want.",
                            false,
                        ),
                        option(
                            "c",
                            "Concert tickets for your favorite band",
                            "A great memory, still a want. Needs keep you fed, housed, healthy, and at school.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "You have $30. Lunch money for the week costs $20, a hoodie costs $25. What's the move?",
                    vec![
                        option(
                            "a",
                            "Hoodie now, figure out lunches somehow",
                            "Covering a want by gambling on a need is how small money problems grow.",
                            false,
                        ),
                        option(
                            "b",
                            "Lunch money first, save the remaining $10 toward the hoodie",
                            "Needs come first, then the leftover starts funding the want. Both goals survive.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_4",
                    "A want you've saved for three weeks is finally affordable. Buying it is...",
                    vec![
                        option(
                            "a",
                            "Fine, planned spending on wants is healthy",
                            "Saving for a want and then buying it is the system working, not a failure.",
                            true,
                        ),
                        option(
                            "b",
                            "Wrong, money should only go to needs and savings",
                            "Budgets that ban all fun get abandoned. Planned wants keep the plan livable.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}

fn savings_streak() -> GameDefinition {
    GameDefinition {
        info: info(
            "savings-streak",
            "Savings Streak",
            "Small deposits, big habits",
            15,
            12,
        ),
        policy: RewardPolicy::Proportional,
        coins_per_correct: 3,
        stage_set: StageSet {
            set_id: "savings-streak".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "You want to save $50 in ten weeks. What's the strongest start?",
                    vec![
                        option(
                            "a",
                            "Save whatever happens to be left each week",
                            "Leftover-based saving usually saves nothing, because leftovers have a way of vanishing.",
                            false,
                        ),
                        option(
                            "b",
                            "Put $5 aside the moment money arrives",
                            "Paying yourself first turns saving into the default instead of the leftovers.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "Week three, you're tempted to skip the deposit for a movie night. What protects the streak?",
                    vec![
                        option(
                            "a",
                            "Skip it once, one week can't matter",
                            "One skipped week rarely stays one. Streaks break at the first excused exception.",
                            false,
                        ),
                        option(
                            "b",
                            "Make the deposit, then look for movie money elsewhere",
                            "Deposit first, then adapt the fun. The streak survives and so does the plan.",
                            true,
                        ),
                        option(
                            "c",
                            "Take the $5 back out of savings after the movie",
                            "Withdrawing undoes the deposit and teaches your jar that it's really a lending library.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "Grandma gives you a surprise $10. Where does it push you fastest toward the goal?",
                    vec![
                        option(
                            "a",
                            "Straight into savings, windfalls are rocket fuel",
                            "Unexpected money wasn't in your spending plan, so saving it costs you nothing you'd planned on.",
                            true,
                        ),
                        option(
                            "b",
                            "Spend it, surprise money doesn't count",
                            "All money counts the same once it's yours. Surprise dollars save exactly as well as earned ones.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_4",
                    "Halfway there, progress feels slow. What keeps savers going?",
                    vec![
                        option(
                            "a",
                            "Checking the total and celebrating each milestone",
                            "Watching the number grow is the reward loop. Milestones make slow progress visible.",
                            true,
                        ),
                        option(
                            "b",
                            "Doubling the deposit even if it starves lunch money",
                            "Deposits that break your needs budget don't last. Sustainable beats heroic.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_5",
                    "You hit $50. What does the streak teach you for the next goal?",
                    vec![
                        option(
                            "a",
                            "Saving works when it's automatic and small",
                            "The habit was the prize. Automatic, small, and steady beats occasional and heroic every time.",
                            true,
                        ),
                        option(
                            "b",
                            "Saving only works when a deadline forces you",
                            "The deadline helped, but the weekly habit did the work. Habits outlive deadlines.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}

fn scam_spotter() -> GameDefinition {
    GameDefinition {
        info: info(
            "scam-spotter",
            "Scam Spotter",
            "If it sounds too good to be true...",
            20,
            20,
        ),
        policy: RewardPolicy::ThresholdBinary,
        coins_per_correct: 3,
        stage_set: StageSet {
            set_id: "scam-spotter".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "A text says you won a phone you never entered to win, just pay $10 shipping. What do you do?",
                    vec![
                        option(
                            "a",
                            "Pay the $10, it's a tiny price for a phone",
                            "Prizes that cost money first are the oldest scam there is. The phone doesn't exist.",
                            false,
                        ),
                        option(
                            "b",
                            "Delete it, real prizes don't invoice the winner",
                            "Right. You can't win a contest you never entered, and winners never pay to receive.",
                            true,
                        ),
                        option(
                            "c",
                            "Reply asking for more details",
                            "Replying confirms your number is live and invites a smarter follow-up scam.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "A gaming site offers double the coins if you log in with your account password through their page. That's...",
                    vec![
                        option(
                            "a",
                            "A phishing trap, never enter passwords on third-party pages",
                            "Exactly. The doubled coins are bait; the password is the catch.",
                            true,
                        ),
                        option(
                            "b",
                            "A good deal if the site looks professional",
                            "Looking professional is cheap. Real services never need your password on someone else's page.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "An online friend you've never met asks you to buy gift cards and read them the codes, promising to pay you back double. You should...",
                    vec![
                        option(
                            "a",
                            "Do it, friends pay friends back",
                            "Gift card codes are cash that can't be traced or refunded. The payback never comes.",
                            false,
                        ),
                        option(
                            "b",
                            "Refuse and tell a trusted adult",
                            "Gift-card-code requests are a scam signature. Refusing and telling someone protects the next kid too.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_4",
                    "What's the single best question to ask before sending anyone money online?",
                    vec![
                        option(
                            "a",
                            "Why does this need to happen right now?",
                            "Urgency is the scammer's favorite tool. Anything real survives a day of checking.",
                            true,
                        ),
                        option(
                            "b",
                            "How much profit will I make?",
                            "Focusing on the promised profit is exactly where the scam wants your eyes.",
                            false,
                        ),
                        option(
                            "c",
                            "Does the website have nice reviews?",
                            "Reviews can be bought by the hundred. Pressure and urgency are the tells that matter.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}

fn credit_basics() -> GameDefinition {
    GameDefinition {
        info: info(
            "credit-basics",
            "Credit Basics",
            "Borrowed money always comes with a plus sign",
            15,
            15,
        ),
        policy: RewardPolicy::Proportional,
        coins_per_correct: 1,
        stage_set: StageSet {
            set_id: "credit-basics".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "Borrowing $100 at 20% interest for a year means paying back about...",
                    vec![
                        option(
                            "a",
                            "$100, interest is only for late payers",
                            "Interest is the price of borrowing itself, not a punishment. It accrues from day one.",
                            false,
                        ),
                        option(
                            "b",
                            "$120, the loan plus its price tag",
                            "Right. Interest is the rental fee on money. The $20 is what borrowing cost.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "A credit card's minimum payment is $25 on a $500 balance. Paying only the minimum means...",
                    vec![
                        option(
                            "a",
                            "The debt shrinks slowly while interest keeps growing it back",
                            "Minimums mostly feed the interest. The balance barely moves and the total paid balloons.",
                            true,
                        ),
                        option(
                            "b",
                            "The debt is handled, minimum means enough",
                            "Minimum means the smallest amount that avoids penalties, not the amount that clears the debt.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "When is borrowing a reasonable choice?",
                    vec![
                        option(
                            "a",
                            "Whenever you want something sooner than you can save for it",
                            "Wanting sooner is exactly the urge interest feeds on. Impatience is expensive.",
                            false,
                        ),
                        option(
                            "b",
                            "For a planned need you can repay on a schedule you've checked",
                            "Borrowing works when the repayment fits your real budget before you sign, not after.",
                            true,
                        ),
                        option(
                            "c",
                            "Never, all borrowing is a trap",
                            "Credit is a tool, not a trap. Used with a repayment plan it builds options; used blind it builds debt.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}

fn piggy_bank_goals() -> GameDefinition {
    GameDefinition {
        info: info(
            "piggy-bank-goals",
            "Piggy Bank Goals",
            "Name the goal, feed the pig",
            10,
            8,
        ),
        policy: RewardPolicy::ThresholdBinary,
        coins_per_correct: 1,
        stage_set: StageSet {
            set_id: "piggy-bank-goals".to_string(),
            stages: vec![
                stage(
                    "stage_1",
                    "Which savings goal is easiest to actually reach?",
                    vec![
                        option(
                            "a",
                            "\"Save some money eventually\"",
                            "Goals without a number or a date can't be missed, so they also can't be reached.",
                            false,
                        ),
                        option(
                            "b",
                            "\"Save $15 for a book by the end of the month\"",
                            "A number and a date turn a wish into a goal you can track week by week.",
                            true,
                        ),
                    ],
                ),
                stage(
                    "stage_2",
                    "You're $2 short of your goal and the store has the item today. Best move?",
                    vec![
                        option(
                            "a",
                            "Wait two days until your next allowance closes the gap",
                            "Finishing the goal yourself, even two days later, is the whole point of having one.",
                            true,
                        ),
                        option(
                            "b",
                            "Ask to borrow $2 and call the goal done",
                            "A borrowed finish line isn't crossed. The goal taught patience; borrowing unlearns it.",
                            false,
                        ),
                    ],
                ),
                stage(
                    "stage_3",
                    "Goal reached and the item is bought. What's the best next step for the empty pig?",
                    vec![
                        option(
                            "a",
                            "Start the next named goal while the habit is warm",
                            "An empty jar with a new label keeps the momentum. Habits die in the gap between goals.",
                            true,
                        ),
                        option(
                            "b",
                            "Retire it, goals are for special occasions",
                            "Saving only for occasions means starting from zero each time, habit and all.",
                            false,
                        ),
                    ],
                ),
            ],
        },
    }
}
