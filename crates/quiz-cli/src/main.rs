use std::env;
use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use contracts::{CommandPayload, RunConfig, AUTO_FINISH_DELAY_MS, REVEAL_DELAY_MS};
use quiz_api::{serve, EngineApi, EngineClock};
use quiz_core::catalog;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("quiz-cli <command>");
    println!("commands:");
    println!("  games");
    println!("    list the built-in game catalog");
    println!("  play <game_id>");
    println!("    play a game interactively on a wall clock");
    println!("  simulate <game_id> <option_id> [option_id ...]");
    println!("    replay a scripted answer sequence on a virtual clock");
    println!("  serve [addr]");
    println!("    default addr: 127.0.0.1:8080");
}

fn parse_socket_addr(value: Option<&String>) -> Result<SocketAddr, String> {
    let raw = value.map(String::as_str).unwrap_or("127.0.0.1:8080");
    raw.parse::<SocketAddr>()
        .map_err(|_| format!("invalid addr: {raw}"))
}

fn list_games() {
    println!("{:<20} {:<24} coins  xp", "game_id", "title");
    for game in catalog::list_games() {
        println!(
            "{:<20} {:<24} {:>5} {:>3}",
            game.game_id, game.title, game.coins, game.xp
        );
    }
}

fn read_line(prompt: &str) -> Result<String, String> {
    print!("{prompt}");
    std::io::stdout()
        .flush()
        .map_err(|err| format!("stdout error: {err}"))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|err| format!("stdin error: {err}"))?;
    Ok(line.trim().to_string())
}

fn print_shell(engine: &EngineApi) {
    let shell = engine.shell_view();

    if shell.is_game_over {
        return;
    }

    println!();
    println!(
        "[{} {}/{}] {}",
        shell.title,
        shell.current_stage_index + 1,
        shell.total_stages,
        shell.prompt
    );
    for (index, option) in shell.options.iter().enumerate() {
        let marker = if option.is_selected { ">" } else { " " };
        println!("  {marker} {}) {}", index + 1, option.label);
    }
}

fn print_reveal(engine: &EngineApi) {
    let shell = engine.shell_view();
    let Some(selected) = shell.options.iter().find(|option| option.is_selected) else {
        return;
    };

    match selected.is_correct {
        Some(true) => println!("  correct!"),
        Some(false) => println!("  not quite."),
        None => {}
    }
    if let Some(reflection) = &selected.reflection {
        println!("  {reflection}");
    }
    println!("  coins so far: {}", shell.coins);
}

async fn play_game(args: &[String]) -> Result<(), String> {
    let game_id = args
        .get(2)
        .cloned()
        .ok_or_else(|| "missing game_id".to_string())?;

    let config = RunConfig {
        game_id: game_id.clone(),
        ..RunConfig::default()
    };
    let engine = EngineApi::from_config(config, EngineClock::wall())
        .map_err(|err| format!("failed to start run: {err}"))?;

    println!("{} -- {}", engine.info().title, engine.info().subtitle);
    play_loop(engine).await
}

async fn play_loop(mut engine: EngineApi) -> Result<(), String> {
    'round: loop {
        engine.poll();
        let shell = engine.shell_view();

        if shell.is_game_over {
            if let Some(outcome) = &shell.outcome {
                println!();
                println!("{outcome}");
                if shell.show_confetti {
                    println!("confetti! completion submitted.");
                }
            }

            if shell.retry_available {
                let again = read_line("try again? [y/N] ")?;
                if again.eq_ignore_ascii_case("y") {
                    engine.submit(CommandPayload::Retry);
                    continue 'round;
                }
            }
            break;
        }

        if shell.options.iter().any(|option| option.is_selected) {
            // Answered; wait out the reveal delay, show feedback, then
            // either advance or let the auto-finish timer close the run.
            tokio::time::sleep(Duration::from_millis(REVEAL_DELAY_MS)).await;
            engine.poll();
            print_reveal(&engine);

            if shell.current_stage_index + 1 < shell.total_stages {
                let _ = read_line("  press enter for the next stage ")?;
                engine.submit(CommandPayload::Advance);
            } else {
                // The reveal delay already elapsed above; only the remainder
                // of the auto-finish window is left.
                tokio::time::sleep(Duration::from_millis(
                    AUTO_FINISH_DELAY_MS - REVEAL_DELAY_MS,
                ))
                .await;
                engine.poll();
            }
            continue;
        }

        print_shell(&engine);
        let answer = read_line("pick an option: ")?;
        let option_id = match answer.parse::<usize>() {
            Ok(number) if number >= 1 && number <= shell.options.len() => {
                shell.options[number - 1].id.clone()
            }
            _ => answer,
        };

        let result = engine.submit(CommandPayload::SelectOption { option_id });
        if !result.accepted {
            if let Some(error) = result.error {
                println!("  {}", error.message);
            }
        }
    }

    Ok(())
}

fn run_simulation(args: &[String]) -> Result<(), String> {
    let game_id = args
        .get(2)
        .cloned()
        .ok_or_else(|| "missing game_id".to_string())?;
    let answers = &args[3.min(args.len())..];
    if answers.is_empty() {
        return Err("missing option ids".to_string());
    }

    let config = RunConfig {
        game_id: game_id.clone(),
        run_id: "run_sim_001".to_string(),
        ..RunConfig::default()
    };
    let mut engine = EngineApi::from_config(config, EngineClock::manual())
        .map_err(|err| format!("failed to start run: {err}"))?;

    let total_stages = engine.status().total_stages;

    for (index, option_id) in answers.iter().enumerate() {
        let result = engine.submit(CommandPayload::SelectOption {
            option_id: option_id.clone(),
        });
        if !result.accepted {
            let reason = result
                .error
                .map(|error| error.message)
                .unwrap_or_else(|| "rejected".to_string());
            return Err(format!("select {option_id} rejected: {reason}"));
        }

        engine.advance_clock(REVEAL_DELAY_MS);

        if index + 1 < total_stages {
            let advanced = engine.submit(CommandPayload::Advance);
            if !advanced.accepted {
                return Err(format!("advance after stage {} rejected", index + 1));
            }
        }
    }

    // Let the auto-finish timer land on the virtual clock.
    engine.advance_clock(AUTO_FINISH_DELAY_MS);

    println!("{}", engine.status());
    match engine.outcome() {
        Some(outcome) => println!("{outcome}"),
        None => println!(
            "run did not complete; answered {} of {} stages",
            answers.len().min(total_stages),
            total_stages
        ),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("games") => {
            list_games();
        }
        Some("play") => {
            if let Err(err) = play_game(&args).await {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        Some("simulate") => {
            if let Err(err) = run_simulation(&args) {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        Some("serve") => match parse_socket_addr(args.get(2)) {
            Ok(addr) => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("info")),
                    )
                    .init();
                println!("serving api on http://{addr}");
                if let Err(err) = serve(addr).await {
                    eprintln!("server error: {err}");
                    std::process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("error: {}", err);
                print_usage();
                std::process::exit(2);
            }
        },
        _ => {
            print_usage();
        }
    }
}
