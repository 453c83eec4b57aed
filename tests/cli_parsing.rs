use clap::Parser;
use std::path::PathBuf;

use ecole::cli::commands::analyst::AnalystCommands;
use ecole::cli::commands::attempt::AttemptCommands;
use ecole::cli::commands::play::PlayCommands;
use ecole::cli::commands::task::TaskCommands;
use ecole::cli::{Cli, Commands};
use ecole::Workstream;

#[test]
fn test_parse_task_run_with_defaults() {
    let cli = Cli::try_parse_from([
        "ecole",
        "task",
        "run",
        "--topic",
        "Spaced repetition",
        "--audience",
        "teachers",
    ])
    .unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Task(args) => match args.command {
            TaskCommands::Run {
                topic,
                audience,
                workstream,
                objective,
                tone,
            } => {
                assert_eq!(topic, "Spaced repetition");
                assert_eq!(audience, "teachers");
                assert!(workstream.is_none());
                assert_eq!(objective, "subs");
                assert_eq!(tone, "");
            }
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_task_run_keeps_workstream_raw() {
    let cli = Cli::try_parse_from([
        "ecole", "task", "run", "--topic", "t", "--audience", "a", "-w", "linkedin",
    ])
    .unwrap();

    match cli.command {
        Commands::Task(args) => {
            let TaskCommands::Run { workstream, .. } = args.command;
            assert_eq!(workstream.as_deref(), Some("linkedin"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_task_run_requires_topic() {
    let result = Cli::try_parse_from(["ecole", "task", "run", "--audience", "a"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_play_list_with_workstream() {
    let cli = Cli::try_parse_from(["ecole", "play", "list", "--workstream", "newsletter"]).unwrap();

    match cli.command {
        Commands::Play(args) => match args.command {
            PlayCommands::List { workstream } => {
                assert_eq!(workstream, Some(Workstream::Newsletter));
            }
            _ => panic!("Wrong play command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_play_list_rejects_unknown_workstream() {
    let result = Cli::try_parse_from(["ecole", "play", "list", "--workstream", "linkedin"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_play_deactivate() {
    let cli = Cli::try_parse_from(["ecole", "play", "deactivate", "x_hot_take_v1"]).unwrap();

    match cli.command {
        Commands::Play(args) => match args.command {
            PlayCommands::Deactivate { id } => assert_eq!(id, "x_hot_take_v1"),
            _ => panic!("Wrong play command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_attempt_list_filters() {
    let cli = Cli::try_parse_from([
        "ecole", "attempt", "list", "--unsettled", "-w", "medium", "--limit", "5",
    ])
    .unwrap();

    match cli.command {
        Commands::Attempt(args) => match args.command {
            AttemptCommands::List {
                unsettled,
                workstream,
                limit,
            } => {
                assert!(unsettled);
                assert_eq!(workstream, Some(Workstream::Medium));
                assert_eq!(limit, Some(5));
            }
            _ => panic!("Wrong attempt command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ecole",
        "analyst",
        "settle",
        "--json",
        "--config",
        "/tmp/ecole.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/ecole.yaml")));
    match cli.command {
        Commands::Analyst(args) => assert!(matches!(args.command, AnalystCommands::Settle)),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_attempt_show() {
    let cli = Cli::try_parse_from(["ecole", "-j", "attempt", "show", "abc"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Attempt(args) => match args.command {
            AttemptCommands::Show { id } => assert_eq!(id, "abc"),
            _ => panic!("Wrong attempt command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}
