use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use desk_assist::{describe_or_fallback, AssistConfig, GeminiGenerator};
use desk_core::{stats, CharitySummary, Desk, DeskConfig, Portal};
use desk_model::{CharityId, TaskId, TaskStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod render;

fn login_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("user")
            .long("user")
            .short('u')
            .required(true)
            .help("Username to log in with"),
    )
    .arg(
        Arg::new("password")
            .long("password")
            .short('p')
            .required(true)
            .help("Password"),
    )
    .arg(
        Arg::new("portal")
            .long("portal")
            .default_value("charity")
            .value_parser(["admin", "charity"])
            .help("Portal to log in through"),
    )
}

fn cli() -> Command {
    Command::new("charity-desk")
        .version(desk_core::VERSION)
        .about("Charity task management desk")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a TOML desk configuration"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("board").about("Show a charity's kanban board").arg(
                Arg::new("charity")
                    .long("charity")
                    .default_value("c1")
                    .help("Charity id"),
            ),
        )
        .subcommand(
            login_args(Command::new("move").about("Move a task and print its timeline"))
                .arg(
                    Arg::new("task")
                        .long("task")
                        .required(true)
                        .help("Task id"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .help("Target status (todo, in_progress, review, approved)"),
                ),
        )
        .subcommand(login_args(
            Command::new("nav").about("Show the sidebar for a login"),
        ))
        .subcommand(
            Command::new("stats").about("Cross-charity statistics").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Output as JSON"),
            ),
        )
        .subcommand(login_args(
            Command::new("inbox").about("Show the mailbox for a login"),
        ))
        .subcommand(
            Command::new("describe")
                .about("Draft a task description with the AI assistant")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .required(true)
                        .help("Task title"),
                ),
        )
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_desk(matches: &ArgMatches) -> Result<Desk> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => DeskConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => DeskConfig::default(),
    };
    Ok(Desk::new(config))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn login(desk: &mut Desk, args: &ArgMatches) -> Result<()> {
    let portal = match required(args, "portal")? {
        "admin" => Portal::Admin,
        _ => Portal::Charity,
    };
    let user = desk.login(required(args, "user")?, required(args, "password")?, portal)?;
    tracing::info!(user = %user.id, %portal, "logged in");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let mut desk = load_desk(&matches)?;

    match matches.subcommand() {
        Some(("board", args)) => {
            let charity = CharityId::new(required(args, "charity")?);
            if desk.store().charity(&charity).is_none() {
                bail!("unknown charity: {charity}");
            }
            print!("{}", render::board(&desk.board(&charity)));
        }
        Some(("move", args)) => {
            login(&mut desk, args)?;
            let task = TaskId::new(required(args, "task")?);
            let target: TaskStatus = required(args, "to")?.parse()?;
            let outcome = desk.move_task(&task, target)?;
            tracing::debug!(?outcome, "move finished");
            print!("{}", render::timeline(&desk.timeline(&task)));
        }
        Some(("nav", args)) => {
            login(&mut desk, args)?;
            let entries = desk.charity_sidebar();
            if entries.is_empty() {
                for entry in desk_core::admin_sidebar() {
                    println!("{:<16} {}", entry.label(), entry.path());
                }
            } else {
                print!("{}", render::sidebar(&entries));
            }
        }
        Some(("stats", args)) => {
            let overview = stats::admin_overview(desk.store());
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                let summaries: Vec<CharitySummary> = desk
                    .store()
                    .charities()
                    .iter()
                    .filter_map(|c| stats::charity_summary(desk.store(), &c.id))
                    .collect();
                print!("{}", render::overview(&overview, &summaries));
            }
        }
        Some(("inbox", args)) => {
            login(&mut desk, args)?;
            print!("{}", render::mailbox(&desk.inbox(), desk.unread_count()));
        }
        Some(("describe", args)) => {
            let generator = GeminiGenerator::new(AssistConfig::from_env());
            let text = describe_or_fallback(&generator, required(args, "title")?).await;
            println!("{text}");
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn move_requires_login() {
        let err = cli()
            .try_get_matches_from(["charity-desk", "move", "--task", "t1", "--to", "review"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["charity-desk", "stats", "--log-json", "--json"])
            .unwrap();
        assert!(matches.get_flag("log-json"));
    }

    #[test]
    fn login_through_args() {
        let matches = cli()
            .try_get_matches_from(["charity-desk", "inbox", "-u", "ber", "-p", "123"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let mut desk = Desk::seeded();
        login(&mut desk, args).unwrap();
        assert_eq!(desk.unread_count(), 1);
    }
}
