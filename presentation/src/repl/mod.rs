//! Simulation REPL.
//!
//! Feeds hand-typed platform events into the orchestrator, standing in for
//! the chat platform's event stream.

use cappello_application::HandleInteractionUseCase;
use cappello_domain::{PlatformEvent, UserId};
use cappello_infrastructure::ConsolePlatform;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Interactive event-simulation REPL.
pub struct SortingRepl {
    use_case: HandleInteractionUseCase<ConsolePlatform, ConsolePlatform>,
    platform: Arc<ConsolePlatform>,
}

impl SortingRepl {
    pub fn new(
        use_case: HandleInteractionUseCase<ConsolePlatform, ConsolePlatform>,
        platform: Arc<ConsolePlatform>,
    ) -> Self {
        Self { use_case, platform }
    }

    /// Run the interactive REPL.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("cappello").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if self.handle_line(line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle one input line. Returns true if the REPL should exit.
    async fn handle_line(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();

        let event = match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return true;
            }
            "/help" | "/h" | "/?" => {
                self.print_help();
                return false;
            }
            "/roles" => {
                self.print_roles().await;
                return false;
            }
            "/join" => match parts.next() {
                Some(user) => PlatformEvent::UserJoined {
                    user: UserId::from(user),
                },
                None => {
                    println!("usage: /join <user>");
                    return false;
                }
            },
            "/press" => match (parts.next(), parts.next()) {
                (Some(user), Some(custom_id)) => PlatformEvent::ButtonPressed {
                    presser: UserId::from(user),
                    custom_id: custom_id.to_string(),
                },
                _ => {
                    println!("usage: /press <user> <custom_id>");
                    return false;
                }
            },
            "/reset" => match parts.next() {
                Some(user) => PlatformEvent::ResetRequested {
                    target: UserId::from(user),
                },
                None => {
                    println!("usage: /reset <user>");
                    return false;
                }
            },
            _ => {
                println!("Unknown command: {}", command);
                self.print_help();
                return false;
            }
        };

        if let Err(e) = self.use_case.handle(event).await {
            eprintln!("{} {}", "event failed:".red(), e);
        }
        false
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Cappello - Sorting Quiz Console       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_help();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /join <user>              - Simulate a user joining");
        println!("  /press <user> <custom_id> - Simulate a button press");
        println!("  /reset <user>             - Administrative house reset");
        println!("  /roles                    - Show the role ledger");
        println!("  /help                     - Show this help");
        println!("  /quit                     - Exit");
        println!();
    }

    async fn print_roles(&self) {
        let roles = self.platform.roles().await;
        if roles.is_empty() {
            println!("No houses assigned yet.");
            return;
        }
        println!();
        for (user, entry) in roles {
            println!(
                "  {} → {}  ({})",
                user.to_string().bold(),
                entry.house.to_string().green(),
                entry.assigned_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        println!();
    }
}
