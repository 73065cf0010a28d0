//! `parley chat`

use crate::args::ChatArgs;
use crate::builtin_tools::BuiltinTools;
use crate::console::CliConsole;
use crate::history;
use anyhow::{Context, Result};
use dialoguer::{Confirm, theme::ColorfulTheme};
use parley_core::{
    ApprovalDecision, Conversation, ParleyConfig, PendingApproval, TurnController, TurnOutcome,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub async fn run(args: ChatArgs, mut config: ParleyConfig) -> Result<()> {
    if let Some(model) = &args.model {
        config.model = Some(model.clone());
    }

    let tools = Arc::new(BuiltinTools::new());
    let controller = config
        .build_controller(args.provider.as_deref(), tools.clone(), tools)
        .context("Could not set up the provider")?;
    let console = CliConsole::new(args.verbose);
    console.info(&format!(
        "Using {} ({})",
        controller.provider().id(),
        controller.settings().model
    ));

    let mut session = ChatSession {
        controller,
        conversation: match &args.history {
            Some(path) => history::load(path)?,
            None => Conversation::new(),
        },
        args,
        console,
    };

    match session.args.message.clone() {
        Some(message) => session.one_shot(&message).await,
        None => session.interactive().await,
    }
}

struct ChatSession {
    controller: TurnController,
    conversation: Conversation,
    args: ChatArgs,
    console: CliConsole,
}

impl ChatSession {
    async fn one_shot(&mut self, message: &str) -> Result<()> {
        let result = self.turn(message).await;
        self.save()?;
        result
    }

    async fn interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "exit" | "quit") {
                break;
            }

            // a failed turn is reported and the session goes on
            if let Err(e) = self.turn(line).await {
                self.console.error(&format!("{:#}", e));
            }
            self.save()?;
        }
        Ok(())
    }

    async fn turn(&mut self, message: &str) -> Result<()> {
        let mut outcome = self.controller.run_turn(&mut self.conversation, message).await?;
        loop {
            match outcome {
                TurnOutcome::Finished {
                    text,
                    tool_invocations,
                } => {
                    self.console
                        .info(&format!("{} tool call(s) this turn", tool_invocations));
                    self.console.assistant(&text);
                    return Ok(());
                }
                TurnOutcome::AwaitingApproval(pending) => {
                    self.console.assistant(&pending.text);
                    let decisions = self.decide(&pending)?;
                    outcome = self
                        .controller
                        .resume(&mut self.conversation, pending, &decisions)
                        .await?;
                }
            }
        }
    }

    fn decide(&self, pending: &PendingApproval) -> Result<Vec<ApprovalDecision>> {
        let mut decisions = Vec::new();
        for call in pending.calls_needing_approval() {
            let approved = if self.args.yes {
                true
            } else {
                Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!(
                        "Allow '{}' with {}?",
                        call.name,
                        serde_json::Value::Object(call.arguments.clone())
                    ))
                    .default(false)
                    .interact()?
            };
            if !approved {
                self.console.warn(&format!("Denied '{}'", call.name));
            }
            decisions.push(ApprovalDecision {
                call_id: call.id.clone(),
                approved,
            });
        }
        Ok(decisions)
    }

    fn save(&self) -> Result<()> {
        match &self.args.history {
            Some(path) => history::save(path, &self.conversation),
            None => Ok(()),
        }
    }
}
