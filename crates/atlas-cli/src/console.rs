//! Subcommand: `atlas console` -- interactive command console.
//!
//! A plain line previews the plan for that text.  Slash commands queue
//! jobs, cycle their status, and promote them into the workflow library.
//! The queue lives only as long as the console session.

use std::io::{self, BufRead, Write as _};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use atlas_intent::{Application, JobQueue, PlanSynthesizer, Workflow, promote};
use atlas_store::RegistryStore;

use crate::render;

/// One parsed console input line.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Preview the plan for free text.
    Preview(String),
    /// Commit text to the queue.
    Queue(String),
    Jobs,
    /// Cycle the status of the n-th job (1-based, newest first).
    Advance(usize),
    /// Promote the n-th job into the workflow library.
    Promote(usize),
    Apps,
    Workflows,
    Help,
    Quit,
    Empty,
}

impl ConsoleCommand {
    /// Parse a console line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Preview(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        Ok(match name {
            "queue" => Self::Queue(arg.to_string()),
            "jobs" => Self::Jobs,
            "advance" => Self::Advance(parse_position(arg)?),
            "promote" => Self::Promote(parse_position(arg)?),
            "apps" => Self::Apps,
            "workflows" => Self::Workflows,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command /{other}, try /help"),
        })
    }
}

fn parse_position(arg: &str) -> Result<usize> {
    let n: usize = arg
        .parse()
        .with_context(|| format!("expected a job number, got {arg:?}"))?;
    if n == 0 {
        bail!("job numbers start at 1");
    }
    Ok(n)
}

const HELP: &str = "\
  <text>             Preview the plan for <text>
  /queue <text>      Queue a job with a frozen plan
  /jobs              Show the automation queue
  /advance <n>       Cycle the status of job n
  /promote <n>       Save job n as a reusable workflow
  /apps              List registered applications
  /workflows         List the workflow library
  /help              Show this help
  /quit              Leave the console
";

/// Console state: registry snapshots plus the session's job queue.
pub struct Console {
    store: RegistryStore,
    synthesizer: PlanSynthesizer,
    queue: JobQueue,
    applications: Vec<Application>,
    workflows: Vec<Workflow>,
}

impl Console {
    /// Load both registries and start with an empty queue.
    pub async fn load(store: RegistryStore) -> Result<Self> {
        let applications = store
            .load_applications()
            .await
            .context("failed to load applications")?;
        let workflows = store
            .load_workflows()
            .await
            .context("failed to load workflows")?;
        Ok(Self {
            store,
            synthesizer: PlanSynthesizer::builtin(),
            queue: JobQueue::new(),
            applications,
            workflows,
        })
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Execute one command and return the text to print.
    pub async fn handle(&mut self, command: ConsoleCommand) -> Result<String> {
        match command {
            ConsoleCommand::Empty | ConsoleCommand::Quit => Ok(String::new()),
            ConsoleCommand::Help => Ok(HELP.to_string()),
            ConsoleCommand::Preview(text) => {
                let steps = self
                    .synthesizer
                    .synthesize(&text, &self.applications, &self.workflows);
                Ok(render::plan(&steps, &self.applications))
            }
            ConsoleCommand::Queue(text) => {
                let job = self.queue.commit(
                    &text,
                    &self.synthesizer,
                    &self.applications,
                    &self.workflows,
                )?;
                Ok(format!("  Queued job with {} step(s).\n", job.plan().len()))
            }
            ConsoleCommand::Jobs => Ok(render::jobs(self.queue.jobs())),
            ConsoleCommand::Advance(n) => {
                let job_id = self.job_id_at(n)?;
                let status = self.queue.advance(&job_id)?;
                Ok(format!("  Job {n} is now {}.\n", status.label()))
            }
            ConsoleCommand::Promote(n) => {
                let job_id = self.job_id_at(n)?;
                let job = self
                    .queue
                    .get(&job_id)
                    .with_context(|| format!("job {job_id} disappeared from the queue"))?;
                let workflow = promote(job, &self.workflows);
                let title = workflow.title.clone();
                self.store
                    .add_workflow(workflow)
                    .await
                    .context("failed to save workflow")?;
                self.workflows = self
                    .store
                    .load_workflows()
                    .await
                    .context("failed to reload workflows")?;
                Ok(format!("  Saved workflow \"{title}\".\n"))
            }
            ConsoleCommand::Apps => Ok(render::applications(&self.applications)),
            ConsoleCommand::Workflows => Ok(render::workflows(&self.workflows)),
        }
    }

    fn job_id_at(&self, n: usize) -> Result<String> {
        match n.checked_sub(1).and_then(|i| self.queue.jobs().get(i)) {
            Some(job) => Ok(job.id().to_string()),
            None => bail!("no job {n} (queue has {})", self.queue.len()),
        }
    }
}

/// Run the console on stdin/stdout until `/quit` or end of input.
pub async fn cmd_console(store: RegistryStore) -> Result<()> {
    let mut console = Console::load(store).await?;

    println!();
    println!("  Atlas v{}", env!("CARGO_PKG_VERSION"));
    println!("  Describe your next task, or /help for commands.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("atlas> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read input")?;

        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("  {e:#}");
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }

        match console.handle(command).await {
            Ok(output) => print!("{output}"),
            Err(e) => {
                warn!(error = %e, "console command failed");
                println!("  Error: {e:#}");
            }
        }
    }

    info!(
        jobs = console.queue().len(),
        workflows = console.workflows().len(),
        "console closed"
    );
    Ok(())
}

// ── tests ────────────────────────────────────────────────────────────
