use crate::deploy::{Deployment, Status};
use crate::error::Error;
use crate::infrastructure;
use crate::logger;
use crate::runner::{Runnable, Runner};
use crate::stack::StackProps;
use indicatif::ProgressBar;
use std::time::Duration;

/// How often to poll CloudFormation while an operation is running
const POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(clap::Args, Clone)]
pub struct DeployCommand {
    /// Stack environment, e.g. prod or staging
    #[arg(short, long)]
    environment: Option<String>,
}

impl Runnable for DeployCommand {
    fn runner(&self) -> impl Runner {
        DeployRunner {
            command: self.clone(),
        }
    }
}

struct DeployRunner {
    command: DeployCommand,
}

impl Runner for DeployRunner {
    /// Provision the stack and wait for the engine to finish
    async fn run(&mut self) -> Result<(), Error> {
        let environment = self
            .config()?
            .environment(self.command.environment.as_deref());

        let stack = infrastructure::stack(&environment, StackProps::default())?;

        println!(
            "{} {}...",
            console::style("Deploying").green().bold(),
            console::style(&environment).bold()
        );

        let deployment = Deployment::new(&stack).await?;
        deployment.provision().await?;

        let progress = logger::multi_progress().add(ProgressBar::new_spinner());
        progress.set_message("Waiting for CloudFormation");
        progress.enable_steady_tick(Duration::from_millis(120));

        loop {
            match deployment.status().await? {
                Status::InProgress => tokio::time::sleep(POLL_INTERVAL).await,

                Status::Complete => break,

                Status::Failed(errors) => {
                    progress.finish_and_clear();

                    return Err(self.error(
                        Some("Deployment failed"),
                        Some(&errors.join("\n")),
                        None,
                    ));
                }
            }
        }

        progress.finish_and_clear();
        println!("{}", console::style("Done").green().bold());
        Ok(())
    }
}
